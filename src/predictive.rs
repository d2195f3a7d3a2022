// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use crate::grammar::Grammar;
use crate::tag::{NonTerminalIndex, Symbol, TokenSet};
use std::collections::BTreeMap;

/// Precomputed FIRST sets and nullability, one entry per non-terminal.
///
/// Built once from a `Grammar` and then treated as an immutable oracle
/// by the closure/goto/builder layers — nothing downstream of
/// `compute` ever mutates a `PredictiveSets`.
#[derive(Debug, Clone, Default)]
pub struct PredictiveSets {
    first: BTreeMap<NonTerminalIndex, TokenSet>,
    nullable: BTreeMap<NonTerminalIndex, bool>,
}

impl PredictiveSets {
    pub fn first(&self, non_terminal: NonTerminalIndex) -> TokenSet {
        self.first.get(&non_terminal).cloned().unwrap_or_default()
    }

    pub fn is_nullable(&self, non_terminal: NonTerminalIndex) -> bool {
        self.nullable.get(&non_terminal).copied().unwrap_or(false)
    }

    /// Fixed-point computation over the grammar's productions: a
    /// direct saturating rescan that stops once a full pass over every
    /// non-terminal adds nothing new to either `first` or `nullable`.
    pub fn compute(grammar: &Grammar) -> Self {
        let mut first: BTreeMap<NonTerminalIndex, TokenSet> = grammar
            .non_terminals()
            .map(|n| (n, TokenSet::new()))
            .collect();
        let mut nullable: BTreeMap<NonTerminalIndex, bool> =
            grammar.non_terminals().map(|n| (n, false)).collect();

        let mut changed = true;
        while changed {
            changed = false;
            for non_terminal in grammar.non_terminals() {
                for rule in grammar.productions_of(non_terminal) {
                    let symbols = grammar.production(rule);
                    if symbols.is_empty() {
                        if !nullable[&non_terminal] {
                            nullable.insert(non_terminal, true);
                            changed = true;
                        }
                        continue;
                    }
                    let mut rhs_nullable = true;
                    for symbol in symbols {
                        match symbol {
                            Symbol::Terminal(t) => {
                                let set = first.get_mut(&non_terminal).unwrap();
                                if set.insert(*t) {
                                    changed = true;
                                }
                                rhs_nullable = false;
                                break;
                            }
                            Symbol::NonTerminal(n) => {
                                let addition = first[n].clone();
                                let set = first.get_mut(&non_terminal).unwrap();
                                let before = set.len();
                                *set |= &addition;
                                if set.len() != before {
                                    changed = true;
                                }
                                if !nullable[n] {
                                    rhs_nullable = false;
                                    break;
                                }
                            }
                        }
                    }
                    if rhs_nullable && !nullable[&non_terminal] {
                        nullable.insert(non_terminal, true);
                        changed = true;
                    }
                }
            }
        }

        Self { first, nullable }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{ProductionRuleIndex, TerminalIndex};
    use std::collections::BTreeSet;

    #[test]
    fn nullable_production_propagates_first_of_following_symbol() {
        // S -> <empty> | a S   (terminal 0 = a)
        let mut productions = BTreeMap::new();
        productions.insert(ProductionRuleIndex(0), vec![]);
        productions.insert(
            ProductionRuleIndex(1),
            vec![Symbol::Terminal(TerminalIndex(0)), Symbol::NonTerminal(NonTerminalIndex(0))],
        );
        let mut by_nt = BTreeMap::new();
        by_nt.insert(
            NonTerminalIndex(0),
            BTreeSet::from([ProductionRuleIndex(0), ProductionRuleIndex(1)]),
        );
        let grammar = Grammar::from_parts(productions, by_nt, 1, 1, NonTerminalIndex(0), TerminalIndex(0));
        let sets = PredictiveSets::compute(&grammar);
        assert!(sets.is_nullable(NonTerminalIndex(0)));
        assert!(sets.first(NonTerminalIndex(0)).contains(&TerminalIndex(0)));
    }

    #[test]
    fn non_nullable_chain_does_not_propagate_nullability() {
        // S -> A a ; A -> b
        let mut productions = BTreeMap::new();
        productions.insert(
            ProductionRuleIndex(0),
            vec![Symbol::NonTerminal(NonTerminalIndex(1)), Symbol::Terminal(TerminalIndex(0))],
        );
        productions.insert(ProductionRuleIndex(1), vec![Symbol::Terminal(TerminalIndex(1))]);
        let mut by_nt = BTreeMap::new();
        by_nt.insert(NonTerminalIndex(0), BTreeSet::from([ProductionRuleIndex(0)]));
        by_nt.insert(NonTerminalIndex(1), BTreeSet::from([ProductionRuleIndex(1)]));
        let grammar = Grammar::from_parts(productions, by_nt, 2, 2, NonTerminalIndex(0), TerminalIndex(1));
        let sets = PredictiveSets::compute(&grammar);
        assert!(!sets.is_nullable(NonTerminalIndex(0)));
        assert!(sets.first(NonTerminalIndex(0)).contains(&TerminalIndex(1)));
        assert!(!sets.first(NonTerminalIndex(0)).contains(&TerminalIndex(0)));
    }
}
