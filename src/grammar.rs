// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use crate::error::Error;
use crate::tag::{NonTerminalIndex, ProductionRuleIndex, Symbol, TerminalIndex};
use std::collections::{BTreeMap, BTreeSet};

/// A tagged, augmented context-free grammar.
///
/// `productions`/`productions_by_nonterminal` are the only things the
/// core reads; name resolution, literal/regex token definitions and
/// everything else that turns source text into these tables belongs to
/// the external grammar-tagging frontend (out of scope here).
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: BTreeMap<ProductionRuleIndex, Vec<Symbol>>,
    productions_by_nonterminal: BTreeMap<NonTerminalIndex, BTreeSet<ProductionRuleIndex>>,
    terminal_count: u32,
    nonterminal_count: u32,
    pub start_nonterminal: NonTerminalIndex,
    pub eof_terminal: TerminalIndex,
}

impl Grammar {
    /// Build a `Grammar` from already-augmented, already-tagged parts.
    pub fn from_parts(
        productions: BTreeMap<ProductionRuleIndex, Vec<Symbol>>,
        productions_by_nonterminal: BTreeMap<NonTerminalIndex, BTreeSet<ProductionRuleIndex>>,
        terminal_count: u32,
        nonterminal_count: u32,
        start_nonterminal: NonTerminalIndex,
        eof_terminal: TerminalIndex,
    ) -> Self {
        Self {
            productions,
            productions_by_nonterminal,
            terminal_count,
            nonterminal_count,
            start_nonterminal,
            eof_terminal,
        }
    }

    /// Augment a user grammar with the synthetic `Start -> S $` production.
    ///
    /// `Start` and `$` are assigned the first unused non-terminal and
    /// terminal indices respectively, so callers need not reserve them
    /// up front.
    pub fn augmented(
        mut productions: BTreeMap<ProductionRuleIndex, Vec<Symbol>>,
        mut productions_by_nonterminal: BTreeMap<NonTerminalIndex, BTreeSet<ProductionRuleIndex>>,
        terminal_count: u32,
        nonterminal_count: u32,
        user_start: NonTerminalIndex,
    ) -> Self {
        let eof_terminal = TerminalIndex(terminal_count);
        let start_nonterminal = NonTerminalIndex(nonterminal_count);
        let start_rule = next_production_index(&productions);
        productions.insert(
            start_rule,
            vec![Symbol::NonTerminal(user_start), Symbol::Terminal(eof_terminal)],
        );
        productions_by_nonterminal
            .entry(start_nonterminal)
            .or_insert_with(BTreeSet::new)
            .insert(start_rule);
        Self {
            productions,
            productions_by_nonterminal,
            terminal_count: terminal_count + 1,
            nonterminal_count: nonterminal_count + 1,
            start_nonterminal,
            eof_terminal,
        }
    }

    pub fn production(&self, rule: ProductionRuleIndex) -> &[Symbol] {
        &self.productions[&rule]
    }

    pub fn productions_of(&self, non_terminal: NonTerminalIndex) -> impl Iterator<Item = ProductionRuleIndex> + '_ {
        self.productions_by_nonterminal
            .get(&non_terminal)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn terminal_count(&self) -> u32 {
        self.terminal_count
    }

    pub fn nonterminal_count(&self) -> u32 {
        self.nonterminal_count
    }

    pub fn terminals(&self) -> impl Iterator<Item = TerminalIndex> {
        (0..self.terminal_count).map(TerminalIndex)
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = NonTerminalIndex> {
        (0..self.nonterminal_count).map(NonTerminalIndex)
    }

    pub fn productions(&self) -> impl Iterator<Item = (ProductionRuleIndex, &[Symbol])> {
        self.productions.iter().map(|(r, syms)| (*r, syms.as_slice()))
    }

    /// Checks, rather than silently assumes, that `$` appears only as
    /// the last symbol of `Start`'s production(s).
    pub fn validate_augmentation(&self) -> Result<(), Error> {
        let start_rules: Vec<_> = self.productions_of(self.start_nonterminal).collect();
        if start_rules.is_empty() {
            return Err(Error::MissingAugmentation);
        }
        for (rule, symbols) in self.productions() {
            for (position, symbol) in symbols.iter().enumerate() {
                if *symbol == Symbol::Terminal(self.eof_terminal) {
                    let is_start_rule = start_rules.contains(&rule);
                    let is_last = position + 1 == symbols.len();
                    if !is_start_rule || !is_last {
                        return Err(Error::MissingAugmentation);
                    }
                }
            }
        }
        Ok(())
    }
}

fn next_production_index(
    productions: &BTreeMap<ProductionRuleIndex, Vec<Symbol>>,
) -> ProductionRuleIndex {
    let next = productions
        .keys()
        .map(|r| r.0)
        .max()
        .map(|m| m + 1)
        .unwrap_or(0);
    ProductionRuleIndex(next)
}
