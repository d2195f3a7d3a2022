// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use crate::closure::{closure, ParserState};
use crate::error::Error;
use crate::goto::goto;
use crate::grammar::Grammar;
use crate::item::Item;
use crate::predictive::PredictiveSets;
use crate::table::{ActionEntry, ParserStateId, ParserTable};
use crate::tag::Symbol;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// State kept for the duration of one `build_table` call: the state
/// bijection, the partial ACTION/GOTO maps, and the id counter. Held
/// as a plain local value since canonical LR(1) states never change
/// once interned — nothing needs shared mutable access to them.
struct BuilderState {
    ids_by_state: BTreeMap<ParserState, ParserStateId>,
    states_by_id: BTreeMap<ParserStateId, ParserState>,
    next_id: u32,
    action: BTreeMap<(ParserStateId, crate::tag::TerminalIndex), BTreeSet<ActionEntry>>,
    goto_table: BTreeMap<(ParserStateId, crate::tag::NonTerminalIndex), ParserStateId>,
}

impl BuilderState {
    fn new() -> Self {
        Self {
            ids_by_state: BTreeMap::new(),
            states_by_id: BTreeMap::new(),
            next_id: 0,
            action: BTreeMap::new(),
            goto_table: BTreeMap::new(),
        }
    }

    /// Look up `state` by set equality; allocate a fresh id on first
    /// sight. Canonical LR(1) identity is the *whole* item set
    /// (including lookaheads), never just the kernel.
    fn intern(&mut self, state: ParserState) -> (bool, ParserStateId) {
        if let Some(id) = self.ids_by_state.get(&state) {
            return (false, *id);
        }
        let id = ParserStateId(self.next_id);
        self.next_id += 1;
        self.ids_by_state.insert(state.clone(), id);
        self.states_by_id.insert(id, state);
        (true, id)
    }
}

/// Construct the canonical LR(1) ACTION/GOTO table for `grammar`.
///
/// Precondition (checked, not assumed): `grammar` is augmented with a
/// `Start -> S $` production and `$` appears nowhere else.
pub fn build_table(grammar: &Grammar, predictive: &PredictiveSets) -> Result<ParserTable, Error> {
    grammar.validate_augmentation()?;

    let mut builder = BuilderState::new();

    let seed: Vec<Item> = grammar
        .productions_of(grammar.start_nonterminal)
        .map(|rule| Item::new(rule, 0, grammar.eof_terminal))
        .collect();
    let initial_state = closure(seed, grammar, predictive)?;
    let (_, initial_id) = builder.intern(initial_state);
    debug_assert_eq!(initial_id, ParserStateId(0));

    let mut worklist: VecDeque<ParserStateId> = VecDeque::new();
    worklist.push_back(initial_id);

    while let Some(sid) = worklist.pop_front() {
        let items = builder.states_by_id[&sid].clone();
        // Memoize goto within this state: several items can share the
        // same current symbol and would otherwise recompute an
        // identical successor state.
        let mut goto_cache: BTreeMap<Symbol, ParserStateId> = BTreeMap::new();

        for item in items.iter() {
            match item.current_symbol(grammar) {
                None => {
                    builder
                        .action
                        .entry((sid, item.lookahead))
                        .or_insert_with(BTreeSet::new)
                        .insert(ActionEntry::Reduce(item.production));
                }
                Some(Symbol::Terminal(t)) if t == grammar.eof_terminal => {
                    builder
                        .action
                        .entry((sid, t))
                        .or_insert_with(BTreeSet::new)
                        .insert(ActionEntry::Accept);
                }
                Some(symbol @ Symbol::Terminal(t)) => {
                    let target = resolve_goto(&mut builder, &mut goto_cache, &items, symbol, grammar, predictive)?;
                    let (is_new, tid) = target;
                    builder
                        .action
                        .entry((sid, t))
                        .or_insert_with(BTreeSet::new)
                        .insert(ActionEntry::Shift(tid));
                    if is_new {
                        worklist.push_back(tid);
                    }
                }
                Some(symbol @ Symbol::NonTerminal(n)) => {
                    let target = resolve_goto(&mut builder, &mut goto_cache, &items, symbol, grammar, predictive)?;
                    let (is_new, nid) = target;
                    builder.goto_table.insert((sid, n), nid);
                    if is_new {
                        worklist.push_back(nid);
                    }
                }
            }
        }
    }

    Ok(ParserTable {
        state_count: builder.next_id,
        initial_state,
        action: builder.action,
        goto: builder.goto_table,
        states: builder.states_by_id,
    })
}

fn resolve_goto(
    builder: &mut BuilderState,
    cache: &mut BTreeMap<Symbol, ParserStateId>,
    state: &ParserState,
    symbol: Symbol,
    grammar: &Grammar,
    predictive: &PredictiveSets,
) -> Result<(bool, ParserStateId), Error> {
    if let Some(id) = cache.get(&symbol) {
        return Ok((false, *id));
    }
    let successor = goto(state, symbol, grammar, predictive)?;
    let (is_new, id) = builder.intern(successor);
    cache.insert(symbol, id);
    Ok((is_new, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{NonTerminalIndex, ProductionRuleIndex, Symbol, TerminalIndex};
    use std::collections::BTreeMap as StdBTreeMap;

    /// `S -> a`, augmented to `Start -> S $`.
    fn single_terminal_grammar() -> Grammar {
        let mut productions = StdBTreeMap::new();
        productions.insert(ProductionRuleIndex(1), vec![Symbol::Terminal(TerminalIndex(0))]);
        let mut by_nt = StdBTreeMap::new();
        by_nt.insert(NonTerminalIndex(0), BTreeSet::from([ProductionRuleIndex(1)]));
        Grammar::augmented(productions, by_nt, 1, 1, NonTerminalIndex(0))
    }

    #[test]
    fn single_terminal_grammar_has_three_states() {
        let grammar = single_terminal_grammar();
        let predictive = PredictiveSets::compute(&grammar);
        let table = build_table(&grammar, &predictive).unwrap();
        // I0, goto-on-`a`, goto-on-`S`: the post-`$` state never gets
        // built since EOF is Accept-without-successor (see goto.rs's
        // eof handling in build_table above).
        assert_eq!(table.state_count, 3);
        assert_eq!(table.initial_state, ParserStateId(0));

        let eof = grammar.eof_terminal;
        let a = TerminalIndex(0);

        // state 0: shift `a`.
        let actions_on_a = table.action_of(ParserStateId(0), a).unwrap();
        assert_eq!(actions_on_a.len(), 1);
        let shift_target = match actions_on_a.iter().next().unwrap() {
            ActionEntry::Shift(id) => *id,
            other => panic!("expected shift, got {:?}", other),
        };

        // post-`a` state reduces S -> a on $.
        let reduce_actions = table.action_of(shift_target, eof).unwrap();
        assert!(reduce_actions.contains(&ActionEntry::Reduce(ProductionRuleIndex(1))));

        // goto on S from state 0 leads to the accepting state.
        let goto_target = table.goto_of(ParserStateId(0), NonTerminalIndex(0)).unwrap();
        let accept_actions = table.action_of(goto_target, eof).unwrap();
        assert!(accept_actions.contains(&ActionEntry::Accept));
    }

    #[test]
    fn every_state_other_than_initial_is_reachable() {
        let grammar = single_terminal_grammar();
        let predictive = PredictiveSets::compute(&grammar);
        let table = build_table(&grammar, &predictive).unwrap();
        let mut reachable: BTreeSet<ParserStateId> = BTreeSet::new();
        for entries in table.action.values() {
            for entry in entries {
                if let ActionEntry::Shift(id) = entry {
                    reachable.insert(*id);
                }
            }
        }
        for id in table.goto.values() {
            reachable.insert(*id);
        }
        for id in table.states.keys() {
            if *id != table.initial_state {
                assert!(reachable.contains(id), "state {:?} unreachable", id);
            }
        }
    }

    #[test]
    fn build_table_is_deterministic_across_runs() {
        let grammar = single_terminal_grammar();
        let predictive = PredictiveSets::compute(&grammar);
        let first = build_table(&grammar, &predictive).unwrap();
        let second = build_table(&grammar, &predictive).unwrap();
        assert_eq!(first.action, second.action);
        assert_eq!(first.goto, second.goto);
        assert_eq!(first.states, second.states);
    }

    #[test]
    fn missing_augmentation_is_rejected() {
        // A grammar whose "start" non-terminal has no productions at all.
        let productions = StdBTreeMap::new();
        let by_nt = StdBTreeMap::new();
        let grammar = Grammar::from_parts(productions, by_nt, 1, 1, NonTerminalIndex(0), TerminalIndex(0));
        let predictive = PredictiveSets::compute(&grammar);
        assert_eq!(build_table(&grammar, &predictive), Err(Error::MissingAugmentation));
    }
}
