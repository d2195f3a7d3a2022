// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use crate::error::Error;
use crate::grammar::Grammar;
use crate::item::{first_set_of_string, Item};
use crate::predictive::PredictiveSets;
use crate::tag::Symbol;
use std::collections::{BTreeSet, VecDeque};

/// A parser state: a set of LR(1) items. Identity for deduplication is
/// set equality, via the derived `Eq`/`Ord` on `BTreeSet<Item>`.
pub type ParserState = BTreeSet<Item>;

/// Least fixed point of expansion: worklist-based, so the accumulated
/// set and the pending set are both directly visible rather than
/// re-derived from a rescan-until-quiescent boolean.
pub fn closure(
    items: impl IntoIterator<Item = Item>,
    grammar: &Grammar,
    predictive: &PredictiveSets,
) -> Result<ParserState, Error> {
    let mut closed: ParserState = BTreeSet::new();
    let mut pending: VecDeque<Item> = items.into_iter().collect();

    while let Some(item) = pending.pop_front() {
        if !closed.insert(item) {
            continue;
        }
        if let Some(Symbol::NonTerminal(b)) = item.current_symbol(grammar) {
            let production = grammar.production(item.production);
            let follow_set = first_set_of_string(
                production,
                item.position as usize + 1,
                item.lookahead,
                predictive,
            )?;
            for rule in grammar.productions_of(b) {
                for lookahead in follow_set.iter() {
                    let candidate = Item::new(rule, 0, *lookahead);
                    if !closed.contains(&candidate) {
                        pending.push_back(candidate);
                    }
                }
            }
        }
    }

    Ok(closed)
}
