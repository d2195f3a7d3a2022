// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use crate::closure::{closure, ParserState};
use crate::error::Error;
use crate::grammar::Grammar;
use crate::item::Item;
use crate::predictive::PredictiveSets;
use crate::tag::Symbol;

/// The successor state of `state` under `symbol`: advance every item
/// whose current symbol matches, then close the result.
///
/// If no item in `state` has `symbol` as its current symbol the
/// result is the empty state; callers must treat that as "no
/// transition" and not register it.
pub fn goto(
    state: &ParserState,
    symbol: Symbol,
    grammar: &Grammar,
    predictive: &PredictiveSets,
) -> Result<ParserState, Error> {
    let kernel = state
        .iter()
        .filter(|item| item.current_symbol(grammar) == Some(symbol))
        .map(|item| item.advance(grammar));
    closure(kernel, grammar, predictive)
}
