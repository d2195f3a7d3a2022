// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use crate::error::Error;
use crate::grammar::Grammar;
use crate::predictive::PredictiveSets;
use crate::tag::{ProductionRuleIndex, Symbol, TerminalIndex, TokenSet};

/// An LR(1) item: a production, a dot position, and a single-terminal
/// lookahead. Two items differing only in lookahead are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub production: ProductionRuleIndex,
    pub position: u32,
    pub lookahead: TerminalIndex,
}

impl Item {
    pub fn new(production: ProductionRuleIndex, position: u32, lookahead: TerminalIndex) -> Self {
        Self {
            production,
            position,
            lookahead,
        }
    }

    /// The symbol at `position` in the referenced production, or
    /// `None` when the dot is at the end.
    pub fn current_symbol(&self, grammar: &Grammar) -> Option<Symbol> {
        grammar
            .production(self.production)
            .get(self.position as usize)
            .copied()
    }

    pub fn is_reducible(&self, grammar: &Grammar) -> bool {
        self.current_symbol(grammar).is_none()
    }

    /// An item is a kernel item if the dot is not at the start, or it
    /// is the start item of the augmented start production.
    pub fn is_kernel(&self, grammar: &Grammar) -> bool {
        self.position > 0 || is_start_production(self, grammar)
    }

    /// Returns a new item with the dot advanced one symbol.
    /// Precondition: `current_symbol` is not `None`.
    pub fn advance(&self, grammar: &Grammar) -> Self {
        debug_assert!(self.current_symbol(grammar).is_some());
        Self {
            production: self.production,
            position: self.position + 1,
            lookahead: self.lookahead,
        }
    }
}

fn is_start_production(item: &Item, grammar: &Grammar) -> bool {
    grammar
        .productions_of(grammar.start_nonterminal)
        .any(|r| r == item.production)
}

/// FIRST of `production[start_index..] . lookahead`: union FIRST of
/// each symbol in the suffix until a non-nullable symbol is found (or
/// the suffix is exhausted, in which case `lookahead` itself is
/// included).
pub fn first_set_of_string(
    production: &[Symbol],
    start_index: usize,
    lookahead: TerminalIndex,
    predictive: &PredictiveSets,
) -> Result<TokenSet, Error> {
    if start_index > production.len() {
        return Err(Error::InvalidArgument {
            start_index,
            production_len: production.len(),
        });
    }
    let mut result = TokenSet::new();
    let mut index = start_index;
    loop {
        if index == production.len() {
            result.insert(lookahead);
            break;
        }
        match production[index] {
            Symbol::Terminal(t) => {
                result.insert(t);
                break;
            }
            Symbol::NonTerminal(n) => {
                result |= &predictive.first(n);
                if predictive.is_nullable(n) {
                    index += 1;
                } else {
                    break;
                }
            }
        }
    }
    Ok(result)
}
