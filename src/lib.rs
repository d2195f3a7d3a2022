// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

//! Canonical LR(1) parser-table construction.
//!
//! Given an augmented, integer-tagged context-free grammar and its
//! precomputed FIRST sets/nullability, this crate builds the LR(1)
//! automaton: the canonical collection of item sets reachable from the
//! start state, and the ACTION/GOTO table mapping `(state, symbol)`
//! pairs to shift/reduce/goto/accept directives.
//!
//! What this crate is not: a lexer, a grammar-source parser, a
//! conflict resolver, or a code generator. Those are external
//! collaborators that consume a `Grammar` + `PredictiveSets` pair and
//! embed the resulting `ParserTable` into a generated parser.

pub mod builder;
pub mod closure;
pub mod error;
pub mod goto;
pub mod grammar;
pub mod item;
pub mod predictive;
pub mod table;
pub mod tag;

pub use builder::build_table;
pub use closure::{closure as item_set_closure, ParserState};
pub use error::Error;
pub use goto::goto as item_set_goto;
pub use grammar::Grammar;
pub use item::{first_set_of_string, Item};
pub use predictive::PredictiveSets;
pub use table::{ActionEntry, ParserStateId, ParserTable};
pub use tag::{NonTerminalIndex, ProductionRuleIndex, Symbol, TerminalIndex, TokenSet};
