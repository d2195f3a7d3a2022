// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use crate::closure::ParserState;
use crate::tag::{NonTerminalIndex, ProductionRuleIndex, TerminalIndex};
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParserStateId(pub u32);

impl fmt::Display for ParserStateId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A single ACTION table entry. A `BTreeSet<ActionEntry>` with more
/// than one member at a `(state, terminal)` key is a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionEntry {
    Shift(ParserStateId),
    Reduce(ProductionRuleIndex),
    Accept,
}

impl fmt::Display for ActionEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ActionEntry::Shift(id) => write!(f, "shift {}", id),
            ActionEntry::Reduce(rule) => write!(f, "reduce {}", rule),
            ActionEntry::Accept => write!(f, "accept"),
        }
    }
}

/// The constructed parser table: ACTION/GOTO maps plus the states they
/// were derived from, retained for diagnostics and conflict reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserTable {
    pub state_count: u32,
    pub initial_state: ParserStateId,
    pub action: BTreeMap<(ParserStateId, TerminalIndex), BTreeSet<ActionEntry>>,
    pub goto: BTreeMap<(ParserStateId, NonTerminalIndex), ParserStateId>,
    pub states: BTreeMap<ParserStateId, ParserState>,
}

impl ParserTable {
    /// Every `(state, terminal)` key whose action set holds more than
    /// one entry: a shift/reduce or reduce/reduce conflict left for a
    /// downstream resolver to adjudicate.
    pub fn conflicts(
        &self,
    ) -> impl Iterator<Item = (&(ParserStateId, TerminalIndex), &BTreeSet<ActionEntry>)> {
        self.action.iter().filter(|(_, entries)| entries.len() > 1)
    }

    pub fn action_of(&self, state: ParserStateId, terminal: TerminalIndex) -> Option<&BTreeSet<ActionEntry>> {
        self.action.get(&(state, terminal))
    }

    pub fn goto_of(&self, state: ParserStateId, non_terminal: NonTerminalIndex) -> Option<ParserStateId> {
        self.goto.get(&(state, non_terminal)).copied()
    }
}

impl Default for ParserStateId {
    fn default() -> Self {
        ParserStateId(0)
    }
}
