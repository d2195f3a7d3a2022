// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

//! Dense integer tags for grammar symbols and productions.
//!
//! The core never looks symbols up by name; everything is indexed by
//! these newtypes so that the automaton builder can use `BTreeMap`s
//! keyed on cheap `Copy` values throughout.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminalIndex(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminalIndex(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductionRuleIndex(pub u32);

impl fmt::Display for TerminalIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl fmt::Display for NonTerminalIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for ProductionRuleIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A grammar symbol: either a terminal or a non-terminal, tagged by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(TerminalIndex),
    NonTerminal(NonTerminalIndex),
}

impl Symbol {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Terminal(t) => write!(f, "{}", t),
            Symbol::NonTerminal(n) => write!(f, "{}", n),
        }
    }
}

impl From<TerminalIndex> for Symbol {
    fn from(t: TerminalIndex) -> Self {
        Symbol::Terminal(t)
    }
}

impl From<NonTerminalIndex> for Symbol {
    fn from(n: NonTerminalIndex) -> Self {
        Symbol::NonTerminal(n)
    }
}

/// An ordered set of terminal indices, with `BitOr` sugar for the
/// set-union idiom `first_set_of_string`/`closure` lean on heavily.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TokenSet(std::collections::BTreeSet<TerminalIndex>);

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(t: TerminalIndex) -> Self {
        let mut set = Self::new();
        set.insert(t);
        set
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, t: &TerminalIndex) -> bool {
        self.0.contains(t)
    }

    /// Returns `true` if `t` was not already present.
    pub fn insert(&mut self, t: TerminalIndex) -> bool {
        self.0.insert(t)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TerminalIndex> {
        self.0.iter()
    }
}

impl std::ops::BitOrAssign<&TokenSet> for TokenSet {
    fn bitor_assign(&mut self, rhs: &TokenSet) {
        for t in rhs.iter() {
            self.0.insert(*t);
        }
    }
}

impl std::iter::FromIterator<TerminalIndex> for TokenSet {
    fn from_iter<I: IntoIterator<Item = TerminalIndex>>(iter: I) -> Self {
        Self(std::collections::BTreeSet::from_iter(iter))
    }
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (index, t) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", t)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_set_union_is_ordered_and_deduplicated() {
        let mut a = TokenSet::singleton(TerminalIndex(2));
        a.insert(TerminalIndex(0));
        let b = TokenSet::singleton(TerminalIndex(1));
        a |= &b;
        let collected: Vec<_> = a.iter().map(|t| t.0).collect();
        assert_eq!(collected, vec![0, 1, 2]);
    }
}
