// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::fmt;

/// Errors raised by the item algebra and automaton builder.
///
/// Conflicts (shift/reduce, reduce/reduce) are never represented here:
/// they are data recorded in `ParserTable`, not failures of the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `first_set_of_string` was called with a `start_index` past the
    /// end of the production.
    InvalidArgument {
        start_index: usize,
        production_len: usize,
    },
    /// The grammar handed to `build_table` lacks the reserved `Start`
    /// or `$` entries, or `$` appears somewhere other than at the end
    /// of `Start`'s production.
    MissingAugmentation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidArgument {
                start_index,
                production_len,
            } => write!(
                f,
                "invalid start index {} for production of length {}",
                start_index, production_len
            ),
            Error::MissingAugmentation => {
                write!(f, "grammar is not augmented with a Start/$ production")
            }
        }
    }
}

impl std::error::Error for Error {}
