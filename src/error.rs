//! Typed errors for board construction.
//!
//! Exhaustion of the search space is not an error: it is reported through
//! [`crate::report::Outcome::Unsolvable`].

use thiserror::Error;

/// The input is not a permutation of the tile set `0..=8`.
///
/// Returned before any search begins; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidBoardError {
    #[error("expected {expected} tiles, found {found}")]
    WrongTileCount { expected: usize, found: usize },

    #[error("tile value {value} is out of range (expected 0..=8)")]
    OutOfRange { value: u8 },

    #[error("tile value {value} appears more than once")]
    Duplicate { value: u8 },

    #[error("unparseable tile '{token}'")]
    Unparseable { token: String },
}
