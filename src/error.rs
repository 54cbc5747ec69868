//! Error types for tile-search

use thiserror::Error;

use crate::board::Board;
use crate::search::Strategy;

/// Reasons an input board is rejected before any search starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected 9 symbols, found {found}")]
    SymbolCount { found: usize },

    #[error("invalid symbol {symbol:?}")]
    InvalidSymbol { symbol: char },

    #[error("tile {tile} appears more than once")]
    DuplicateTile { tile: u8 },

    #[error("expected {expected} blank cell(s), found {found}")]
    BlankCount { expected: usize, found: usize },

    #[error("tile {tile} is out of range (tiles are 1..={max})")]
    TileOutOfRange { tile: u8, max: u8 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed board: {0}")]
    Parse(#[from] ParseError),

    /// Frontier emptied without reaching the goal
    #[error("{strategy}: no solution found after expanding {expanded} nodes")]
    Exhausted { strategy: Strategy, expanded: usize },

    /// Replaying the reconstructed actions did not land on the goal
    #[error("{strategy}: replayed path ends at {found}, expected {expected}")]
    ReplayMismatch {
        strategy: Strategy,
        expected: Board,
        found: Board,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
