//! Errors raised by the board, line generator and solver

use thiserror::Error;

use crate::board::Player;

/// Why a cell index was refused
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexFault {
    #[error("out of range, the board has {cells} cells")]
    OutOfRange { cells: usize },

    #[error("cell is already taken")]
    Occupied,
}

/// Which search precondition a caller broke
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Precondition {
    #[error("the board is full")]
    BoardFull,

    #[error("player {0} has already won")]
    AlreadyWon(Player),
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A move named a cell outside the board or one that is already taken.
    /// Recoverable by choosing another cell.
    #[error("invalid move {index}: {reason}")]
    InvalidIndex { index: usize, reason: IndexFault },

    /// The solver was asked to move in a finished position
    #[error("cannot search this position: {0}")]
    PreconditionViolation(Precondition),

    /// The run length must be at least `MIN_RUN` and at most the board size,
    /// which itself may not exceed `MAX_BOARD_SIZE`
    #[error("invalid geometry: run length {run} on a {size}x{size} board")]
    InvalidGeometry { size: usize, run: usize },

    #[error("board is {board}x{board} but the winning lines were generated for {lines}x{lines}")]
    GeometryMismatch { board: usize, lines: usize },

    #[error("could not parse '{character}' at position {position} as a cell")]
    InvalidCell { character: char, position: usize },

    #[error("a board of {len} cells is not square")]
    BoardLength { len: usize },

    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
