//! A perfect agent for playing or analysing m-in-a-row games on an n×n board
//!
//! The winning lines of a board are generated once for a given size and run
//! length, and an exhaustive minimax search with alpha-beta pruning is used to
//! find the best move for the automated player.
//!
//! # Basic Usage
//!
//! ```
//! use tictactoe_ai::{board::{Board, Player}, lines::WinningLines, solver::Solver};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let lines = WinningLines::generate(3, 3)?;
//! let mut board: Board = "OO-XX----".parse()?;
//! let mut solver = Solver::new(lines, Player::O);
//! let (score, best_move) = solver.best_move(&mut board)?;
//!
//! assert!((score, best_move) == (100, 2));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod lines;

pub mod solver;


pub use board::{Board, Cell, GameState, Player};
pub use error::{Error, Result};
pub use lines::{evaluate_winner, generate_winning_lines, is_full, WinningLines};
pub use solver::{best_move, SearchConfig, Solver};

/// The default width and height of the board in cells
pub const DEFAULT_SIZE: usize = 3;

/// The default number of marks in a row needed to win
pub const DEFAULT_RUN: usize = 3;

/// The largest supported board width
pub const MAX_BOARD_SIZE: usize = 24;

/// The shortest supported winning run
pub const MIN_RUN: usize = 2;

/// The score of a win found at the root of the search
pub const WIN_SCORE: i32 = 100;

/// The search depth allowed per unit of board width
pub const DEPTH_PER_SIDE: usize = 4;

const_assert!(MIN_RUN <= DEFAULT_RUN && DEFAULT_RUN <= DEFAULT_SIZE);
// a win at the deepest possible ply must still score above a draw
const_assert!(DEPTH_PER_SIDE * MAX_BOARD_SIZE < WIN_SCORE as usize);
