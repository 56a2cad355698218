//! A Connect 4 engine with a depth-limited minimax opponent
//!
//! The computer player searches a fixed number of plies with plain minimax,
//! scores the leaves with a window-counting heuristic and breaks ties between
//! equally good columns at random.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::Board, solver::Solver};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player two has three stacked tiles in the third column
//! let board = Board::from_moves("131353")?;
//! let mut solver = Solver::seeded(7);
//! let (best_move, value) = solver.minimax(&board, 4, true);
//!
//! assert_eq!(best_move, Some(2));
//! assert_eq!(value, connect4_minimax::WIN_SCORE);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod evaluation;

pub mod solver;

pub mod session;

pub mod arena;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const WINDOW: usize = 4;

/// The column that earns the centre control bonus
pub const CENTER_COLUMN: usize = WIDTH / 2;

/// The number of plies the computer opponent searches
pub const SEARCH_DEPTH: u32 = 4;

/// The value of a position won by the maximizing player
pub const WIN_SCORE: i64 = 1_000_000_000_000;

// a window must fit along every direction of the board
const_assert!(WINDOW <= WIDTH && WINDOW <= HEIGHT);
const_assert!(CENTER_COLUMN < WIDTH);
const_assert!(SEARCH_DEPTH > 0);
