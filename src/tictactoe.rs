//! Tic-Tac-Toe board, winning lines and game bookkeeping

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Board, Cell, Placement, Player};
pub use game::{Game, GameOutcome, Move};
pub use lines::{LineAnalyzer, LineKind, WIN_LINES, WinLine};

pub use crate::types::{Action, GameState};
