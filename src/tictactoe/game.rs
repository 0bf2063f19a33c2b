//! High-level game management

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Player},
    lines::WinLine,
};
use crate::types::Action;

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub action: Action,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// A game in progress with its move history.
///
/// The game owns the live board and the current-player flag. X always opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Player,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from an empty board with X to move
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            to_move: Player::X,
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play a move for `player`.
    ///
    /// # Errors
    ///
    /// Fails if the game is over, it is not `player`'s turn, or the cell is occupied.
    pub fn play(
        &mut self,
        action: Action,
        player: Player,
    ) -> Result<Option<GameOutcome>, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }
        if player != self.to_move {
            return Err(crate::Error::WrongTurn {
                expected: self.to_move,
                got: player,
            });
        }

        self.board.place(action, player)?;
        self.moves.push(Move { action, player });
        self.outcome = Self::evaluate(&self.board);
        if self.outcome.is_none() {
            self.to_move = player.opponent();
        }
        Ok(self.outcome)
    }

    /// Outcome of a board position, if it is terminal.
    pub fn evaluate(board: &Board) -> Option<GameOutcome> {
        if let Some(winner) = board.winner() {
            Some(GameOutcome::Win(winner))
        } else if board.is_draw() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for the engine's speculative search.
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Whose turn it is. Stays on the last mover once the game is over.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// The line to highlight when the game was won.
    pub fn winning_line(&self) -> Option<WinLine> {
        match self.outcome {
            Some(GameOutcome::Win(_)) => self.board.winning_line().map(|(line, _)| line),
            _ => None,
        }
    }

    /// Clear the board and hand the first move back to X.
    pub fn reset(&mut self) {
        *self = Game::new();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
