//! Opponent port for scripted play against the engine.

use crate::{
    Result,
    tictactoe::{Action, Board, Player},
};

/// A policy that plays the human side in automated games.
///
/// Evaluation runs drive the engine against implementations of this trait
/// instead of interactive input.
pub trait Opponent: Send {
    /// Choose a move for `player` on `board`.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has no empty cell.
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action>;

    /// Short identifier used in reports and logs.
    fn name(&self) -> &str;

    /// Seed the opponent's random number generator, if it has one.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
