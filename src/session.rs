//! One interactive game against the engine.
//!
//! A [`Session`] owns the live game, the move selector and the value store for
//! its lifetime. The human plays `X` and always opens; the engine plays `O`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    selector::{Choice, Difficulty, MoveSelector},
    tictactoe::{Action, Board, Game, GameOutcome, Move, Player, WinLine},
    value_store::ValueStore,
};

/// The engine's reply as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineMove {
    pub choice: Choice,
    /// Outcome after the move, if it ended the game.
    pub outcome: Option<GameOutcome>,
    /// Whether the value store was updated for this move.
    pub recorded: bool,
}

impl EngineMove {
    pub fn action(&self) -> Action {
        self.choice.action
    }
}

/// Result of a human move plus the engine's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub human: Action,
    /// `None` when the human move ended the game.
    pub engine: Option<EngineMove>,
    pub outcome: Option<GameOutcome>,
}

/// Running totals across the games of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub engine_wins: usize,
    pub human_wins: usize,
    pub draws: usize,
}

impl SessionStats {
    fn record(&mut self, outcome: GameOutcome, engine: Player) {
        match outcome {
            GameOutcome::Win(winner) if winner == engine => self.engine_wins += 1,
            GameOutcome::Win(_) => self.human_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.engine_wins + self.human_wins + self.draws
    }
}

/// A game in progress with the engine's selector and value store.
#[derive(Debug)]
pub struct Session {
    game: Game,
    selector: MoveSelector,
    store: ValueStore,
    stats: SessionStats,
}

impl Session {
    pub fn new(selector: MoveSelector, store: ValueStore) -> Self {
        info!(
            difficulty = %selector.difficulty(),
            attribution = ?selector.attribution(),
            entries = store.len(),
            "session started"
        );
        Self {
            game: Game::new(),
            selector,
            store,
            stats: SessionStats::default(),
        }
    }

    /// Play a human move.
    ///
    /// # Errors
    ///
    /// Fails if it is the engine's turn, the cell is occupied, or the game
    /// is over.
    pub fn apply_move(&mut self, action: Action) -> Result<Option<GameOutcome>> {
        let outcome = self.game.play(action, self.human())?;
        debug!(%action, "human move");
        self.finish_if_over(outcome);
        Ok(outcome)
    }

    /// Let the engine choose and play its move.
    ///
    /// The board is snapshotted before the move so a finishing move can be
    /// recorded against the position it was chosen from.
    ///
    /// # Errors
    ///
    /// Fails if the game is over or it is not the engine's turn.
    pub fn request_engine_move(&mut self) -> Result<EngineMove> {
        if self.game.outcome().is_some() {
            return Err(Error::GameOver);
        }
        let engine = self.engine();
        let perspective = self.game.to_move();
        if perspective != engine {
            return Err(Error::WrongTurn {
                expected: perspective,
                got: engine,
            });
        }

        let state = self.game.board().state();
        let choice = self.selector.choose(self.game.board_mut(), perspective)?;
        let outcome = self.game.play(choice.action, engine)?;
        let recorded = self.selector.record(&mut self.store, state, &choice, outcome);
        self.finish_if_over(outcome);

        Ok(EngineMove {
            choice,
            outcome,
            recorded,
        })
    }

    /// Play a human move and, if the game continues, the engine's reply.
    pub fn play_turn(&mut self, action: Action) -> Result<Turn> {
        if let Some(outcome) = self.apply_move(action)? {
            return Ok(Turn {
                human: action,
                engine: None,
                outcome: Some(outcome),
            });
        }

        let reply = self.request_engine_move()?;
        Ok(Turn {
            human: action,
            outcome: reply.outcome,
            engine: Some(reply),
        })
    }

    /// Start a new game, keeping the store and statistics.
    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn board(&self) -> &Board {
        self.game.board()
    }

    pub fn to_move(&self) -> Player {
        self.game.to_move()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.game.outcome()
    }

    pub fn winning_line(&self) -> Option<WinLine> {
        self.game.winning_line()
    }

    pub fn moves(&self) -> &[Move] {
        self.game.moves()
    }

    pub fn human(&self) -> Player {
        self.engine().opponent()
    }

    pub fn engine(&self) -> Player {
        self.selector.engine()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.selector.difficulty()
    }

    pub fn selector_mut(&mut self) -> &mut MoveSelector {
        &mut self.selector
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn store(&self) -> &ValueStore {
        &self.store
    }

    /// End the session and hand back the store for saving.
    pub fn into_store(self) -> ValueStore {
        self.store
    }

    fn finish_if_over(&mut self, outcome: Option<GameOutcome>) {
        if let Some(outcome) = outcome {
            self.stats.record(outcome, self.engine());
            info!(?outcome, moves = self.game.moves().len(), "game over");
        }
    }
}
