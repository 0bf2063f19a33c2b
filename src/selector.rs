//! Difficulty-driven move selection for the engine.
//!
//! | Difficulty | Policy |
//! |------------|--------|
//! | Easy | uniform random empty cell |
//! | Medium | minimax bounded at depth [`MEDIUM_DEPTH`], random tie-break |
//! | Hard | unbounded minimax, random tie-break |
//!
//! After a searched move is committed, the selector reports the outcome to the
//! value store: a win records `1.0`, a draw `0.5`. By default only unbounded
//! searches are recorded; [`MoveSelector::with_record_bounded_search`] also
//! records Medium moves. Random moves are never recorded.

use std::{fmt, str::FromStr};

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    Error, Result,
    search::{Minimax, Score, WinAttribution},
    tictactoe::{Action, Board, GameOutcome, GameState, Player},
    value_store::{Reward, ValueStore},
};

/// Search depth used by [`Difficulty::Medium`].
pub const MEDIUM_DEPTH: usize = 2;

/// Engine playing strength, fixed for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Search bound, or `None` for an unbounded search. Easy does not search.
    pub fn max_depth(self) -> Option<usize> {
        match self {
            Difficulty::Medium => Some(MEDIUM_DEPTH),
            Difficulty::Easy | Difficulty::Hard => None,
        }
    }

    /// Parse `input`, falling back to Medium with a warning when it is not a
    /// recognised difficulty.
    pub fn parse_or_default(input: &str) -> Self {
        input.parse().unwrap_or_else(|error: Error| {
            warn!(%error, "falling back to medium difficulty");
            Difficulty::default()
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::ParseDifficulty {
                input: s.to_string(),
                expected: "easy, medium or hard".to_string(),
            }),
        }
    }
}

/// How a move was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceSource {
    Random,
    Search {
        score: Score,
        candidates: Vec<Action>,
        max_depth: Option<usize>,
    },
}

/// A move chosen by the selector, not yet committed to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub action: Action,
    pub source: ChoiceSource,
}

/// Picks engine moves according to a [`Difficulty`].
#[derive(Debug, Clone)]
pub struct MoveSelector {
    difficulty: Difficulty,
    engine: Player,
    attribution: WinAttribution,
    record_bounded_search: bool,
    rng: StdRng,
}

impl MoveSelector {
    /// Selector for the engine playing `O`, seeded from the thread RNG.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            engine: Player::O,
            attribution: WinAttribution::default(),
            record_bounded_search: false,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_engine(mut self, engine: Player) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_attribution(mut self, attribution: WinAttribution) -> Self {
        self.attribution = attribution;
        self
    }

    pub fn with_record_bounded_search(mut self, enabled: bool) -> Self {
        self.record_bounded_search = enabled;
        self
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn engine(&self) -> Player {
        self.engine
    }

    pub fn attribution(&self) -> WinAttribution {
        self.attribution
    }

    /// Choose a move for the engine.
    ///
    /// `perspective` is the player whose turn it is in the calling game. The
    /// board is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if a line is complete and
    /// [`Error::NoValidMoves`] if the board is full.
    pub fn choose(&mut self, board: &mut Board, perspective: Player) -> Result<Choice> {
        if board.winning_line().is_some() {
            return Err(Error::GameOver);
        }

        if self.difficulty == Difficulty::Easy {
            let action = *board
                .empty_cells()
                .choose(&mut self.rng)
                .ok_or(Error::NoValidMoves)?;
            debug!(%action, "random move");
            return Ok(Choice {
                action,
                source: ChoiceSource::Random,
            });
        }

        let max_depth = self.difficulty.max_depth();
        let best = Minimax::new(self.engine)
            .with_perspective(perspective)
            .with_max_depth(max_depth)
            .with_attribution(self.attribution)
            .best_moves(board)?;

        let action = *best.moves.choose(&mut self.rng).ok_or(Error::NoValidMoves)?;
        debug!(
            %action,
            difficulty = %self.difficulty,
            score = best.score,
            ties = best.moves.len(),
            "search move"
        );
        Ok(Choice {
            action,
            source: ChoiceSource::Search {
                score: best.score,
                candidates: best.moves,
                max_depth,
            },
        })
    }

    /// Report the outcome of a committed choice to the value store.
    ///
    /// `state` is the board as it was before the move. Returns whether the
    /// store was updated.
    pub fn record(
        &self,
        store: &mut ValueStore,
        state: GameState,
        choice: &Choice,
        outcome: Option<GameOutcome>,
    ) -> bool {
        let recordable = match &choice.source {
            ChoiceSource::Random => false,
            ChoiceSource::Search { max_depth, .. } => {
                max_depth.is_none() || self.record_bounded_search
            }
        };
        if !recordable {
            return false;
        }

        let reward = match outcome {
            Some(GameOutcome::Win(winner)) if winner == self.engine => Reward::Win,
            Some(GameOutcome::Draw) => Reward::Draw,
            _ => return false,
        };
        store.update(state, choice.action, reward);
        true
    }
}
