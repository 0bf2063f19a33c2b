//! Full-width minimax search
//!
//! The engine explores every legal continuation from a position, scoring
//! terminal positions `+1`, `0` or `-1` from the engine's point of view. An
//! optional depth bound scores unexplored subtrees as `0`, which flattens the
//! engine's preferences and makes it beatable.
//!
//! Every speculative placement goes through [`Board::speculate`], so the board
//! handed to the search is restored before any call returns.
//!
//! ## Win attribution
//!
//! How a completed line is scored depends on [`WinAttribution`]:
//!
//! | Mode | Completed line scores |
//! |------|-----------------------|
//! | `Anchored` (default) | `+1` if the fixed perspective is the engine, else `-1`, whoever completed it |
//! | `PerBranch` | `+1` if the engine's mark completed it, else `-1` |
//!
//! `Anchored` reproduces the historical engine: the win check consults the
//! player whose turn it was when the search started, not the side that moved
//! inside the recursion. Because the engine only searches on its own turn,
//! every completed line looks like a win. `PerBranch` is the turn-correct
//! variant and is what makes unbounded search unbeatable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    tictactoe::{Action, Board, Player},
};

/// Minimax score. Always one of `-1`, `0` or `1`.
pub type Score = i32;

/// How terminal wins found during recursion are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinAttribution {
    /// Score every completed line from the perspective fixed at the top-level call.
    #[default]
    Anchored,
    /// Score a completed line by which mark completed it.
    PerBranch,
}

/// Result of evaluating every engine move in a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMoves {
    /// Best achievable score.
    pub score: Score,
    /// Every move achieving `score`, in row-major order.
    pub moves: Vec<Action>,
    /// Positions visited, including the roots of each candidate.
    pub nodes: u64,
}

/// Minimax evaluator for one engine mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minimax {
    engine: Player,
    perspective: Player,
    max_depth: Option<usize>,
    attribution: WinAttribution,
}

impl Minimax {
    /// Unbounded, anchored search for `engine`, with the engine as perspective.
    pub fn new(engine: Player) -> Self {
        Self {
            engine,
            perspective: engine,
            max_depth: None,
            attribution: WinAttribution::default(),
        }
    }

    /// Bound the recursion depth. `None` searches to terminal positions.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the player whose turn it was when the search was requested.
    ///
    /// Only consulted under [`WinAttribution::Anchored`]. It is never updated
    /// as the recursion alternates sides.
    pub fn with_perspective(mut self, perspective: Player) -> Self {
        self.perspective = perspective;
        self
    }

    pub fn with_attribution(mut self, attribution: WinAttribution) -> Self {
        self.attribution = attribution;
        self
    }

    pub fn engine(&self) -> Player {
        self.engine
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn attribution(&self) -> WinAttribution {
        self.attribution
    }

    /// Score `board` at `depth`, with `maximizing` true when the engine is to move.
    ///
    /// The board is left exactly as it was passed in.
    pub fn score(&self, board: &mut Board, depth: usize, maximizing: bool) -> Score {
        let mut nodes = 0;
        self.search(board, depth, maximizing, &mut nodes)
    }

    /// Evaluate every empty cell for the engine and collect the best ones.
    ///
    /// Each candidate is placed, scored with the opponent to move at depth 0,
    /// and undone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if a line is already complete and
    /// [`Error::NoValidMoves`] if the board is full.
    pub fn best_moves(&self, board: &mut Board) -> Result<BestMoves> {
        if board.winning_line().is_some() {
            return Err(Error::GameOver);
        }
        if board.is_draw() {
            return Err(Error::NoValidMoves);
        }

        let mut best = BestMoves {
            score: Score::MIN,
            moves: Vec::new(),
            nodes: 0,
        };

        for action in Action::all() {
            let Ok(mut placed) = board.speculate(action, self.engine) else {
                continue;
            };
            let score = self.search(&mut placed, 0, false, &mut best.nodes);
            if score > best.score {
                best.score = score;
                best.moves.clear();
                best.moves.push(action);
            } else if score == best.score {
                best.moves.push(action);
            }
        }

        debug!(
            score = best.score,
            nodes = best.nodes,
            candidates = ?best.moves,
            max_depth = ?self.max_depth,
            attribution = ?self.attribution,
            "minimax search complete"
        );
        Ok(best)
    }

    fn search(
        &self,
        board: &mut Board,
        depth: usize,
        maximizing: bool,
        nodes: &mut u64,
    ) -> Score {
        *nodes += 1;

        if let Some((_, winner)) = board.winning_line() {
            return self.win_score(winner);
        }
        if board.is_draw() {
            return 0;
        }
        if self.max_depth.is_some_and(|limit| depth >= limit) {
            return 0;
        }

        let mover = if maximizing {
            self.engine
        } else {
            self.engine.opponent()
        };
        let mut best = if maximizing { Score::MIN } else { Score::MAX };

        for action in Action::all() {
            let Ok(mut placed) = board.speculate(action, mover) else {
                continue;
            };
            let score = self.search(&mut placed, depth + 1, !maximizing, nodes);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }

    fn win_score(&self, winner: Player) -> Score {
        let engine_credited = match self.attribution {
            WinAttribution::Anchored => self.perspective == self.engine,
            WinAttribution::PerBranch => winner == self.engine,
        };
        if engine_credited { 1 } else { -1 }
    }
}

/// Score `board` for the engine playing `O`, using anchored attribution.
///
/// Convenience form of [`Minimax::score`] with the historical defaults.
pub fn minimax(
    board: &mut Board,
    depth: usize,
    maximizing: bool,
    max_depth: Option<usize>,
) -> Score {
    Minimax::new(Player::O)
        .with_max_depth(max_depth)
        .score(board, depth, maximizing)
}
