//! Scripted opponents for evaluation runs.

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::Opponent,
    search::{Minimax, WinAttribution},
    tictactoe::{Action, Board, LineAnalyzer, Player},
};

fn random_empty(board: &Board, rng: &mut StdRng) -> Result<Action> {
    board
        .empty_cells()
        .choose(rng)
        .copied()
        .ok_or(Error::NoValidMoves)
}

/// Uniform random policy (baseline)
pub struct RandomOpponent {
    name: String,
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a random opponent with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Opponent for RandomOpponent {
    fn select_move(&mut self, board: &Board, _player: Player) -> Result<Action> {
        random_empty(board, &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Takes an immediate win, otherwise blocks an immediate loss, otherwise
/// plays randomly.
pub struct DefensiveOpponent {
    name: String,
    rng: StdRng,
}

impl DefensiveOpponent {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Opponent for DefensiveOpponent {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action> {
        let wins = LineAnalyzer::winning_moves(board.rows(), player);
        if let Some(action) = wins.choose(&mut self.rng) {
            return Ok(*action);
        }

        let threats = LineAnalyzer::winning_moves(board.rows(), player.opponent());
        if let Some(action) = threats.choose(&mut self.rng) {
            return Ok(*action);
        }

        random_empty(board, &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Full-depth minimax for its own side, scored per branch, with random
/// tie-breaks. Never loses.
pub struct PerfectOpponent {
    name: String,
    rng: StdRng,
}

impl PerfectOpponent {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Opponent for PerfectOpponent {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action> {
        let mut scratch = *board;
        let best = Minimax::new(player)
            .with_attribution(WinAttribution::PerBranch)
            .best_moves(&mut scratch)?;
        best.moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}
