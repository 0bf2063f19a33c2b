//! Evaluation pipeline: the engine against a scripted opponent

use std::{fs::File, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    ports::Opponent,
    session::Session,
    tictactoe::GameOutcome,
};

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of games to play
    pub num_games: usize,

    /// Random seed for the opponent
    pub seed: Option<u64>,
}

impl EvaluationConfig {
    pub fn new(num_games: usize) -> Self {
        Self {
            num_games,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Result of an evaluation run, counted from the engine's side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub opponent: String,
    pub difficulty: String,
    pub games: usize,
    pub engine_wins: usize,
    pub draws: usize,
    pub engine_losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl EvaluationResult {
    pub fn new(
        opponent: String,
        difficulty: String,
        engine_wins: usize,
        draws: usize,
        engine_losses: usize,
    ) -> Self {
        let games = engine_wins + draws + engine_losses;
        let rate = |count: usize| {
            if games > 0 {
                count as f64 / games as f64
            } else {
                0.0
            }
        };

        Self {
            opponent,
            difficulty,
            games,
            engine_wins,
            draws,
            engine_losses,
            win_rate: rate(engine_wins),
            draw_rate: rate(draws),
            loss_rate: rate(engine_losses),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays repeated games between a session's engine and an opponent that
/// takes the human side.
pub struct EvaluationPipeline {
    config: EvaluationConfig,
}

impl EvaluationPipeline {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Run every configured game.
    pub fn run(
        &mut self,
        session: &mut Session,
        opponent: &mut dyn Opponent,
    ) -> Result<EvaluationResult> {
        self.run_with(session, opponent, |_, _| {})
    }

    /// Run every configured game, calling `on_game` after each one.
    pub fn run_with<F>(
        &mut self,
        session: &mut Session,
        opponent: &mut dyn Opponent,
        mut on_game: F,
    ) -> Result<EvaluationResult>
    where
        F: FnMut(usize, GameOutcome),
    {
        if let Some(seed) = self.config.seed {
            opponent.set_rng_seed(seed)?;
        }

        let engine = session.engine();
        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;

        for game_num in 0..self.config.num_games {
            let outcome = Self::play_game(session, opponent)?;
            match outcome {
                GameOutcome::Win(winner) if winner == engine => wins += 1,
                GameOutcome::Win(_) => losses += 1,
                GameOutcome::Draw => draws += 1,
            }
            debug!(game = game_num, ?outcome, "evaluation game finished");
            on_game(game_num, outcome);
        }

        let result = EvaluationResult::new(
            opponent.name().to_string(),
            session.difficulty().to_string(),
            wins,
            draws,
            losses,
        );
        info!(
            opponent = %result.opponent,
            games = result.games,
            wins,
            draws,
            losses,
            "evaluation complete"
        );
        Ok(result)
    }

    /// Play one game from an empty board, the opponent opening as the human.
    pub fn play_game(session: &mut Session, opponent: &mut dyn Opponent) -> Result<GameOutcome> {
        session.reset();
        let human = session.human();

        loop {
            let action = opponent.select_move(session.board(), human)?;
            let turn = session.play_turn(action)?;
            if let Some(outcome) = turn.outcome {
                return Ok(outcome);
            }
        }
    }
}
