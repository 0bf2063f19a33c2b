//! Evaluation pipeline
//!
//! Plays the engine against scripted opponents through a regular
//! [`Session`](crate::session::Session) and tallies the results.

pub mod evaluation;
pub mod opponents;

pub use evaluation::{EvaluationConfig, EvaluationPipeline, EvaluationResult};
pub use opponents::{DefensiveOpponent, PerfectOpponent, RandomOpponent};

pub use crate::ports::Opponent;
