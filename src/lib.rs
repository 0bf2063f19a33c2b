//! Tic-tac-toe decision engine with a persisted value store
//!
//! This crate provides:
//! - Board model with win and draw detection over the eight lines
//! - Full-width minimax search with an optional depth bound
//! - Difficulty-driven move selection (random, bounded and full search)
//! - A state-action value store updated from game outcomes and persisted
//!   between sessions as MessagePack
//! - Sessions, an evaluation pipeline against scripted opponents, and a CLI

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod search;
pub mod selector;
pub mod session;
pub mod tictactoe;
pub mod types;
pub mod value_store;

pub use error::{Error, Result};
pub use search::{Minimax, WinAttribution, minimax};
pub use selector::{Difficulty, MoveSelector};
pub use session::Session;
pub use value_store::ValueStore;
