//! Ports (trait boundaries) for external dependencies.
//!
//! Traits here are owned by the domain and implemented by adapters or by the
//! evaluation pipeline.

pub mod opponent;
pub mod repository;

pub use opponent::Opponent;
pub use repository::ValueStoreRepository;
