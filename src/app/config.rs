//! Configuration types for session creation.

use std::path::PathBuf;

use crate::{search::WinAttribution, selector::Difficulty};

/// Store location used when none is configured, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "tic_tac_toe_learning_data.msgpack";

/// Configuration for opening a session.
///
/// # Examples
///
/// ```
/// use kalaban::app::SessionConfig;
/// use kalaban::search::WinAttribution;
/// use kalaban::selector::Difficulty;
///
/// let config = SessionConfig::new(Difficulty::Hard)
///     .with_seed(42)
///     .with_attribution(WinAttribution::PerBranch)
///     .with_store_path("values.msgpack");
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    /// Where the value store is loaded from and saved to
    pub store_path: PathBuf,
    /// Random seed for tie-breaks
    pub seed: Option<u64>,
    pub attribution: WinAttribution,
    /// Record outcomes after depth-bounded searches as well
    pub record_bounded_search: bool,
}

impl SessionConfig {
    /// Create a configuration with the given difficulty.
    ///
    /// Defaults:
    /// - Store path: [`DEFAULT_STORE_PATH`]
    /// - Seed: None (non-deterministic)
    /// - Attribution: [`WinAttribution::Anchored`]
    /// - Bounded-search recording: off
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            seed: None,
            attribution: WinAttribution::default(),
            record_bounded_search: false,
        }
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Set the random seed for deterministic tie-breaks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
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
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}
