//! Shared arguments for commands that open a session

use std::path::PathBuf;

use clap::Args;

use crate::{
    app::{DEFAULT_STORE_PATH, SessionConfig},
    search::WinAttribution,
    selector::Difficulty,
};

/// Session options common to `play` and `evaluate`
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Engine difficulty: easy, medium or hard (invalid values fall back to medium)
    #[arg(long, short = 'd', default_value = "medium")]
    pub difficulty: String,

    /// Value store file
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    pub store: PathBuf,

    /// Random seed for tie-breaks
    #[arg(long)]
    pub seed: Option<u64>,

    /// Score wins by the side that completed the line
    #[arg(long)]
    pub per_branch: bool,

    /// Also record outcomes of depth-bounded (medium) searches
    #[arg(long)]
    pub record_bounded_search: bool,
}

impl SessionArgs {
    pub fn to_config(&self) -> SessionConfig {
        let attribution = if self.per_branch {
            WinAttribution::PerBranch
        } else {
            WinAttribution::Anchored
        };

        let mut config = SessionConfig::new(Difficulty::parse_or_default(&self.difficulty))
            .with_store_path(self.store.clone())
            .with_attribution(attribution)
            .with_record_bounded_search(self.record_bounded_search);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        session: SessionArgs,
    }

    #[test]
    fn test_defaults() {
        let harness = Harness::parse_from(["kalaban"]);
        let config = harness.session.to_config();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.attribution, WinAttribution::Anchored);
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_difficulty_falls_back() {
        let harness = Harness::parse_from(["kalaban", "--difficulty", "nightmare"]);
        assert_eq!(harness.session.to_config().difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_flags() {
        let harness = Harness::parse_from([
            "kalaban",
            "-d",
            "HARD",
            "--per-branch",
            "--seed",
            "9",
            "--store",
            "values.msgpack",
        ]);
        let config = harness.session.to_config();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.attribution, WinAttribution::PerBranch);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.store_path, PathBuf::from("values.msgpack"));
    }
}
