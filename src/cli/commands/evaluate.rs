//! Evaluate command - Play the engine against a scripted opponent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::SessionArgs,
        output::{create_progress, format_rate, print_kv, print_section},
    },
    pipeline::{
        DefensiveOpponent, EvaluationConfig, EvaluationPipeline, Opponent, PerfectOpponent,
        RandomOpponent,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate the engine against a scripted opponent")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Opponent playing the human side: random, defensive or perfect
    #[arg(long, short = 'o', default_value = "perfect")]
    pub opponent: String,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Seed for the opponent
    #[arg(long)]
    pub opponent_seed: Option<u64>,

    /// Write the updated value store back after the run
    #[arg(long)]
    pub save_store: bool,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Build an opponent from its command-line name.
pub fn create_opponent(name: &str) -> Result<Box<dyn Opponent>> {
    let opponent: Box<dyn Opponent> = match name.to_lowercase().as_str() {
        "random" => Box::new(RandomOpponent::new("Random".to_string())),
        "defensive" => Box::new(DefensiveOpponent::new("Defensive".to_string())),
        "perfect" | "optimal" => Box::new(PerfectOpponent::new("Perfect".to_string())),
        other => {
            return Err(anyhow::anyhow!(
                "Unknown opponent type: '{other}'. Supported: random, defensive, perfect"
            ));
        }
    };
    Ok(opponent)
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let config = args.session.to_config();
    let mut opponent = create_opponent(&args.opponent)?;

    let app = App::new();
    let mut session = app.open_session(&config);

    print_section("Evaluation Configuration");
    print_kv("Difficulty", &session.difficulty().to_string());
    print_kv("Attribution", &format!("{:?}", config.attribution));
    print_kv("Opponent", opponent.name());
    print_kv("Games", &args.games.to_string());

    let mut eval_config = EvaluationConfig::new(args.games);
    if let Some(seed) = args.opponent_seed {
        eval_config = eval_config.with_seed(seed);
    }
    let mut pipeline = EvaluationPipeline::new(eval_config);

    let pb = create_progress(args.games as u64);
    let result = pipeline
        .run_with(&mut session, opponent.as_mut(), |_, outcome| {
            pb.set_message(format!("{outcome:?}"));
            pb.inc(1);
        })
        .context("Evaluation failed")?;
    pb.finish_and_clear();

    print_section("Results");
    print_kv(
        "Engine wins",
        &format!("{} ({})", result.engine_wins, format_rate(result.win_rate)),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", result.draws, format_rate(result.draw_rate)),
    );
    print_kv(
        "Engine losses",
        &format!("{} ({})", result.engine_losses, format_rate(result.loss_rate)),
    );

    if let Some(path) = &args.export {
        result
            .save(path)
            .with_context(|| format!("Failed to export results to {}", path.display()))?;
        println!("\nResults exported to {}", path.display());
    }

    if args.save_store {
        app.close_session(session, &config).with_context(|| {
            format!("Failed to save value store to {}", config.store_path.display())
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_opponent() {
        assert_eq!(create_opponent("Random").unwrap().name(), "Random");
        assert_eq!(create_opponent("defensive").unwrap().name(), "Defensive");
        assert_eq!(create_opponent("optimal").unwrap().name(), "Perfect");
        assert!(create_opponent("grandmaster").is_err());
    }
}
