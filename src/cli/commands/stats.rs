//! Stats command - Summarise a saved value store

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    app::{App, DEFAULT_STORE_PATH},
    cli::output::{print_kv, print_section},
    tictactoe::Board,
    value_store::{DEFAULT_VALUE, ValueStore},
};

#[derive(Parser, Debug)]
#[command(about = "Show the contents of a saved value store")]
pub struct StatsArgs {
    /// Value store file
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    pub store: PathBuf,

    /// Number of highest-valued entries to list
    #[arg(long, short = 'n', default_value_t = 10)]
    pub top: usize,
}

/// Counts shown in the summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreSummary {
    pub entries: usize,
    pub states: usize,
    pub updated: usize,
    pub mean: f64,
}

impl StoreSummary {
    pub fn of(store: &ValueStore) -> Self {
        let mut states: Vec<_> = store.iter().map(|(key, _)| key.state).collect();
        states.sort();
        states.dedup();

        let entries = store.len();
        let total: f64 = store.iter().map(|(_, value)| *value).sum();
        Self {
            entries,
            states: states.len(),
            updated: store.iter().filter(|(_, v)| **v != DEFAULT_VALUE).count(),
            mean: if entries > 0 {
                total / entries as f64
            } else {
                0.0
            },
        }
    }
}

pub fn execute(args: StatsArgs) -> Result<()> {
    let app = App::new();
    let store = app.load_store(&args.store);
    let summary = StoreSummary::of(&store);

    print_section("Value Store");
    print_kv("File", &args.store.display().to_string());
    print_kv("Entries", &summary.entries.to_string());
    print_kv("Distinct states", &summary.states.to_string());
    print_kv("Updated entries", &summary.updated.to_string());
    print_kv("Mean value", &format!("{:.4}", summary.mean));

    let ranked = store.ranked(args.top);
    if ranked.is_empty() {
        return Ok(());
    }

    print_section(&format!("Top {} entries", ranked.len()));
    for (key, value) in ranked {
        let board = Board::from_state(&key.state);
        println!("\n  value {value:.4}  move {}", key.action);
        for row in board.rows() {
            let cells: String = row.iter().map(|cell| cell.to_char()).collect();
            println!("    {cells}");
        }
    }
    Ok(())
}
