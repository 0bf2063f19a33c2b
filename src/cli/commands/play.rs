//! Play command - Interactive game against the engine

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::{
    app::App,
    cli::{config::SessionArgs, output::render_board},
    session::Session,
    tictactoe::{Action, GameOutcome},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the engine in the terminal")]
pub struct PlayArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Move(Action),
    NewGame,
    Quit,
}

/// Parse `row col` (0-2 each, space or comma separated), `n`/`new` or `q`/`quit`.
pub fn parse_input(line: &str) -> Result<Input> {
    let line = line.trim().to_ascii_lowercase();
    match line.as_str() {
        "q" | "quit" | "exit" => return Ok(Input::Quit),
        "n" | "new" => return Ok(Input::NewGame),
        _ => {}
    }

    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let [row, col] = parts.as_slice() else {
        bail!("expected `row col`, `new` or `quit`, got '{line}'");
    };
    let row: usize = row.parse().with_context(|| format!("invalid row '{row}'"))?;
    let col: usize = col.parse().with_context(|| format!("invalid column '{col}'"))?;
    Ok(Input::Move(Action::new(row, col)?))
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.session.to_config();
    let app = App::new();
    let mut session = app.open_session(&config);

    println!(
        "You are {} and move first. Difficulty: {}. Enter `row col`, `new` or `quit`.",
        session.human(),
        session.difficulty()
    );
    print!("{}", render_board(session.board(), None));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::NewGame) => {
                session.reset();
                print!("{}", render_board(session.board(), None));
            }
            Ok(Input::Move(action)) => play_move(&mut session, action),
            Err(error) => println!("{error:#}"),
        }
    }

    let stats = session.stats();
    println!(
        "Games: {}  engine wins: {}  your wins: {}  draws: {}",
        stats.games(),
        stats.engine_wins,
        stats.human_wins,
        stats.draws
    );

    app.close_session(session, &config)
        .with_context(|| format!("Failed to save value store to {}", config.store_path.display()))?;
    Ok(())
}

fn play_move(session: &mut Session, action: Action) {
    let turn = match session.play_turn(action) {
        Ok(turn) => turn,
        Err(error) => {
            println!("{error}");
            return;
        }
    };

    if let Some(reply) = &turn.engine {
        println!("Engine plays {}", reply.action());
    }
    let line = session.winning_line();
    print!("{}", render_board(session.board(), line.as_ref()));

    match turn.outcome {
        Some(GameOutcome::Win(winner)) if winner == session.human() => {
            println!("You win! Type `new` to play again.")
        }
        Some(GameOutcome::Win(_)) => println!("Engine wins. Type `new` to play again."),
        Some(GameOutcome::Draw) => println!("Draw. Type `new` to play again."),
        None => {}
    }
}
