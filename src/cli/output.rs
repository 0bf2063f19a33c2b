//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::tictactoe::{Action, Board, WinLine};

/// Create a progress bar for evaluation runs
pub fn create_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    let template = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})";
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a rate as a percentage
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Render a board with coordinates, marking the winning line with brackets.
pub fn render_board(board: &Board, line: Option<&WinLine>) -> String {
    let mut out = String::from("     0   1   2\n");
    for row in 0..3 {
        out.push_str(&format!("  {row} "));
        for col in 0..3 {
            let action = Action::at(row * 3 + col);
            let mark = board.get(action).to_char();
            let highlighted = line.is_some_and(|l| l.cells().contains(&action));
            if highlighted {
                out.push_str(&format!("[{mark}]"));
            } else {
                out.push_str(&format!(" {mark} "));
            }
            if col < 2 {
                out.push('|');
            }
        }
        out.push('\n');
        if row < 2 {
            out.push_str("    ---+---+---\n");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_highlights_line() {
        let board = Board::from_string("XXX OO. ...").unwrap();
        let line = board.winning_line().map(|(line, _)| line);
        let rendered = render_board(&board, line.as_ref());
        assert!(rendered.contains("[X]|[X]|[X]"));
        assert!(rendered.contains(" O | O | . "));
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.25), "25.0%");
    }
}
