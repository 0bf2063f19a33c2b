//! Winning line analysis for Tic-Tac-Toe

use serde::{Deserialize, Serialize};

use super::{Cell, Player};
use crate::types::{Action, BOARD_DIM};

/// Which family a winning line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    Row(usize),
    Column(usize),
    Diagonal,
    AntiDiagonal,
}

/// One of the eight coordinate triples that win the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine {
    kind: LineKind,
    cells: [Action; 3],
}

impl WinLine {
    const fn new(kind: LineKind, indices: [usize; 3]) -> Self {
        WinLine {
            kind,
            cells: [
                Action::at(indices[0]),
                Action::at(indices[1]),
                Action::at(indices[2]),
            ],
        }
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Coordinates of the three cells, for highlighting.
    pub fn cells(&self) -> [Action; 3] {
        self.cells
    }

    fn mark_on(&self, grid: &[[Cell; BOARD_DIM]; BOARD_DIM]) -> Option<Player> {
        let [a, b, c] = self.cells.map(|action| grid[action.row()][action.col()]);
        if a != Cell::Empty && a == b && b == c {
            a.to_player()
        } else {
            None
        }
    }
}

/// Winning lines in scan order: rows, then columns, then the two diagonals.
pub const WIN_LINES: [WinLine; 8] = [
    WinLine::new(LineKind::Row(0), [0, 1, 2]),
    WinLine::new(LineKind::Row(1), [3, 4, 5]),
    WinLine::new(LineKind::Row(2), [6, 7, 8]),
    WinLine::new(LineKind::Column(0), [0, 3, 6]),
    WinLine::new(LineKind::Column(1), [1, 4, 7]),
    WinLine::new(LineKind::Column(2), [2, 5, 8]),
    WinLine::new(LineKind::Diagonal, [0, 4, 8]),
    WinLine::new(LineKind::AntiDiagonal, [2, 4, 6]),
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// First completed line in scan order, together with the mark that owns it.
    pub fn first_complete(grid: &[[Cell; BOARD_DIM]; BOARD_DIM]) -> Option<(WinLine, Player)> {
        WIN_LINES
            .iter()
            .find_map(|line| line.mark_on(grid).map(|player| (*line, player)))
    }

    /// First line in scan order completed by `player`.
    pub fn first_for(grid: &[[Cell; BOARD_DIM]; BOARD_DIM], player: Player) -> Option<WinLine> {
        WIN_LINES
            .iter()
            .find(|line| line.mark_on(grid) == Some(player))
            .copied()
    }

    /// Empty cells that would immediately complete a line for `player`, row-major.
    pub fn winning_moves(grid: &[[Cell; BOARD_DIM]; BOARD_DIM], player: Player) -> Vec<Action> {
        let target = player.to_cell();
        let mut moves: Vec<Action> = WIN_LINES
            .iter()
            .filter_map(|line| {
                let mut count = 0;
                let mut empty = None;
                for action in line.cells {
                    match grid[action.row()][action.col()] {
                        Cell::Empty if empty.is_none() => empty = Some(action),
                        // More than one empty cell, not a winning move
                        Cell::Empty => return None,
                        c if c == target => count += 1,
                        _ => return None,
                    }
                }
                if count == 2 { empty } else { None }
            })
            .collect();
        moves.sort();
        moves.dedup();
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: [&str; 3]) -> [[Cell; 3]; 3] {
        let mut g = [[Cell::Empty; 3]; 3];
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                g[r][c] = Cell::from_char(ch).unwrap();
            }
        }
        g
    }

    #[test]
    fn test_scan_order() {
        let kinds: Vec<LineKind> = WIN_LINES.iter().map(|l| l.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Row(0),
                LineKind::Row(1),
                LineKind::Row(2),
                LineKind::Column(0),
                LineKind::Column(1),
                LineKind::Column(2),
                LineKind::Diagonal,
                LineKind::AntiDiagonal,
            ]
        );
    }

    #[test]
    fn test_first_complete_prefers_rows_over_columns() {
        // XXX
        // XOO
        // XO.
        let g = grid(["XXX", "XOO", "XO."]);
        let (line, player) = LineAnalyzer::first_complete(&g).unwrap();
        assert_eq!(player, Player::X);
        assert_eq!(line.kind(), LineKind::Row(0));
    }

    #[test]
    fn test_first_complete_prefers_columns_over_diagonals() {
        // X..
        // XX.
        // X.X
        let g = grid(["X..", "XX.", "X.X"]);
        let (line, player) = LineAnalyzer::first_complete(&g).unwrap();
        assert_eq!(player, Player::X);
        assert_eq!(line.kind(), LineKind::Column(0));
        assert_eq!(
            LineAnalyzer::first_for(&g, Player::X).map(|l| l.kind()),
            Some(LineKind::Column(0))
        );
    }

    #[test]
    fn test_first_complete_prefers_diagonal_over_anti_diagonal() {
        // X.X
        // .X.
        // X.X
        let g = grid(["X.X", ".X.", "X.X"]);
        let (line, player) = LineAnalyzer::first_complete(&g).unwrap();
        assert_eq!(player, Player::X);
        assert_eq!(line.kind(), LineKind::Diagonal);

        let g = grid(["OOX", ".X.", "X.."]);
        let (line, player) = LineAnalyzer::first_complete(&g).unwrap();
        assert_eq!(line.kind(), LineKind::AntiDiagonal);
        assert_eq!(player, Player::X);
    }

    #[test]
    fn test_first_for_ignores_other_player() {
        let g = grid(["XXX", "OOO", "..."]);
        assert_eq!(
            LineAnalyzer::first_for(&g, Player::O).map(|l| l.kind()),
            Some(LineKind::Row(1))
        );
        assert_eq!(
            LineAnalyzer::first_for(&g, Player::X).map(|l| l.kind()),
            Some(LineKind::Row(0))
        );
    }

    #[test]
    fn test_line_cells_are_coordinates() {
        let cells = WIN_LINES[7].cells();
        let coords: Vec<(usize, usize)> = cells.iter().map(|a| (a.row(), a.col())).collect();
        assert_eq!(coords, vec![(0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_winning_moves_multiple() {
        // XX.
        // X..
        // ...
        let g = grid(["XX.", "X..", "..."]);
        let moves = LineAnalyzer::winning_moves(&g, Player::X);
        assert_eq!(
            moves,
            vec![Action::new(0, 2).unwrap(), Action::new(2, 0).unwrap()]
        );
        assert!(LineAnalyzer::winning_moves(&g, Player::O).is_empty());
    }

    #[test]
    fn test_no_line_on_empty_grid() {
        let g = [[Cell::Empty; 3]; 3];
        assert!(LineAnalyzer::first_complete(&g).is_none());
    }
}
