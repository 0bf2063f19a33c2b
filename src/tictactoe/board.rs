//! Board representation, terminal queries and scoped placement

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

use super::lines::{LineAnalyzer, WinLine};
use crate::types::{Action, BOARD_DIM, BOARD_SIZE, GameState};

/// A cell on the Tic-Tac-Toe board
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game.
///
/// `X` is the human and always opens; `O` is the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A 3x3 grid of cells.
///
/// The board does not enforce turn order; callers are trusted to pass legal
/// positions. Mutation is cell-by-cell through [`Board::place`] and
/// [`Board::clear`], or scoped through [`Board::speculate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_DIM]; BOARD_DIM],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace is ignored; the remaining 9 characters are read row-major
    /// using `X`, `O` and `.` (or `_`) for empty cells.
    ///
    /// # Errors
    ///
    /// Returns error if there are not exactly 9 non-whitespace characters or
    /// any character is not a valid cell.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_SIZE,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut board = Board::new();
        for (i, &c) in chars.iter().enumerate() {
            let cell = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
            board.cells[i / BOARD_DIM][i % BOARD_DIM] = cell;
        }
        Ok(board)
    }

    /// Rebuild a board from a state snapshot.
    pub fn from_state(state: &GameState) -> Self {
        let mut board = Board::new();
        for (i, &cell) in state.cells().iter().enumerate() {
            board.cells[i / BOARD_DIM][i % BOARD_DIM] = cell;
        }
        board
    }

    /// Get the cell at a coordinate
    pub fn get(&self, action: Action) -> Cell {
        self.cells[action.row()][action.col()]
    }

    /// Check if a coordinate is empty
    pub fn is_empty(&self, action: Action) -> bool {
        self.get(action) == Cell::Empty
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> &[[Cell; BOARD_DIM]; BOARD_DIM] {
        &self.cells
    }

    /// All empty coordinates in row-major scan order.
    pub fn empty_cells(&self) -> Vec<Action> {
        Action::all().filter(|&a| self.is_empty(a)).collect()
    }

    /// Number of cells holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells.iter().flatten().filter(|&&c| c == target).count()
    }

    /// Place `player`'s mark on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CellOccupied`] if the cell already holds a mark.
    pub fn place(&mut self, action: Action, player: Player) -> Result<(), crate::Error> {
        if !self.is_empty(action) {
            return Err(crate::Error::CellOccupied { action });
        }
        self.cells[action.row()][action.col()] = player.to_cell();
        Ok(())
    }

    /// Reset a single cell to empty.
    pub fn clear(&mut self, action: Action) {
        self.cells[action.row()][action.col()] = Cell::Empty;
    }

    /// Place a mark for the lifetime of the returned guard.
    ///
    /// The cell is cleared again when the guard is dropped, on every exit path.
    /// The guard dereferences to the board so evaluation can continue through it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CellOccupied`] if the cell already holds a mark.
    pub fn speculate(
        &mut self,
        action: Action,
        player: Player,
    ) -> Result<Placement<'_>, crate::Error> {
        self.place(action, player)?;
        Ok(Placement {
            board: self,
            action,
        })
    }

    /// Empty every cell.
    pub fn reset(&mut self) {
        *self = Board::new();
    }

    /// First completed line in scan order (rows, columns, diagonals) and its owner.
    pub fn winning_line(&self) -> Option<(WinLine, Player)> {
        LineAnalyzer::first_complete(&self.cells)
    }

    /// First line in scan order completed by `player`.
    pub fn winning_line_for(&self, player: Player) -> Option<WinLine> {
        LineAnalyzer::first_for(&self.cells, player)
    }

    /// Check if a player has completed any line
    pub fn is_win(&self, player: Player) -> bool {
        self.winning_line_for(player).is_some()
    }

    /// The owner of the first completed line, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winning_line().map(|(_, player)| player)
    }

    /// True when no cell is empty. Callers check for a win first.
    pub fn is_draw(&self) -> bool {
        !self.cells.iter().flatten().any(|&c| c == Cell::Empty)
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winning_line().is_some() || self.is_draw()
    }

    /// Canonical snapshot for use as a value store key.
    pub fn state(&self) -> GameState {
        let mut cells = [Cell::Empty; BOARD_SIZE];
        for action in Action::all() {
            cells[action.index()] = self.get(action);
        }
        GameState::from_cells(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if r + 1 < BOARD_DIM {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// A mark placed for the lifetime of the guard.
///
/// Dropping the guard clears the cell, restoring the board to its state
/// before [`Board::speculate`] was called.
#[derive(Debug)]
pub struct Placement<'a> {
    board: &'a mut Board,
    action: Action,
}

impl Placement<'_> {
    /// The coordinate that was filled.
    pub fn action(&self) -> Action {
        self.action
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.clear(self.action);
    }
}
