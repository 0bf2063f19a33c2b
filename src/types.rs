//! Newtype wrappers for board coordinates and state snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Cell;

/// Number of rows (and columns) on the board.
pub const BOARD_DIM: usize = 3;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = BOARD_DIM * BOARD_DIM;

/// A cell coordinate: the `(row, col)` being filled by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    row: usize,
    col: usize,
}

impl Action {
    /// Create a new action, validating it's within board bounds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidCoordinate`] if either coordinate is >= 3.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < BOARD_DIM && col < BOARD_DIM {
            Ok(Action { row, col })
        } else {
            Err(crate::Error::InvalidCoordinate { row, col })
        }
    }

    /// Create an action from a row-major index (0-8).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if the index is >= 9.
    pub fn from_index(index: usize) -> Result<Self, crate::Error> {
        if index < BOARD_SIZE {
            Ok(Self::at(index))
        } else {
            Err(crate::Error::InvalidPosition { position: index })
        }
    }

    /// Internal constructor for indices already known to be in range.
    pub(crate) const fn at(index: usize) -> Self {
        Action {
            row: index / BOARD_DIM,
            col: index % BOARD_DIM,
        }
    }

    /// All nine coordinates in row-major scan order.
    pub fn all() -> impl Iterator<Item = Action> {
        (0..BOARD_SIZE).map(Self::at)
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Row-major index (0-8).
    pub fn index(&self) -> usize {
        self.row * BOARD_DIM + self.col
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Canonical, hashable snapshot of a board.
///
/// Cells are stored in row-major order. No symmetry reduction is applied:
/// rotations and reflections of a position are distinct states.
///
/// Serializes as a 9-character label such as `"XX.OO...."`.
///
/// # Examples
///
/// ```
/// use kalaban::tictactoe::Board;
/// use kalaban::types::GameState;
///
/// let board = Board::from_string("X.. .O. ...").unwrap();
/// let state = board.state();
/// assert_eq!(state.label(), "X...O....");
/// assert_eq!(GameState::parse("X...O....").unwrap(), state);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct GameState([Cell; BOARD_SIZE]);

impl GameState {
    pub(crate) fn from_cells(cells: [Cell; BOARD_SIZE]) -> Self {
        GameState(cells)
    }

    /// Parse and validate a state label.
    ///
    /// # Errors
    ///
    /// Returns an error if the label does not have exactly 9 cells or contains
    /// a character other than `X`, `O` or `.`.
    pub fn parse(label: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = label.chars().collect();
        if chars.len() != BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_SIZE,
                got: chars.len(),
                context: label.to_string(),
            });
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: label.to_string(),
            })?;
        }
        Ok(GameState(cells))
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.0
    }

    /// The 9-character label for this state.
    pub fn label(&self) -> String {
        self.0.iter().map(|&c| c.to_char()).collect()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<GameState> for String {
    fn from(state: GameState) -> Self {
        state.label()
    }
}

impl TryFrom<String> for GameState {
    type Error = crate::Error;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        GameState::parse(&label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_validation() {
        assert!(Action::new(0, 0).is_ok());
        assert!(Action::new(2, 2).is_ok());
        assert!(Action::new(3, 0).is_err());
        assert!(Action::new(0, 3).is_err());
        assert!(Action::from_index(9).is_err());
    }

    #[test]
    fn test_action_index_mapping() {
        let action = Action::new(1, 2).unwrap();
        assert_eq!(action.index(), 5);
        assert_eq!(Action::from_index(5).unwrap(), action);
    }

    #[test]
    fn test_all_actions_are_row_major() {
        let all: Vec<(usize, usize)> = Action::all().map(|a| (a.row(), a.col())).collect();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], (0, 0));
        assert_eq!(all[1], (0, 1));
        assert_eq!(all[3], (1, 0));
        assert_eq!(all[8], (2, 2));
    }

    #[test]
    fn test_state_label_roundtrip() {
        let state = GameState::parse("XO.X.O...").unwrap();
        assert_eq!(state.label(), "XO.X.O...");
        assert_eq!(state.cells()[0], Cell::X);
        assert_eq!(state.cells()[1], Cell::O);
        assert_eq!(state.cells()[2], Cell::Empty);
    }

    #[test]
    fn test_state_parse_rejects_bad_input() {
        assert!(GameState::parse("XO").is_err());
        assert!(GameState::parse("XOZ......").is_err());
        assert!(GameState::parse("..........").is_err());
    }

    #[test]
    fn test_state_serializes_as_label() {
        let state = GameState::parse("X...O....").unwrap();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "\"X...O....\"");
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
