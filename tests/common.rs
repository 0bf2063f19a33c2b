//! Common test utilities: exhaustive play against the engine's tie sets.

#![allow(dead_code)]

use std::collections::HashMap;

use kalaban::{
    search::{Minimax, WinAttribution},
    tictactoe::{Action, Board, Player},
};

/// The engine's search settings, played as `O` against a human `X`.
#[derive(Debug, Clone, Copy)]
pub struct EngineModel {
    pub max_depth: Option<usize>,
    pub attribution: WinAttribution,
}

impl EngineModel {
    pub fn hard(attribution: WinAttribution) -> Self {
        Self {
            max_depth: None,
            attribution,
        }
    }

    pub fn medium(attribution: WinAttribution) -> Self {
        Self {
            max_depth: Some(2),
            attribution,
        }
    }

    /// Every move the engine might pick on `board`.
    pub fn candidates(&self, board: &Board) -> Vec<Action> {
        let mut scratch = *board;
        Minimax::new(Player::O)
            .with_max_depth(self.max_depth)
            .with_attribution(self.attribution)
            .best_moves(&mut scratch)
            .expect("Failed to search non-terminal board")
            .moves
    }
}

pub fn board(s: &str) -> Board {
    Board::from_string(s).expect("Failed to parse board")
}

pub fn at(row: usize, col: usize) -> Action {
    Action::new(row, col).expect("Failed to create action")
}

fn place(board: &Board, action: Action, player: Player) -> Board {
    let mut next = *board;
    next.place(action, player).expect("Failed to place mark");
    next
}

/// Whether some human line, combined with some choice of engine tie-breaks,
/// ends in a human win. `board` has the human to move.
pub fn human_can_win(board: &Board, engine: &EngineModel) -> bool {
    can_win(board, engine, &mut HashMap::new())
}

fn can_win(board: &Board, engine: &EngineModel, memo: &mut HashMap<Board, bool>) -> bool {
    if let Some(&known) = memo.get(board) {
        return known;
    }

    let mut result = false;
    'human: for action in board.empty_cells() {
        let after_human = place(board, action, Player::X);
        if after_human.is_win(Player::X) {
            result = true;
            break;
        }
        if after_human.is_draw() {
            continue;
        }
        for reply in engine.candidates(&after_human) {
            let after_engine = place(&after_human, reply, Player::O);
            if after_engine.is_terminal() {
                continue;
            }
            if can_win(&after_engine, engine, memo) {
                result = true;
                break 'human;
            }
        }
    }

    memo.insert(*board, result);
    result
}

/// Whether the human has a strategy that wins whichever tie-break the engine
/// makes. `board` has the human to move.
pub fn human_forces_win(board: &Board, engine: &EngineModel) -> bool {
    forces_win(board, engine, &mut HashMap::new())
}

fn forces_win(board: &Board, engine: &EngineModel, memo: &mut HashMap<Board, bool>) -> bool {
    if let Some(&known) = memo.get(board) {
        return known;
    }

    let result = board.empty_cells().into_iter().any(|action| {
        let after_human = place(board, action, Player::X);
        if after_human.is_win(Player::X) {
            return true;
        }
        if after_human.is_draw() {
            return false;
        }
        engine.candidates(&after_human).into_iter().all(|reply| {
            let after_engine = place(&after_human, reply, Player::O);
            !after_engine.is_terminal() && forces_win(&after_engine, engine, memo)
        })
    });

    memo.insert(*board, result);
    result
}
