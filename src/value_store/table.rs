//! State-action value table with a lazy default and an EMA update

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Action, GameState};

/// Value materialized on first read of an unseen pair.
pub const DEFAULT_VALUE: f64 = 0.5;

/// Step size of the moving-average update.
pub const LEARNING_RATE: f64 = 0.1;

/// Key combining a board snapshot and the move played from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateActionKey {
    pub state: GameState,
    pub action: Action,
}

impl StateActionKey {
    pub fn new(state: GameState, action: Action) -> Self {
        Self { state, action }
    }
}

/// Outcome feedback for a recorded move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    Win,
    Draw,
}

impl Reward {
    pub fn value(self) -> f64 {
        match self {
            Reward::Win => 1.0,
            Reward::Draw => 0.5,
        }
    }
}

/// Mapping from (state, action) to a learned value in `[0, 1]`.
///
/// Entries are created on first read and never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueStore {
    values: HashMap<StateActionKey, f64>,
}

impl ValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for a pair, inserting [`DEFAULT_VALUE`] if it is unseen.
    pub fn get(&mut self, state: GameState, action: Action) -> f64 {
        *self
            .values
            .entry(StateActionKey::new(state, action))
            .or_insert(DEFAULT_VALUE)
    }

    /// Read a value without materializing a default.
    pub fn peek(&self, state: &GameState, action: Action) -> Option<f64> {
        self.values
            .get(&StateActionKey::new(*state, action))
            .copied()
    }

    /// Move the value toward `reward`.
    ///
    /// value ← value + α(reward − value), with α = [`LEARNING_RATE`]
    pub fn update(&mut self, state: GameState, action: Action, reward: Reward) {
        let previous = self.get(state, action);
        let updated = previous + LEARNING_RATE * (reward.value() - previous);
        self.values
            .insert(StateActionKey::new(state, action), updated);
        debug!(%state, %action, previous, updated, "value store updated");
    }

    /// Iterate over every stored pair.
    pub fn iter(&self) -> impl Iterator<Item = (&StateActionKey, &f64)> {
        self.values.iter()
    }

    /// Entries ordered by descending value, ties broken by key.
    pub fn ranked(&self, limit: usize) -> Vec<(StateActionKey, f64)> {
        let mut entries: Vec<(StateActionKey, f64)> =
            self.values.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by(|(ka, va), (kb, vb)| vb.total_cmp(va).then_with(|| ka.cmp(kb)));
        entries.truncate(limit);
        entries
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(label: &str) -> GameState {
        GameState::parse(label).unwrap()
    }

    fn at(row: usize, col: usize) -> Action {
        Action::new(row, col).unwrap()
    }

    #[test]
    fn test_unseen_pair_defaults_and_materializes() {
        let mut store = ValueStore::new();
        let s = state("X........");
        assert_eq!(store.peek(&s, at(1, 1)), None);

        assert_eq!(store.get(s, at(1, 1)), 0.5);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(s, at(1, 1)), 0.5);
        assert_eq!(store.len(), 1);
        assert_eq!(store.peek(&s, at(1, 1)), Some(0.5));
    }

    #[test]
    fn test_win_update_from_default() {
        let mut store = ValueStore::new();
        let s = state("XX.OO....");
        store.update(s, at(1, 2), Reward::Win);
        assert_eq!(store.get(s, at(1, 2)), 0.55);
    }

    #[test]
    fn test_draw_update_from_default_is_fixed_point() {
        let mut store = ValueStore::new();
        let s = state("XOXXOOOX.");
        store.update(s, at(2, 2), Reward::Draw);
        assert_eq!(store.get(s, at(2, 2)), 0.5);
    }

    #[test]
    fn test_repeated_wins_approach_one() {
        let mut store = ValueStore::new();
        let s = state("XX.OO....");
        for _ in 0..200 {
            store.update(s, at(1, 2), Reward::Win);
        }
        let value = store.get(s, at(1, 2));
        assert!(value > 0.99 && value <= 1.0, "value was {value}");
    }

    #[test]
    fn test_mixed_rewards_stay_within_unit_interval() {
        let mut store = ValueStore::new();
        let s = state("XO.......");
        for round in 0..500 {
            let reward = if round % 3 == 0 { Reward::Draw } else { Reward::Win };
            store.update(s, at(1, 1), reward);
            let value = store.get(s, at(1, 1));
            assert!((DEFAULT_VALUE..=1.0).contains(&value), "value was {value}");
        }
    }

    #[test]
    fn test_distinct_actions_are_distinct_keys() {
        let mut store = ValueStore::new();
        let s = state(".........");
        store.update(s, at(0, 0), Reward::Win);
        assert_eq!(store.get(s, at(0, 1)), 0.5);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_ranked_orders_by_value() {
        let mut store = ValueStore::new();
        let s = state(".........");
        store.get(s, at(0, 0));
        store.update(s, at(1, 1), Reward::Win);
        store.update(s, at(2, 2), Reward::Win);
        store.update(s, at(2, 2), Reward::Win);

        let ranked = store.ranked(2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0.action, at(2, 2));
        assert_eq!(ranked[1].0.action, at(1, 1));
    }
}
