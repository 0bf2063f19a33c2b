//! Persisted state-action value store
//!
//! Records outcome feedback for moves the engine chose by search. Each
//! (state, action) pair holds a value in `[0, 1]` that starts at `0.5` and is
//! moved toward the observed reward by an exponential moving average:
//!
//! ```text
//! value ← value + 0.1 · (reward − value)      reward: win = 1.0, draw = 0.5
//! ```
//!
//! The store is loaded when a session opens and saved when it closes (see
//! [`crate::ports::ValueStoreRepository`]). It is never consulted during
//! move selection: values accumulate but do not influence play.
//!
//! ## Usage Example
//!
//! ```
//! use kalaban::tictactoe::{Action, Board};
//! use kalaban::value_store::{Reward, ValueStore};
//!
//! let mut store = ValueStore::new();
//! let state = Board::from_string("XX. OO. ...")?.state();
//! let action = Action::new(1, 2)?;
//!
//! assert_eq!(store.get(state, action), 0.5);
//! store.update(state, action, Reward::Win);
//! assert_eq!(store.get(state, action), 0.55);
//! # Ok::<(), kalaban::Error>(())
//! ```

pub mod serialization;
pub mod table;

pub use serialization::SavedValueStore;
pub use table::{DEFAULT_VALUE, LEARNING_RATE, Reward, StateActionKey, ValueStore};
