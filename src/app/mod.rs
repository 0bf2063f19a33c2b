//! Application layer with dependency injection container.
//!
//! ```text
//! App ──owns──▶ Arc<dyn ValueStoreRepository>   (MsgPackRepository, InMemoryRepository)
//!  │
//!  └─open_session──▶ Session { Game, MoveSelector, ValueStore }
//!                          │
//!  ◀─close_session─────────┘  store saved back through the repository
//! ```
//!
//! # Usage
//!
//! ```
//! use kalaban::app::{App, SessionConfig};
//! use kalaban::adapters::InMemoryRepository;
//! use kalaban::selector::Difficulty;
//! use kalaban::tictactoe::Action;
//!
//! let app = App::for_testing()
//!     .with_repository(InMemoryRepository::new())
//!     .build();
//! let config = SessionConfig::new(Difficulty::Medium).with_seed(42);
//!
//! let mut session = app.open_session(&config);
//! session.play_turn(Action::new(1, 1)?)?;
//! app.close_session(session, &config)?;
//! # Ok::<(), kalaban::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::{DEFAULT_STORE_PATH, SessionConfig};
pub use container::{App, AppBuilder};
