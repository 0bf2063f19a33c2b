//! Dependency injection container for the engine.
//!
//! The container owns the value store repository and wires it into sessions.

use std::{path::Path, sync::Arc};

use tracing::info;

use super::config::SessionConfig;
use crate::{
    Result,
    adapters::MsgPackRepository,
    ports::ValueStoreRepository,
    selector::MoveSelector,
    session::Session,
    value_store::ValueStore,
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use kalaban::app::{App, SessionConfig};
/// use kalaban::selector::Difficulty;
///
/// let app = App::new();
/// let config = SessionConfig::new(Difficulty::Hard);
/// let session = app.open_session(&config);
/// // ... play ...
/// app.close_session(session, &config)?;
/// # Ok::<(), kalaban::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use kalaban::app::App;
/// use kalaban::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    store_repository: Arc<dyn ValueStoreRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create an app backed by [`MsgPackRepository`] with no default seed.
    pub fn new() -> Self {
        Self {
            store_repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing an app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn store_repository(&self) -> Arc<dyn ValueStoreRepository + Send + Sync> {
        Arc::clone(&self.store_repository)
    }

    /// Build a selector from `config`, applying the app's default seed when
    /// the config has none.
    pub fn create_selector(&self, config: &SessionConfig) -> MoveSelector {
        let selector = MoveSelector::new(config.difficulty)
            .with_attribution(config.attribution)
            .with_record_bounded_search(config.record_bounded_search);

        match config.seed.or(self.default_seed) {
            Some(seed) => selector.with_seed(seed),
            None => selector,
        }
    }

    /// Load the value store, starting empty if it is missing or unreadable.
    pub fn load_store(&self, path: &Path) -> ValueStore {
        self.store_repository.load_or_empty(path)
    }

    pub fn save_store(&self, store: &ValueStore, path: &Path) -> Result<()> {
        self.store_repository.save(store, path)?;
        info!(path = %path.display(), entries = store.len(), "saved value store");
        Ok(())
    }

    /// Open a session with the store found at the configured path.
    ///
    /// Never fails: a missing or unreadable store starts the session empty.
    pub fn open_session(&self, config: &SessionConfig) -> Session {
        let store = self.load_store(&config.store_path);
        Session::new(self.create_selector(config), store)
    }

    /// Close a session, writing its store back to the configured path.
    pub fn close_session(&self, session: Session, config: &SessionConfig) -> Result<()> {
        self.save_store(&session.into_store(), &config.store_path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom dependencies.
pub struct AppBuilder {
    store_repository: Option<Arc<dyn ValueStoreRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            store_repository: None,
            default_seed: None,
        }
    }

    /// Set a custom value store repository.
    pub fn with_repository<R: ValueStoreRepository + Send + Sync + 'static>(
        mut self,
        repo: R,
    ) -> Self {
        self.store_repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for every session this app opens.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app. Without a repository, `MsgPackRepository` is used.
    pub fn build(self) -> App {
        App {
            store_repository: self
                .store_repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::InMemoryRepository,
        search::WinAttribution,
        selector::Difficulty,
        tictactoe::{Action, Board, Player},
    };

    fn at(row: usize, col: usize) -> Action {
        Action::new(row, col).unwrap()
    }

    #[test]
    fn test_open_session_with_missing_store_starts_empty() {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .build();
        let session = app.open_session(&SessionConfig::new(Difficulty::Hard));
        assert!(session.store().is_empty());
        assert_eq!(session.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_close_session_persists_store() {
        let repo = InMemoryRepository::new();
        let app = App::for_testing()
            .with_repository(repo.clone())
            .with_default_seed(42)
            .build();
        let config = SessionConfig::new(Difficulty::Hard)
            .with_store_path("values")
            .with_attribution(WinAttribution::PerBranch);

        let mut session = app.open_session(&config);
        session.play_turn(at(0, 0)).unwrap();
        session.play_turn(at(0, 1)).unwrap();
        session.play_turn(at(1, 0)).unwrap();
        assert_eq!(session.store().len(), 1);

        app.close_session(session, &config).unwrap();
        assert!(repo.contains(Path::new("values")));

        let reopened = app.open_session(&config);
        assert_eq!(reopened.store().len(), 1);
    }

    #[test]
    fn test_config_seed_overrides_app_default() {
        let app = App::for_testing().with_default_seed(1).build();
        let config = SessionConfig::new(Difficulty::Easy).with_seed(7);

        let mut from_app = app.create_selector(&config);
        let mut direct = MoveSelector::new(Difficulty::Easy).with_seed(7);
        let mut board = Board::new();
        for _ in 0..5 {
            assert_eq!(
                from_app.choose(&mut board, Player::O).unwrap(),
                direct.choose(&mut board, Player::O).unwrap()
            );
        }
    }
}
