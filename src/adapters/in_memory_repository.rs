//! In-memory value store repository for testing.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Result, error::Error, ports::ValueStoreRepository, value_store::SavedValueStore,
    value_store::ValueStore,
};

/// In-memory repository keyed by path.
///
/// Stores the same encoded envelope the file adapter writes, so format errors
/// surface the same way without touching the file system.
///
/// # Examples
///
/// ```
/// use kalaban::adapters::InMemoryRepository;
/// use kalaban::ports::ValueStoreRepository;
/// use kalaban::value_store::ValueStore;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// repo.save(&ValueStore::new(), Path::new("values"))?;
/// let loaded = repo.load(Path::new("values"))?;
/// assert!(loaded.is_empty());
/// # Ok::<(), kalaban::Error>(())
/// ```
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stores currently held.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn clear(&self) {
        self.storage().clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&Self::key(path))
    }

    /// Store raw bytes at `path`, bypassing encoding.
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        self.storage().insert(Self::key(path), bytes);
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ValueStoreRepository for InMemoryRepository {
    fn save(&self, store: &ValueStore, path: &Path) -> Result<()> {
        let bytes = SavedValueStore::new(store).to_bytes()?;
        self.storage().insert(Self::key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<ValueStore> {
        let storage = self.storage();
        let bytes = storage.get(&Self::key(path)).ok_or_else(|| Error::Io {
            operation: format!("load value store from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        SavedValueStore::from_bytes(bytes)?.into_store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        tictactoe::{Action, GameState},
        value_store::Reward,
    };

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let mut store = ValueStore::new();
        store.update(
            GameState::parse(".........").unwrap(),
            Action::new(1, 1).unwrap(),
            Reward::Draw,
        );
        let path = Path::new("values");

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        repo.save(&store, path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));

        assert_eq!(repo.load(path).unwrap(), store);
    }

    #[test]
    fn test_missing_key_loads_empty() {
        let repo = InMemoryRepository::new();
        assert!(repo.load(Path::new("nonexistent")).is_err());
        assert!(repo.load_or_empty(Path::new("nonexistent")).is_empty());
    }

    #[test]
    fn test_corrupt_bytes_load_empty() {
        let repo = InMemoryRepository::new();
        let path = Path::new("corrupt");
        repo.insert_raw(path, vec![0xc1, 0x00, 0x13]);
        assert!(repo.load(path).is_err());
        assert!(repo.load_or_empty(path).is_empty());
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();
        let path = Path::new("shared");

        repo1.save(&ValueStore::new(), path).unwrap();
        assert!(repo2.load(path).is_ok());
        assert_eq!(repo2.count(), 1);

        repo2.clear();
        assert_eq!(repo1.count(), 0);
    }
}
