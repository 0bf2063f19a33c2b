//! Repository port for value store persistence.
//!
//! The domain owns this trait; adapters decide the storage medium.

use std::{io::ErrorKind, path::Path};

use tracing::{info, warn};

use crate::{Error, Result, value_store::ValueStore};

/// Port for persisting and loading value stores.
///
/// # Examples
///
/// ```no_run
/// use kalaban::ports::ValueStoreRepository;
/// use kalaban::value_store::ValueStore;
/// use std::path::Path;
///
/// fn checkpoint<R: ValueStoreRepository>(
///     repo: &R,
///     store: &ValueStore,
///     path: &Path,
/// ) -> kalaban::Result<()> {
///     repo.save(store, path)
/// }
/// ```
pub trait ValueStoreRepository {
    /// Save a store, replacing whatever was at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization fails.
    fn save(&self, store: &ValueStore, path: &Path) -> Result<()>;

    /// Load a store.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored at `path`, the contents are
    /// corrupted, or they were written by an unsupported format version.
    fn load(&self, path: &Path) -> Result<ValueStore>;

    /// Load a store, starting empty when nothing usable is stored.
    ///
    /// A missing file is the normal first-run case and is logged at info.
    /// Any other failure is logged as a warning. Neither is fatal.
    fn load_or_empty(&self, path: &Path) -> ValueStore {
        match self.load(path) {
            Ok(store) => {
                info!(path = %path.display(), entries = store.len(), "loaded value store");
                store
            }
            Err(Error::Io { ref source, .. }) if source.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no saved value store, starting empty");
                ValueStore::new()
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "could not load value store, starting empty");
                ValueStore::new()
            }
        }
    }
}
