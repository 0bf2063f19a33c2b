//! MessagePack implementation of the value store repository.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    Result, error::Error, ports::ValueStoreRepository, value_store::SavedValueStore,
    value_store::ValueStore,
};

/// MessagePack-based value store repository.
///
/// Stores are wrapped in a versioned [`SavedValueStore`] envelope. Saving
/// writes a sibling temporary file and renames it over the target, so an
/// interrupted save leaves the previous file intact.
///
/// # Examples
///
/// ```no_run
/// use kalaban::adapters::MsgPackRepository;
/// use kalaban::ports::ValueStoreRepository;
/// use kalaban::value_store::ValueStore;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// repo.save(&ValueStore::new(), Path::new("values.msgpack"))?;
/// let loaded = repo.load(Path::new("values.msgpack"))?;
/// # Ok::<(), kalaban::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }

    fn write_staged(store: &ValueStore, staging: &Path) -> Result<()> {
        let file = File::create(staging).map_err(|source| Error::Io {
            operation: format!("create file {staging:?}"),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        rmp_serde::encode::write(&mut writer, &SavedValueStore::new(store)).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize value store to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {staging:?}"),
            source,
        })
    }

    fn staging_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("value_store"));
        name.push(".tmp");
        path.with_file_name(name)
    }
}

impl ValueStoreRepository for MsgPackRepository {
    fn save(&self, store: &ValueStore, path: &Path) -> Result<()> {
        let staging = Self::staging_path(path);
        let result = Self::write_staged(store, &staging).and_then(|()| {
            fs::rename(&staging, path).map_err(|source| Error::Io {
                operation: format!("replace {path:?}"),
                source,
            })
        });

        if let Err(error) = result {
            match fs::remove_file(&staging) {
                Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => {
                    warn!(path = %staging.display(), error = %cleanup, "failed to remove staging file");
                }
                _ => {}
            }
            return Err(error);
        }

        debug!(path = %path.display(), entries = store.len(), "saved value store");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<ValueStore> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedValueStore = rmp_serde::decode::from_read(BufReader::new(file))
            .map_err(|e| Error::SerializationContext {
                operation: "deserialize value store from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        saved.into_store()
    }
}
