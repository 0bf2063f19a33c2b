//! Versioned on-disk envelope for the value store.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, value_store::ValueStore};

/// A value store as written to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedValueStore {
    pub version: u32,
    store: ValueStore,
}

impl SavedValueStore {
    pub const VERSION: u32 = 1;

    pub fn new(store: &ValueStore) -> Self {
        Self {
            version: Self::VERSION,
            store: store.clone(),
        }
    }

    /// Unwrap the store, rejecting envelopes written by another format version.
    pub fn into_store(self) -> Result<ValueStore> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(self.store)
    }

    /// Encode to MessagePack bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: "serialize value store to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    /// Decode from MessagePack bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize value store from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}
