//! Key-value persistence contract.
//!
//! The core only ever stores two opaque blobs: the settings and the score
//! ledger, each under a fixed key. Hosts pick the backing implementation
//! (a directory of files, browser storage, memory for tests).

use std::collections::HashMap;

use crate::error::StoreError;

pub trait KeyValueStore {
    /// `Ok(None)` when nothing has been saved under `key` yet
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn save(&mut self, key: &str, blob: &[u8]) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn insert(&mut self, key: &str, blob: impl Into<Vec<u8>>) {
        self.entries.insert(key.to_owned(), blob.into());
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), blob.to_vec());
        self.writes += 1;
        Ok(())
    }
}
