//! Directory-backed persistence.
//!
//! [`FileStore`] implements the core's [`KeyValueStore`] contract with one
//! file per key inside a directory. Writes go to a sibling temp file that is
//! then renamed over the target, so an abrupt exit leaves either the old or
//! the new blob on disk, never a torn one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

pub use grid_snake_core as core;

use crate::core::{KeyValueStore, StoreError};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, key: &str, blob: &[u8]) -> Result<(), StoreError> {
        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.tmp"));

        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(blob)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &target)?;

        debug!(path = %target.display(), bytes = blob.len(), "blob saved");
        Ok(())
    }
}
