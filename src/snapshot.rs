//! Flat JSON snapshot of one run's categorized listings.
//!
//! Layout: `{"regional": [...], "online": [...], "other": [...]}` with each
//! event flattened to its fields, pretty-printed so runs diff cleanly.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::classify::Categorized;
use crate::utils::{self, PersistError};

#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the snapshot atomically; an existing file survives a failure.
    pub fn write(&self, categorized: &Categorized) -> Result<(), PersistError> {
        let mut json = serde_json::to_string_pretty(categorized).map_err(PersistError::Encode)?;
        json.push('\n');
        utils::write_atomic(&self.path, &json)?;
        info!(path = %self.path.display(), events = categorized.len(), "saved hackathon data");
        Ok(())
    }

    pub fn read(&self) -> Result<Categorized, PersistError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| PersistError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| PersistError::Decode {
            path: self.path.clone(),
            source,
        })
    }
}
