//! JSON file store.
//!
//! State is written to a temporary file and renamed over the target, so a
//! crash mid-save leaves the previous file intact. Before each rename the
//! current file is copied to `<path>.backup`, but only while it still parses.
//! `load` falls back to the backup when the main file cannot be parsed and
//! copies it back over the main file.
//!
//! ```json
//! {
//!   "version": 1,
//!   "records": [
//!     {
//!       "id": "5f0c...",
//!       "original_url": "https://example.com/a",
//!       "shortcode": "aZ09xy",
//!       "created_at": "2026-01-01T00:00:00Z",
//!       "expires_at": "2026-01-01T00:30:00Z",
//!       "validity_minutes": 30
//!     }
//!   ],
//!   "clicks": { "aZ09xy": [] }
//! }
//! ```

use async_trait::async_trait;
use burrow_core::{ClickEvent, ShortCode, Snapshot, Store, StoreError, UrlRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// State file format version.
const STATE_FILE_VERSION: u32 = 1;

#[derive(Serialize)]
struct StateFileRef<'a> {
    version: u32,
    records: &'a [UrlRecord],
    clicks: &'a HashMap<ShortCode, Vec<ClickEvent>>,
}

#[derive(Deserialize)]
struct StateFile {
    version: u32,
    records: Vec<UrlRecord>,
    #[serde(default)]
    clicks: HashMap<ShortCode, Vec<ClickEvent>>,
}

/// File-backed [`Store`] persisting the whole snapshot as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at `path`, creating parent directories if needed.
    ///
    /// The file itself is not created until the first save.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    StoreError::Io(format!(
                        "failed to create state directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }

    fn backup_path(&self) -> PathBuf {
        self.sibling(".backup")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    /// Reads and parses one state file. A missing file is `Ok(None)`.
    async fn read_state(path: &Path) -> Result<Option<Snapshot>, StoreError> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "failed to read state file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let state: StateFile = serde_json::from_str(&content).map_err(|e| {
            StoreError::Serialization(format!(
                "failed to parse state file {}: {}",
                path.display(),
                e
            ))
        })?;

        if state.version != STATE_FILE_VERSION {
            tracing::warn!(
                path = %path.display(),
                expected = STATE_FILE_VERSION,
                found = state.version,
                "state file version mismatch, loading anyway"
            );
        }

        Ok(Some(Snapshot {
            records: state.records,
            clicks: state.clicks,
        }))
    }

    async fn write_temp(&self, json: &[u8]) -> Result<PathBuf, StoreError> {
        let temp_path = self.temp_path();
        let io_err = |action: &str, e: std::io::Error| {
            StoreError::Io(format!("failed to {} {}: {}", action, temp_path.display(), e))
        };

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| io_err("create", e))?;
        file.write_all(json).await.map_err(|e| io_err("write", e))?;
        file.sync_all().await.map_err(|e| io_err("sync", e))?;

        Ok(temp_path)
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn load(&self) -> Result<Snapshot, StoreError> {
        match Self::read_state(&self.path).await {
            Ok(Some(snapshot)) => {
                tracing::debug!(
                    path = %self.path.display(),
                    records = snapshot.records.len(),
                    "loaded state file"
                );
                Ok(snapshot)
            }
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "state file does not exist yet");
                Ok(Snapshot::default())
            }
            Err(StoreError::Serialization(reason)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %reason,
                    "state file is corrupted, trying backup"
                );
                let backup_path = self.backup_path();
                let recovered = match Self::read_state(&backup_path).await {
                    Ok(recovered) => recovered,
                    Err(StoreError::Serialization(backup_reason)) => {
                        return Err(StoreError::InvalidData(format!(
                            "{}; backup unusable: {}",
                            reason, backup_reason
                        )))
                    }
                    Err(e) => return Err(e),
                };
                let Some(snapshot) = recovered else {
                    return Err(StoreError::InvalidData(reason));
                };

                tracing::warn!(
                    records = snapshot.records.len(),
                    "recovered state from backup"
                );
                if let Err(e) = fs::copy(&backup_path, &self.path).await {
                    tracing::error!(
                        error = %e,
                        path = %self.path.display(),
                        "failed to restore state file from backup"
                    );
                }
                Ok(snapshot)
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let state = StateFileRef {
            version: STATE_FILE_VERSION,
            records: &snapshot.records,
            clicks: &snapshot.clicks,
        };
        let json = serde_json::to_vec_pretty(&state)
            .map_err(|e| StoreError::Serialization(format!("failed to serialize state: {}", e)))?;

        let temp_path = self.write_temp(&json).await?;

        // a corrupted main file must never replace a good backup
        if matches!(Self::read_state(&self.path).await, Ok(Some(_))) {
            if let Err(e) = fs::copy(&self.path, self.backup_path()).await {
                tracing::warn!(error = %e, "failed to refresh state backup");
            }
        }

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            StoreError::Io(format!(
                "failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!(path = %self.path.display(), "state written");
        Ok(())
    }
}
