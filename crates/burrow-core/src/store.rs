use crate::error::StoreError;
use crate::record::{ClickEvent, UrlRecord};
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Everything a store persists: records in creation order and the click index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<UrlRecord>,
    pub clicks: HashMap<ShortCode, Vec<ClickEvent>>,
}

impl Snapshot {
    /// Checks the invariants a registry relies on after loading.
    ///
    /// Short codes must be unique across all records. Click lists for unknown
    /// short codes are tolerated; they are simply never reported.
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut seen = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if !seen.insert(&record.shortcode) {
                return Err(StoreError::InvalidData(format!(
                    "duplicate short code: {}",
                    record.shortcode
                )));
            }
        }
        Ok(())
    }
}

/// A durable key-value store for the registry state.
///
/// The registry calls `load` once when it opens and `save` after every
/// mutation, while holding its write lock. A failed `save` must leave the
/// previously saved state intact.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Loads the last saved snapshot. An empty store yields `Snapshot::default()`.
    async fn load(&self) -> Result<Snapshot, StoreError>;

    /// Replaces the saved state with `snapshot`.
    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}
