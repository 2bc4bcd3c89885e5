//! Shared fixtures for registry contract tests.

#![allow(dead_code)]

use async_trait::async_trait;
use burrow_core::{Snapshot, Store, StoreError};
use burrow_storage::InMemoryStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const BASE_URL: &str = "https://bur.row";

/// Wraps an [`InMemoryStore`] and fails every save while tripped.
#[derive(Debug, Default, Clone)]
pub struct FlakyStore {
    inner: Arc<InMemoryStore>,
    failing: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already persisted snapshot.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(InMemoryStore::with_snapshot(snapshot)),
            failing: Arc::default(),
        }
    }

    pub fn fail_saves(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn saved(&self) -> Snapshot {
        self.inner.snapshot().await
    }
}

#[async_trait]
impl Store for FlakyStore {
    async fn load(&self) -> Result<Snapshot, StoreError> {
        self.inner.load().await
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }
        self.inner.save(snapshot).await
    }
}
