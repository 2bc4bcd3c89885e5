use async_trait::async_trait;
use burrow_core::{Snapshot, Store, StoreError};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// In-memory implementation of the [`Store`] trait.
///
/// Keeps the last saved snapshot so a registry can be reopened over the
/// same store within one process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    saved: Mutex<Snapshot>,
    saves: AtomicUsize,
}

impl InMemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that loads `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            saved: Mutex::new(snapshot),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// A copy of the last saved snapshot.
    pub async fn snapshot(&self) -> Snapshot {
        self.saved.lock().await.clone()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn load(&self) -> Result<Snapshot, StoreError> {
        Ok(self.saved.lock().await.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.saved.lock().await = snapshot.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
