//! In-memory store, lost when dropped.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Entries, MessageStore, StoreError};

/// Store keeping entries in memory.
///
/// Useful for dry runs of the relay and for tests that do not care about
/// the on-disk format.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<Entries>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn load(&self) -> Result<Entries, StoreError> {
        Ok(self.entries.read().await.clone())
    }

    async fn save(&self, entries: &Entries) -> Result<(), StoreError> {
        *self.entries.write().await = entries.clone();
        Ok(())
    }
}
