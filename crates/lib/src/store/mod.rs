//! Message store
//!
//! The store is a single JSON object mapping receipt timestamps to messages.
//! Entries are kept as raw JSON so a rewrite never alters what is already
//! there, whatever shape it has. The relay owns the store and is its only
//! writer; every update is a full load, insert and save. There is no locking
//! across processes and no atomic replace, so a crash mid-write can leave a
//! truncated file.

use async_trait::async_trait;

mod errors;
mod in_memory;
mod json_file;

pub use errors::StoreError;
pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;

/// Stored entries keyed by timestamp string.
pub type Entries = serde_json::Map<String, serde_json::Value>;

/// Persistence for relayed messages.
///
/// Implementations must be `Send` and `Sync` so the relay task can own one.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Load every stored entry.
    async fn load(&self) -> Result<Entries, StoreError>;

    /// Replace the stored entries with `entries`.
    async fn save(&self, entries: &Entries) -> Result<(), StoreError>;
}
