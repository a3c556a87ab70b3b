//! Error types for message store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving the message store.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file does not exist.
    #[error("Store file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Reading, writing or creating the store failed at the filesystem level.
    #[error("Store I/O failed for {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store contents are not a JSON object.
    #[error("Store file {} is not a JSON object: {source}", .path.display())]
    DeserializationFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Entries could not be serialized.
    #[error("Failed to serialize store entries: {source}")]
    SerializationFailed {
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Check if this error indicates the store file is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, StoreError::FileIo { .. } | StoreError::NotFound { .. })
    }

    /// Check if this error is related to (de)serialization.
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            StoreError::SerializationFailed { .. } | StoreError::DeserializationFailed { .. }
        )
    }

    /// Get the file path associated with this error, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            StoreError::NotFound { path }
            | StoreError::FileIo { path, .. }
            | StoreError::DeserializationFailed { path, .. } => Some(path),
            StoreError::SerializationFailed { .. } => None,
        }
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
