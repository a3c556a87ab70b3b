//! JSON file backed store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{Entries, MessageStore, StoreError};

/// A store persisted as one pretty-printed JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open the store at `dir/file_name`.
    ///
    /// Creates `dir` if needed and initializes the file to `{}` when it does
    /// not exist. An existing file is left untouched.
    pub async fn open(dir: impl AsRef<Path>, file_name: &str) -> crate::Result<Self> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| StoreError::FileIo {
                path: dir.to_path_buf(),
                source,
            })?;

        let path = dir.join(file_name);
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|source| StoreError::FileIo {
                path: path.clone(),
                source,
            })?;
        if !exists {
            tokio::fs::write(&path, "{}")
                .await
                .map_err(|source| StoreError::FileIo {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!("Initialized empty store at {}", path.display());
        }

        Ok(Self { path })
    }

    /// Use an existing store file without creating anything.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MessageStore for JsonFileStore {
    async fn load(&self) -> Result<Entries, StoreError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(source) => {
                return Err(StoreError::FileIo {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&json).map_err(|source| StoreError::DeserializationFailed {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, entries: &Entries) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|source| StoreError::SerializationFailed { source })?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| StoreError::FileIo {
                path: self.path.clone(),
                source,
            })
    }
}
