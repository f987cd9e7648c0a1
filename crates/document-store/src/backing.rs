//! # Backing Storage
//!
//! Where a collection keeps its documents between restarts.
//!
//! The [`Collection`](crate::Collection) always serves reads from memory. After
//! every mutation it hands the full document set to its [`Backend`], which may
//! persist it or do nothing at all. A backend is selected from a connection
//! string through [`Backing`]:
//!
//! | Connection string       | Backend             |
//! |-------------------------|---------------------|
//! | `memory://`             | [`MemoryBackend`]   |
//! | `file://data/fruits.json` | [`JsonFileBackend`] |

use crate::document::{Document, DocumentId};
use crate::error::StoreError;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Persistence seam for a collection.
#[async_trait]
pub trait Backend<T: Document>: Send + Sync {
    /// Reads every stored document. An empty store yields an empty vector.
    async fn load(&self) -> Result<Vec<T>, StoreError>;

    /// Writes the complete document set, replacing whatever was stored before.
    async fn persist(&self, documents: &IndexMap<DocumentId, T>) -> Result<(), StoreError>;
}

/// Keeps nothing; the collection lives and dies with the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryBackend;

#[async_trait]
impl<T: Document> Backend<T> for MemoryBackend {
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(Vec::new())
    }

    async fn persist(&self, _documents: &IndexMap<DocumentId, T>) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Stores the collection as one JSON array in a single file.
///
/// Writes go to a sibling temp file which is then renamed over the target, so
/// a crash mid-write leaves the previous version intact.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn storage_error(path: &Path, action: &str, error: impl std::fmt::Display) -> StoreError {
    StoreError::Storage(format!("{action} {}: {error}", path.display()))
}

#[async_trait]
impl<T: Document> Backend<T> for JsonFileBackend {
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let documents: Vec<T> = serde_json::from_slice(&bytes)
                    .map_err(|e| storage_error(&self.path, "failed to parse", e))?;
                debug!(path = %self.path.display(), count = documents.len(), "Loaded");
                Ok(documents)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(storage_error(&self.path, "failed to read", e)),
        }
    }

    async fn persist(&self, documents: &IndexMap<DocumentId, T>) -> Result<(), StoreError> {
        let values: Vec<&T> = documents.values().collect();
        let bytes = serde_json::to_vec_pretty(&values)
            .map_err(|e| storage_error(&self.path, "failed to serialize", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error(parent, "failed to create", e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes)
            .await
            .map_err(|e| storage_error(&temp, "failed to write", e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| storage_error(&self.path, "failed to replace", e))?;
        debug!(path = %self.path.display(), count = values.len(), "Persisted");
        Ok(())
    }
}

/// Backend choice parsed from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backing {
    Memory,
    JsonFile(PathBuf),
}

impl Backing {
    /// Builds the backend this choice names.
    pub fn into_backend<T: Document>(self) -> Box<dyn Backend<T>> {
        match self {
            Backing::Memory => Box::new(MemoryBackend),
            Backing::JsonFile(path) => Box::new(JsonFileBackend::new(path)),
        }
    }
}

impl FromStr for Backing {
    type Err = StoreError;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let url = url.trim();
        if url == "memory" || url == "memory://" {
            return Ok(Backing::Memory);
        }
        match url.strip_prefix("file://") {
            Some(path) if !path.is_empty() => Ok(Backing::JsonFile(PathBuf::from(path))),
            _ => Err(StoreError::UnsupportedUrl(url.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_url() {
        assert_eq!("memory://".parse::<Backing>(), Ok(Backing::Memory));
        assert_eq!("memory".parse::<Backing>(), Ok(Backing::Memory));
    }

    #[test]
    fn test_parse_file_url() {
        assert_eq!(
            "file://data/fruits.json".parse::<Backing>(),
            Ok(Backing::JsonFile(PathBuf::from("data/fruits.json")))
        );
        assert_eq!(
            "file:///var/lib/fruits.json".parse::<Backing>(),
            Ok(Backing::JsonFile(PathBuf::from("/var/lib/fruits.json")))
        );
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        for url in ["", "file://", "mongodb://localhost:27017/fruits"] {
            assert_eq!(
                url.parse::<Backing>(),
                Err(StoreError::UnsupportedUrl(url.to_string()))
            );
        }
    }

    #[test]
    fn test_temp_path_is_a_sibling() {
        let backend = JsonFileBackend::new("data/fruits.json");
        assert_eq!(backend.temp_path(), PathBuf::from("data/fruits.json.tmp"));
    }
}
