//! Append-only JSON lines storage, one [`LocationRecord`] per line.

use super::{LocationRecord, PersistenceSink, SinkError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Stores records in a local file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates a sink appending to `path`. The file is created on the
    /// first insert.
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSink {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads back every stored record.
    pub async fn records(&self) -> Result<Vec<LocationRecord>, SinkError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            sink_error!("(records) could not read {:?}: {}", self.path, e);
            SinkError::Unavailable
        })?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| {
                    sink_error!("(records) invalid record in {:?}: {}", self.path, e);
                    SinkError::Serialization
                })
            })
            .collect()
    }
}

#[async_trait]
impl PersistenceSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn insert(&self, record: LocationRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_string(&record).map_err(|e| {
            sink_error!("(insert) could not serialize {}: {}", record.id, e);
            SinkError::Serialization
        })?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                sink_error!("(insert) could not open {:?}: {}", self.path, e);
                SinkError::Unavailable
            })?;

        file.write_all(line.as_bytes()).await.map_err(|e| {
            sink_error!("(insert) could not write to {:?}: {}", self.path, e);
            SinkError::WriteFailed
        })?;
        file.flush().await.map_err(|e| {
            sink_error!("(insert) could not flush {:?}: {}", self.path, e);
            SinkError::WriteFailed
        })?;

        sink_debug!("(insert) {} into {:?}.", record.id, self.path);
        Ok(())
    }
}
