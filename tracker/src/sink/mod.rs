//! Persistence sinks
//!
//! Every accepted fix is stored as a [`LocationRecord`], whether or not
//! the sampler promoted it. A failed insert is never retried.

#[macro_use]
pub mod macros;
pub mod file;
pub mod memory;

pub use file::FileSink;
pub use memory::MemorySink;

use crate::types::PositionFix;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// A stored raw fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Unique id of the record.
    pub id: Uuid,

    /// Table the record belongs to.
    pub table: String,

    /// Latitude of the fix, in degrees.
    pub latitude: f64,

    /// Longitude of the fix, in degrees.
    pub longitude: f64,

    /// When the fix was handed to the sink.
    pub recorded_at: DateTime<Utc>,
}

impl LocationRecord {
    /// Creates a new record for `fix`, stamped with the current time.
    pub fn new(table: &str, fix: &PositionFix) -> Self {
        LocationRecord {
            id: Uuid::new_v4(),
            table: table.to_string(),
            latitude: fix.latitude.into_inner(),
            longitude: fix.longitude.into_inner(),
            recorded_at: Utc::now(),
        }
    }

    /// The stored position.
    pub fn fix(&self) -> PositionFix {
        PositionFix::new(self.latitude, self.longitude)
    }
}

/// Errors that can occur when storing a record.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SinkError {
    /// The storage backend can not be reached.
    Unavailable,

    /// The record could not be encoded.
    Serialization,

    /// The storage backend refused the write.
    WriteFailed,
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            SinkError::Unavailable => write!(f, "Storage unavailable."),
            SinkError::Serialization => write!(f, "Could not serialize record."),
            SinkError::WriteFailed => write!(f, "Could not write record."),
        }
    }
}

impl std::error::Error for SinkError {}

/// Durable storage for raw fixes.
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    /// Name of the sink, for logging.
    fn name(&self) -> &str;

    /// Stores a single record.
    async fn insert(&self, record: LocationRecord) -> Result<(), SinkError>;
}
