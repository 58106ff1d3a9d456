//! In-process storage, used when no storage path is configured.

use super::{LocationRecord, PersistenceSink, SinkError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Tables of records kept in memory.
///
/// Cloning the sink shares the underlying tables.
#[derive(Debug, Clone)]
pub struct MemorySink {
    tables: Arc<Mutex<HashMap<String, Vec<LocationRecord>>>>,
    available: Arc<AtomicBool>,
}

impl Default for MemorySink {
    fn default() -> Self {
        MemorySink {
            tables: Arc::new(Mutex::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the backend going down or coming back.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// All records of `table`, in insertion order.
    pub async fn records(&self, table: &str) -> Vec<LocationRecord> {
        self.tables
            .lock()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl PersistenceSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(&self, record: LocationRecord) -> Result<(), SinkError> {
        if !self.available.load(Ordering::SeqCst) {
            sink_warn!("(insert) memory sink unavailable, dropping {}.", record.id);
            return Err(SinkError::Unavailable);
        }

        sink_debug!("(insert) {} into [{}].", record.id, record.table);
        self.tables
            .lock()
            .await
            .entry(record.table.clone())
            .or_default()
            .push(record);

        Ok(())
    }
}
