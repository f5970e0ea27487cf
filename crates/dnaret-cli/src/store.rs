//! Record store abstraction
//!
//! The lister, fetcher and interactive driver only talk to this trait;
//! [`crate::firestore::FirestoreClient`] is the production implementation.

use crate::error::Result;
use async_trait::async_trait;
use dnaret_common::types::{RecordSummary, SequenceRecord};

/// Read access to sequence dataset records (dependency injection)
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Summaries of every record, in store order
    async fn list_summaries(&self) -> Result<Vec<RecordSummary>>;

    /// First record whose `file_name` equals `file_name` exactly
    async fn find_by_file_name(&self, file_name: &str) -> Result<Option<SequenceRecord>>;

    /// Human-readable location used in messages
    fn location(&self) -> String;
}

/// Store backed by a vector, for tests
#[cfg(test)]
pub struct MemoryStore {
    pub records: Vec<SequenceRecord>,
    pub fail_with: Option<fn() -> crate::error::CliError>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new(records: Vec<SequenceRecord>) -> Self {
        Self {
            records,
            fail_with: None,
        }
    }

    pub fn failing(error: fn() -> crate::error::CliError) -> Self {
        Self {
            records: Vec::new(),
            fail_with: Some(error),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_summaries(&self) -> Result<Vec<RecordSummary>> {
        if let Some(error) = self.fail_with {
            return Err(error());
        }
        Ok(self.records.iter().map(SequenceRecord::summary).collect())
    }

    async fn find_by_file_name(&self, file_name: &str) -> Result<Option<SequenceRecord>> {
        if let Some(error) = self.fail_with {
            return Err(error());
        }
        Ok(self
            .records
            .iter()
            .find(|r| r.file_name == file_name)
            .cloned())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
