//! Transaction source port.

use crate::domain::OutgoingRecord;
use crate::error::Result;

/// Supplier of already-materialized outgoing-stock records.
///
/// Conversion from the persistent store happens inside the implementation;
/// the core only ever sees the finished collection.
pub trait RecordSource: Send + Sync {
    /// Return the source name for logging.
    fn name(&self) -> &'static str;

    /// Load every outgoing record.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read or a record
    /// is malformed.
    fn load(&self) -> Result<Vec<OutgoingRecord>>;
}

/// In-memory source, used by tests and by callers that already hold records.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<OutgoingRecord>,
}

impl MemorySource {
    #[must_use]
    pub fn new(records: Vec<OutgoingRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for MemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Result<Vec<OutgoingRecord>> {
        Ok(self.records.clone())
    }
}
