//! Persistence for employee month records.
//!
//! A save goes to two independent sinks: the [`RecordStore`], a keyed
//! document collection holding the latest version of each record, and the
//! [`BackupSink`], an append-only log of every saved version. The
//! [`save_record`] coordinator writes to both and reports which succeeded.

mod json_file;
mod memory;
mod save;

pub use json_file::{JsonFileRecordStore, JsonLinesBackupSink};
pub use memory::{MemoryBackupSink, MemoryRecordStore};
pub use save::{SaveOutcome, SaveReport, save_record};

use crate::error::EngineResult;
use crate::models::EmployeeMonthRecord;

/// Keyed storage for the latest version of each record.
///
/// Keys are roster positions rendered as decimal strings.
pub trait RecordStore: Send {
    /// Returns the record stored under `key`, if any.
    fn get(&self, key: &str) -> EngineResult<Option<EmployeeMonthRecord>>;

    /// Stores `record` under `key`, replacing any previous version whole.
    fn upsert(&mut self, key: &str, record: &EmployeeMonthRecord) -> EngineResult<()>;

    /// Removes every record.
    fn delete_all(&mut self) -> EngineResult<()>;
}

/// Append-only audit log of saved records.
pub trait BackupSink: Send {
    /// Appends one record as a row.
    fn append(&mut self, record: &EmployeeMonthRecord) -> EngineResult<()>;
}

/// Renders a roster position as a store key.
pub fn record_key(index: usize) -> String {
    index.to_string()
}
