//! In-memory sinks.

use std::collections::BTreeMap;

use crate::error::EngineResult;
use crate::models::{EmployeeMonthRecord, RecordRow};

use super::{BackupSink, RecordStore};

/// A [`RecordStore`] backed by a map.
///
/// Records are held in their wire form, so reads go through the same
/// parsing as records loaded from a file.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    rows: BTreeMap<String, RecordRow>,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, key: &str) -> EngineResult<Option<EmployeeMonthRecord>> {
        self.rows
            .get(key)
            .map(EmployeeMonthRecord::from_row)
            .transpose()
    }

    fn upsert(&mut self, key: &str, record: &EmployeeMonthRecord) -> EngineResult<()> {
        self.rows.insert(key.to_string(), record.to_row());
        Ok(())
    }

    fn delete_all(&mut self) -> EngineResult<()> {
        self.rows.clear();
        Ok(())
    }
}

/// A [`BackupSink`] that keeps appended rows in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackupSink {
    rows: Vec<RecordRow>,
}

impl MemoryBackupSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every appended row, oldest first.
    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }
}

impl BackupSink for MemoryBackupSink {
    fn append(&mut self, record: &EmployeeMonthRecord) -> EngineResult<()> {
        self.rows.push(record.to_row());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;

    #[test]
    fn test_memory_store_upsert_replaces() {
        let mut store = MemoryRecordStore::new();
        let mut record = EmployeeMonthRecord::new(Employee::new("E001", "Asha"));
        store.upsert("0", &record).unwrap();

        record.employee.name = "Asha K".to_string();
        store.upsert("0", &record).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("0").unwrap().unwrap().employee.name, "Asha K");
        assert!(store.get("1").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_delete_all() {
        let mut store = MemoryRecordStore::new();
        let record = EmployeeMonthRecord::new(Employee::new("E001", "Asha"));
        store.upsert("0", &record).unwrap();
        store.upsert("1", &record).unwrap();

        store.delete_all().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_backup_keeps_every_version() {
        let mut sink = MemoryBackupSink::new();
        let record = EmployeeMonthRecord::new(Employee::new("E001", "Asha"));
        sink.append(&record).unwrap();
        sink.append(&record).unwrap();
        assert_eq!(sink.rows().len(), 2);
    }
}
