//! File-backed sinks.
//!
//! [`JsonFileRecordStore`] keeps the whole collection as one JSON object and
//! rewrites it on every change. [`JsonLinesBackupSink`] appends one JSON
//! object per line.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeMonthRecord, RecordRow};

use super::{BackupSink, RecordStore};

const RECORD_STORE: &str = "Record store";
const BACKUP_SINK: &str = "Backup";

fn store_error(sink: &str, message: impl std::fmt::Display) -> EngineError {
    EngineError::StoreError {
        sink: sink.to_string(),
        message: message.to_string(),
    }
}

fn ensure_parent(path: &Path, sink: &str) -> EngineResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| store_error(sink, e))
        }
        _ => Ok(()),
    }
}

/// A [`RecordStore`] persisted as a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileRecordStore {
    path: PathBuf,
}

impl JsonFileRecordStore {
    /// Creates a store at `path`. The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> EngineResult<BTreeMap<String, RecordRow>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| store_error(RECORD_STORE, e))?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| store_error(RECORD_STORE, e))
    }

    fn write_all(&self, rows: &BTreeMap<String, RecordRow>) -> EngineResult<()> {
        ensure_parent(&self.path, RECORD_STORE)?;
        let bytes = serde_json::to_vec_pretty(rows).map_err(|e| store_error(RECORD_STORE, e))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| store_error(RECORD_STORE, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| store_error(RECORD_STORE, e))
    }
}

impl RecordStore for JsonFileRecordStore {
    fn get(&self, key: &str) -> EngineResult<Option<EmployeeMonthRecord>> {
        self.read_all()?
            .get(key)
            .map(EmployeeMonthRecord::from_row)
            .transpose()
    }

    fn upsert(&mut self, key: &str, record: &EmployeeMonthRecord) -> EngineResult<()> {
        let mut rows = self.read_all()?;
        rows.insert(key.to_string(), record.to_row());
        self.write_all(&rows)
    }

    fn delete_all(&mut self) -> EngineResult<()> {
        self.write_all(&BTreeMap::new())
    }
}

/// A [`BackupSink`] appending JSON lines to a file.
///
/// Each line is one record with its columns in sorted order.
#[derive(Debug, Clone)]
pub struct JsonLinesBackupSink {
    path: PathBuf,
}

impl JsonLinesBackupSink {
    /// Creates a sink at `path`. The file is created on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the log path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BackupSink for JsonLinesBackupSink {
    fn append(&mut self, record: &EmployeeMonthRecord) -> EngineResult<()> {
        ensure_parent(&self.path, BACKUP_SINK)?;
        let mut line =
            serde_json::to_string(&record.to_row()).map_err(|e| store_error(BACKUP_SINK, e))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| store_error(BACKUP_SINK, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| store_error(BACKUP_SINK, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, DayRecord, Employee, TimeOfDay};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("attendance_store_{}", Uuid::new_v4()))
    }

    fn sample_record() -> EmployeeMonthRecord {
        let mut record = EmployeeMonthRecord::new(Employee::new("E001", "Asha"));
        record.days.insert(
            3,
            DayRecord {
                status: AttendanceStatus::Present,
                check_in: TimeOfDay::parse("09:00").unwrap(),
                check_out: TimeOfDay::parse("18:00").unwrap(),
                overtime_hours: Decimal::ONE,
                night_shift: false,
            },
        );
        record.counts.record(AttendanceStatus::Present);
        record.ot_hours = Decimal::ONE;
        record
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = scratch_dir();
        let mut store = JsonFileRecordStore::new(dir.join("nested/records.json"));

        assert!(store.get("0").unwrap().is_none());

        let record = sample_record();
        store.upsert("0", &record).unwrap();

        let reopened = JsonFileRecordStore::new(store.path().to_path_buf());
        assert_eq!(reopened.get("0").unwrap(), Some(record));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_json_store_delete_all() {
        let dir = scratch_dir();
        let mut store = JsonFileRecordStore::new(dir.join("records.json"));
        store.upsert("0", &sample_record()).unwrap();
        store.upsert("1", &sample_record()).unwrap();

        store.delete_all().unwrap();
        assert!(store.get("0").unwrap().is_none());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_json_store_unwritable_path() {
        // A regular file cannot act as a directory.
        let mut store = JsonFileRecordStore::new("Cargo.toml/records.json");
        let err = store.upsert("0", &sample_record()).unwrap_err();
        assert!(matches!(err, EngineError::StoreError { .. }));
    }

    #[test]
    fn test_backup_appends_sorted_lines() {
        let dir = scratch_dir();
        let mut sink = JsonLinesBackupSink::new(dir.join("backup.jsonl"));
        sink.append(&sample_record()).unwrap();
        sink.append(&sample_record()).unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"03_Check-in\""));

        fs::remove_dir_all(dir).ok();
    }
}
