//! The save coordinator.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeMonthRecord;

use super::{BackupSink, RecordStore};

/// Which sinks accepted a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    /// Both the record store and the backup succeeded.
    BothSaved,
    /// Only the record store succeeded.
    StoreOnly,
    /// Only the backup succeeded.
    BackupOnly,
    /// Neither sink succeeded; the entry was not saved.
    BothFailed,
}

impl SaveOutcome {
    /// Returns true if at least one sink holds the record.
    pub fn is_saved(&self) -> bool {
        !matches!(self, SaveOutcome::BothFailed)
    }
}

/// The result of one save, with the error text from each failed sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReport {
    /// The combined outcome.
    pub outcome: SaveOutcome,
    /// The record store error, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_error: Option<String>,
    /// The backup error, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_error: Option<String>,
}

impl SaveReport {
    /// Converts a both-failed report into [`EngineError::SaveFailed`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SaveFailed`] when neither sink succeeded.
    pub fn into_result(self) -> EngineResult<SaveOutcome> {
        match self.outcome {
            SaveOutcome::BothFailed => Err(EngineError::SaveFailed {
                store: self.store_error.unwrap_or_default(),
                backup: self.backup_error.unwrap_or_default(),
            }),
            outcome => Ok(outcome),
        }
    }
}

/// Writes a record to the store under `key` and appends it to the backup.
///
/// The two writes are independent: a failure in one does not stop the
/// other. Single-sink failures are logged as warnings; losing both is
/// logged as an error.
pub fn save_record(
    store: &mut dyn RecordStore,
    backup: &mut dyn BackupSink,
    key: &str,
    record: &EmployeeMonthRecord,
) -> SaveReport {
    let store_error = store.upsert(key, record).err().map(|e| e.to_string());
    let backup_error = backup.append(record).err().map(|e| e.to_string());

    let outcome = match (&store_error, &backup_error) {
        (None, None) => SaveOutcome::BothSaved,
        (None, Some(_)) => SaveOutcome::StoreOnly,
        (Some(_), None) => SaveOutcome::BackupOnly,
        (Some(_), Some(_)) => SaveOutcome::BothFailed,
    };

    match outcome {
        SaveOutcome::BothSaved => {
            info!(key, employee_code = %record.employee.code, "Record saved");
        }
        SaveOutcome::StoreOnly | SaveOutcome::BackupOnly => {
            warn!(
                key,
                employee_code = %record.employee.code,
                store_error = store_error.as_deref().unwrap_or("-"),
                backup_error = backup_error.as_deref().unwrap_or("-"),
                "Record saved to one sink only"
            );
        }
        SaveOutcome::BothFailed => {
            error!(
                key,
                employee_code = %record.employee.code,
                store_error = store_error.as_deref().unwrap_or("-"),
                backup_error = backup_error.as_deref().unwrap_or("-"),
                "Record was not saved"
            );
        }
    }

    SaveReport {
        outcome,
        store_error,
        backup_error,
    }
}
