//! Day record models.
//!
//! This module defines [`DayEntry`], the raw input for one day, and
//! [`DayRecord`], the stored fields derived from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AttendanceStatus, TimeOfDay};

/// Raw attendance input for one day, as entered by the user.
///
/// Times are kept as text so that malformed input can be reported and
/// replaced rather than rejected at the boundary. They are only read for
/// [`AttendanceStatus::Present`].
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceStatus, DayEntry};
///
/// let entry = DayEntry::present("09:00", "18:00");
/// assert_eq!(entry.status, AttendanceStatus::Present);
/// assert_eq!(DayEntry::status_only(AttendanceStatus::Leave).check_in, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// The attendance status for the day.
    pub status: AttendanceStatus,
    /// Check-in text (`HH:MM`).
    #[serde(default)]
    pub check_in: Option<String>,
    /// Check-out text (`HH:MM`).
    #[serde(default)]
    pub check_out: Option<String>,
}

impl DayEntry {
    /// A Present day with both clock times.
    pub fn present(check_in: impl Into<String>, check_out: impl Into<String>) -> Self {
        Self {
            status: AttendanceStatus::Present,
            check_in: Some(check_in.into()),
            check_out: Some(check_out.into()),
        }
    }

    /// A day with a status and no clock times.
    pub fn status_only(status: AttendanceStatus) -> Self {
        Self {
            status,
            check_in: None,
            check_out: None,
        }
    }
}

/// The stored fields for one calendar day of one employee.
///
/// For every status other than Present the overtime is zero, the night flag
/// is false and the times are the fixed placeholders for that status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The attendance status for the day.
    pub status: AttendanceStatus,
    /// Check-in time (or the status placeholder).
    pub check_in: TimeOfDay,
    /// Check-out time (or the status placeholder).
    pub check_out: TimeOfDay,
    /// Overtime hours, a non-negative multiple of 0.5.
    pub overtime_hours: Decimal,
    /// Whether the day counts as a night shift.
    #[serde(default)]
    pub night_shift: bool,
}
