//! Request types for the Attendance Engine API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{AttendanceStatus, DayEntry};

/// Request body for `POST /roster`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRequest {
    /// Spreadsheet rows; each must carry `Employee Code` and `Employee Name`.
    pub rows: Vec<HashMap<String, Value>>,
}

/// Request body for `PUT /period`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The calendar year.
    pub year: i32,
    /// The month, 1-12.
    pub month: u32,
}

/// Request body for `POST /compose`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeRequest {
    /// Day number reported in warnings and the audit step.
    #[serde(default = "default_day")]
    pub day: u32,
    /// The attendance status.
    pub status: AttendanceStatus,
    /// Check-in text (`HH:MM`).
    #[serde(default)]
    pub check_in: Option<String>,
    /// Check-out text (`HH:MM`).
    #[serde(default)]
    pub check_out: Option<String>,
}

fn default_day() -> u32 {
    1
}

impl From<ComposeRequest> for DayEntry {
    fn from(req: ComposeRequest) -> Self {
        DayEntry {
            status: req.status,
            check_in: req.check_in,
            check_out: req.check_out,
        }
    }
}
