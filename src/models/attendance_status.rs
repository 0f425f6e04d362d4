//! Attendance status model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The attendance outcome recorded for one calendar day.
///
/// Serialized using the short codes of the attendance sheet (`P`, `A`, `L`,
/// `WO`, `HL`, `PH`).
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceStatus;
///
/// let status: AttendanceStatus = "WO".parse().unwrap();
/// assert_eq!(status, AttendanceStatus::WeekOff);
/// assert_eq!(status.total_column(), "Total WO");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Worked the day; clock times drive overtime.
    #[serde(rename = "P")]
    Present,
    /// Absent without leave.
    #[serde(rename = "A")]
    Absent,
    /// On leave.
    #[serde(rename = "L")]
    Leave,
    /// Scheduled week-off.
    #[serde(rename = "WO")]
    WeekOff,
    /// Half-day leave.
    #[serde(rename = "HL")]
    HalfLeave,
    /// Public holiday.
    #[serde(rename = "PH")]
    PublicHoliday,
}

impl AttendanceStatus {
    /// Every status, in attendance-sheet order.
    pub const ALL: [AttendanceStatus; 6] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Leave,
        AttendanceStatus::WeekOff,
        AttendanceStatus::HalfLeave,
        AttendanceStatus::PublicHoliday,
    ];

    /// Returns the sheet code for this status.
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "P",
            AttendanceStatus::Absent => "A",
            AttendanceStatus::Leave => "L",
            AttendanceStatus::WeekOff => "WO",
            AttendanceStatus::HalfLeave => "HL",
            AttendanceStatus::PublicHoliday => "PH",
        }
    }

    /// Returns the name of the monthly total column counting this status.
    pub fn total_column(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Total P",
            AttendanceStatus::Absent => "Total A",
            AttendanceStatus::Leave => "Total L",
            AttendanceStatus::WeekOff => "Total WO",
            AttendanceStatus::HalfLeave => "Total HL",
            AttendanceStatus::PublicHoliday => "Total PH",
        }
    }

    /// Returns true for the only status whose times are user-entered.
    pub fn is_present(&self) -> bool {
        *self == AttendanceStatus::Present
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AttendanceStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| EngineError::InvalidStatus {
                code: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_from_str() {
        for status in AttendanceStatus::ALL {
            assert_eq!(status.code().parse::<AttendanceStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(
            "hl".parse::<AttendanceStatus>().unwrap(),
            AttendanceStatus::HalfLeave
        );
    }

    #[test]
    fn test_from_str_rejects_unknown_code() {
        match "X".parse::<AttendanceStatus>() {
            Err(EngineError::InvalidStatus { code }) => assert_eq!(code, "X"),
            other => panic!("Expected InvalidStatus, got {:?}", other),
        }
    }

    #[test]
    fn test_total_columns() {
        let columns: Vec<&str> = AttendanceStatus::ALL
            .iter()
            .map(|s| s.total_column())
            .collect();
        assert_eq!(
            columns,
            vec!["Total P", "Total A", "Total L", "Total WO", "Total HL", "Total PH"]
        );
    }

    #[test]
    fn test_serde_uses_sheet_codes() {
        let json = serde_json::to_string(&AttendanceStatus::PublicHoliday).unwrap();
        assert_eq!(json, "\"PH\"");

        let status: AttendanceStatus = serde_json::from_str("\"WO\"").unwrap();
        assert_eq!(status, AttendanceStatus::WeekOff);
    }

    #[test]
    fn test_only_present_is_present() {
        assert!(AttendanceStatus::Present.is_present());
        assert!(!AttendanceStatus::HalfLeave.is_present());
    }
}
