//! Configuration types for attendance policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML policy file. Every section has a
//! `Default` equal to the standard policy, so a file only needs to list
//! the values it changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceStatus, TimeOfDay};

/// Default length of the base workday in hours.
pub const DEFAULT_BASE_WORKDAY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// A pair of check-in and check-out times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// The check-in time.
    pub check_in: TimeOfDay,
    /// The check-out time.
    pub check_out: TimeOfDay,
}

impl TimeWindow {
    pub(crate) const fn from_hm(check_in: (u8, u8), check_out: (u8, u8)) -> Self {
        Self {
            check_in: TimeOfDay::from_hm(check_in.0, check_in.1),
            check_out: TimeOfDay::from_hm(check_out.0, check_out.1),
        }
    }
}

/// Overtime banding policy.
///
/// Overtime is the time worked beyond `base_workday_hours`. Its fractional
/// hour, in hundredths, is bucketed: below `half_band_start` rounds down,
/// `half_band_start..=half_band_end` adds half an hour, above
/// `half_band_end` rounds up to the next whole hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimePolicy {
    /// Hours in the base workday.
    pub base_workday_hours: Decimal,
    /// First hundredths value that earns a half hour.
    pub half_band_start: u32,
    /// Last hundredths value that earns a half hour.
    pub half_band_end: u32,
}

impl Default for OvertimePolicy {
    fn default() -> Self {
        Self {
            base_workday_hours: DEFAULT_BASE_WORKDAY_HOURS,
            half_band_start: 50,
            half_band_end: 70,
        }
    }
}

/// Night-shift boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightShiftPolicy {
    /// A check-in at or after this time is a night shift.
    pub starts_at: TimeOfDay,
    /// A (wraparound-adjusted) check-out at or before this time is a night shift.
    pub ends_by: TimeOfDay,
}

impl Default for NightShiftPolicy {
    fn default() -> Self {
        Self {
            starts_at: TimeOfDay::from_hm(20, 0),
            ends_by: TimeOfDay::from_hm(8, 0),
        }
    }
}

/// Placeholder times stored for each non-Present status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusDefaults {
    /// Times for Absent days.
    pub absent: TimeWindow,
    /// Times for Leave days.
    pub leave: TimeWindow,
    /// Times for Week-Off days.
    pub week_off: TimeWindow,
    /// Times for Half-Leave days.
    pub half_leave: TimeWindow,
    /// Times for Public Holiday days.
    pub public_holiday: TimeWindow,
}

impl StatusDefaults {
    /// Returns the placeholder times for a status, or `None` for Present.
    pub fn for_status(&self, status: AttendanceStatus) -> Option<TimeWindow> {
        match status {
            AttendanceStatus::Present => None,
            AttendanceStatus::Absent => Some(self.absent),
            AttendanceStatus::Leave => Some(self.leave),
            AttendanceStatus::WeekOff => Some(self.week_off),
            AttendanceStatus::HalfLeave => Some(self.half_leave),
            AttendanceStatus::PublicHoliday => Some(self.public_holiday),
        }
    }
}

impl Default for StatusDefaults {
    fn default() -> Self {
        let midnight = TimeWindow::from_hm((0, 0), (0, 0));
        Self {
            absent: midnight,
            leave: midnight,
            week_off: TimeWindow::from_hm((9, 0), (17, 0)),
            half_leave: TimeWindow::from_hm((9, 0), (13, 0)),
            public_holiday: midnight,
        }
    }
}

/// The complete attendance policy.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::models::AttendanceStatus;
///
/// let policy = AttendancePolicy::default();
/// let week_off = policy.status_defaults.for_status(AttendanceStatus::WeekOff).unwrap();
/// assert_eq!(week_off.check_out.to_string(), "17:00");
/// assert_eq!(policy.present_defaults.check_out.to_string(), "18:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendancePolicy {
    /// A label for the policy.
    pub name: String,
    /// Overtime banding.
    pub overtime: OvertimePolicy,
    /// Night-shift boundaries.
    pub night_shift: NightShiftPolicy,
    /// Times used for a Present day with no times, or with unparseable times.
    pub present_defaults: TimeWindow,
    /// Placeholder times for the other statuses.
    pub status_defaults: StatusDefaults,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            name: "standard".to_string(),
            overtime: OvertimePolicy::default(),
            night_shift: NightShiftPolicy::default(),
            present_defaults: TimeWindow::from_hm((9, 0), (18, 0)),
            status_defaults: StatusDefaults::default(),
        }
    }
}

impl AttendancePolicy {
    /// Checks internal consistency, returning a description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        if self.overtime.base_workday_hours <= Decimal::ZERO {
            return Err("overtime.base_workday_hours must be positive".to_string());
        }
        if self.overtime.half_band_start > self.overtime.half_band_end {
            return Err("overtime.half_band_start must not exceed half_band_end".to_string());
        }
        if self.overtime.half_band_end > 99 {
            return Err("overtime.half_band_end must be at most 99".to_string());
        }
        Ok(())
    }
}
