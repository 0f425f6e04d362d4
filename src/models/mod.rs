//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance_status;
mod audit;
mod day_record;
mod employee;
mod month_record;
mod period;
mod time_of_day;

pub use attendance_status::AttendanceStatus;
pub use audit::{AuditStep, EntryWarning};
pub use day_record::{DayEntry, DayRecord};
pub use employee::{EMPLOYEE_CODE_COLUMN, EMPLOYEE_NAME_COLUMN, Employee, Roster};
pub use month_record::{
    DayField, EmployeeMonthRecord, OT_HOURS_COLUMN, RecordRow, StatusCounts, day_column,
};
pub use period::Period;
pub use time_of_day::{MINUTES_PER_DAY, TimeOfDay};
