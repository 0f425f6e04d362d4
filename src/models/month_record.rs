//! Employee month record model.
//!
//! This module contains [`EmployeeMonthRecord`], the per-employee document
//! that is persisted and exported, together with its flat wire form
//! ([`RecordRow`]). Field names of the wire form are shared with other
//! tooling and must not change.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};

use super::employee::{EMPLOYEE_CODE_COLUMN, EMPLOYEE_NAME_COLUMN, cell_text};
use super::{AttendanceStatus, DayRecord, Employee, TimeOfDay};

/// Column holding the monthly overtime total.
pub const OT_HOURS_COLUMN: &str = "OT Hours";

/// Flat wire form of a record: column name to cell value, sorted by name.
pub type RecordRow = BTreeMap<String, Value>;

/// Number of days recorded with each attendance status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Days marked Present.
    pub present: u32,
    /// Days marked Absent.
    pub absent: u32,
    /// Days marked Leave.
    pub leave: u32,
    /// Days marked Week-Off.
    pub week_off: u32,
    /// Days marked Half-Leave.
    pub half_leave: u32,
    /// Days marked Public Holiday.
    pub public_holiday: u32,
}

impl StatusCounts {
    /// Returns the count for one status.
    pub fn get(&self, status: AttendanceStatus) -> u32 {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Absent => self.absent,
            AttendanceStatus::Leave => self.leave,
            AttendanceStatus::WeekOff => self.week_off,
            AttendanceStatus::HalfLeave => self.half_leave,
            AttendanceStatus::PublicHoliday => self.public_holiday,
        }
    }

    /// Adds one day to the count for a status.
    pub fn record(&mut self, status: AttendanceStatus) {
        *self.slot(status) += 1;
    }

    fn slot(&mut self, status: AttendanceStatus) -> &mut u32 {
        match status {
            AttendanceStatus::Present => &mut self.present,
            AttendanceStatus::Absent => &mut self.absent,
            AttendanceStatus::Leave => &mut self.leave,
            AttendanceStatus::WeekOff => &mut self.week_off,
            AttendanceStatus::HalfLeave => &mut self.half_leave,
            AttendanceStatus::PublicHoliday => &mut self.public_holiday,
        }
    }

    /// Returns the total number of counted days.
    pub fn total(&self) -> u32 {
        AttendanceStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// One employee's attendance for the active month.
///
/// Day records are keyed by day number. The counts and overtime total are
/// derived from the days by the monthly aggregator and stored alongside
/// them. Serializes as a [`RecordRow`].
///
/// # Example
///
/// ```
/// use attendance_engine::models::{Employee, EmployeeMonthRecord};
///
/// let record = EmployeeMonthRecord::new(Employee::new("E001", "Asha"));
/// let row = record.to_row();
/// assert_eq!(row["Employee Code"], "E001");
/// assert_eq!(row["OT Hours"], 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RecordRow", try_from = "RecordRow")]
pub struct EmployeeMonthRecord {
    /// The employee this record belongs to.
    pub employee: Employee,
    /// Day records keyed by day number (1-based).
    pub days: BTreeMap<u32, DayRecord>,
    /// Per-status day counts.
    pub counts: StatusCounts,
    /// Total overtime for the month, rounded to one decimal place.
    pub ot_hours: Decimal,
}

impl EmployeeMonthRecord {
    /// Creates an empty record for an employee.
    pub fn new(employee: Employee) -> Self {
        Self {
            employee,
            days: BTreeMap::new(),
            counts: StatusCounts::default(),
            ot_hours: Decimal::ZERO,
        }
    }

    /// Flattens the record into its wire columns.
    ///
    /// Day columns are `{DD}_Status`, `{DD}_Check-in`, `{DD}_Check-out`,
    /// `{DD}_OT` and `{DD}_Night`. Overtime is written as a JSON number,
    /// integral when the value is whole.
    pub fn to_row(&self) -> RecordRow {
        let mut row = RecordRow::new();
        row.insert(
            EMPLOYEE_CODE_COLUMN.to_string(),
            Value::String(self.employee.code.clone()),
        );
        row.insert(
            EMPLOYEE_NAME_COLUMN.to_string(),
            Value::String(self.employee.name.clone()),
        );

        for (day, record) in &self.days {
            row.insert(
                day_column(*day, DayField::Status),
                Value::String(record.status.code().to_string()),
            );
            row.insert(
                day_column(*day, DayField::CheckIn),
                Value::String(record.check_in.to_string()),
            );
            row.insert(
                day_column(*day, DayField::CheckOut),
                Value::String(record.check_out.to_string()),
            );
            row.insert(
                day_column(*day, DayField::Overtime),
                hours_value(record.overtime_hours),
            );
            row.insert(
                day_column(*day, DayField::Night),
                Value::Bool(record.night_shift),
            );
        }

        for status in AttendanceStatus::ALL {
            row.insert(
                status.total_column().to_string(),
                Value::from(self.counts.get(status)),
            );
        }
        row.insert(
            OT_HOURS_COLUMN.to_string(),
            hours_value(self.ot_hours),
        );

        row
    }

    /// Rebuilds a record from its wire columns.
    ///
    /// Numbers are accepted either as JSON numbers or as numeric strings. A
    /// missing `{DD}_Night` column reads as `false`; every other day column
    /// is required once `{DD}_Status` is present.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRecord`] naming the first missing or
    /// malformed column.
    pub fn from_row(row: &RecordRow) -> EngineResult<Self> {
        let employee = Employee::new(
            required_text(row, EMPLOYEE_CODE_COLUMN)?,
            required_text(row, EMPLOYEE_NAME_COLUMN)?,
        );

        let mut days = BTreeMap::new();
        for key in row.keys() {
            let Some(prefix) = key.strip_suffix(DayField::Status.suffix()) else {
                continue;
            };
            let Ok(day) = prefix.parse::<u32>() else {
                continue;
            };

            let status_column = day_column(day, DayField::Status);
            let status = AttendanceStatus::from_str(&required_text(row, &status_column)?)
                .map_err(|e| invalid(&status_column, e.to_string()))?;

            let check_in = required_time(row, &day_column(day, DayField::CheckIn))?;
            let check_out = required_time(row, &day_column(day, DayField::CheckOut))?;
            let overtime_hours = required_decimal(row, &day_column(day, DayField::Overtime))?;

            let night_column = day_column(day, DayField::Night);
            let night_shift = match row.get(&night_column) {
                None | Some(Value::Null) => false,
                Some(Value::Bool(flag)) => *flag,
                Some(Value::String(text)) => text
                    .trim()
                    .parse::<bool>()
                    .map_err(|e| invalid(&night_column, e.to_string()))?,
                Some(other) => {
                    return Err(invalid(&night_column, format!("expected a flag, got {}", other)));
                }
            };

            days.insert(
                day,
                DayRecord {
                    status,
                    check_in,
                    check_out,
                    overtime_hours,
                    night_shift,
                },
            );
        }

        let mut counts = StatusCounts::default();
        for status in AttendanceStatus::ALL {
            *counts.slot(status) = required_count(row, status.total_column())?;
        }

        Ok(Self {
            employee,
            days,
            counts,
            ot_hours: required_decimal(row, OT_HOURS_COLUMN)?,
        })
    }
}

impl From<EmployeeMonthRecord> for RecordRow {
    fn from(record: EmployeeMonthRecord) -> Self {
        record.to_row()
    }
}

impl TryFrom<RecordRow> for EmployeeMonthRecord {
    type Error = EngineError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        Self::from_row(&row)
    }
}

/// The per-day wire columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayField {
    /// `{DD}_Status`
    Status,
    /// `{DD}_Check-in`
    CheckIn,
    /// `{DD}_Check-out`
    CheckOut,
    /// `{DD}_OT`
    Overtime,
    /// `{DD}_Night`
    Night,
}

impl DayField {
    /// All per-day columns.
    pub const ALL: [DayField; 5] = [
        DayField::Status,
        DayField::CheckIn,
        DayField::CheckOut,
        DayField::Overtime,
        DayField::Night,
    ];

    fn suffix(&self) -> &'static str {
        match self {
            DayField::Status => "_Status",
            DayField::CheckIn => "_Check-in",
            DayField::CheckOut => "_Check-out",
            DayField::Overtime => "_OT",
            DayField::Night => "_Night",
        }
    }
}

/// Returns the wire column name for a day field, e.g. `07_Check-in`.
pub fn day_column(day: u32, field: DayField) -> String {
    format!("{:02}{}", day, field.suffix())
}

fn hours_value(hours: Decimal) -> Value {
    let hours = hours.normalize();
    if hours.scale() == 0 {
        if let Some(whole) = hours.to_i64() {
            return Value::from(whole);
        }
    }
    // Halves and tenths are exact in their shortest f64 form.
    hours
        .to_f64()
        .and_then(serde_json::Number::from_f64)
        .map_or_else(|| Value::String(hours.to_string()), Value::Number)
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidRecord {
        field: field.to_string(),
        message: message.into(),
    }
}

fn required<'a>(row: &'a RecordRow, column: &str) -> EngineResult<&'a Value> {
    match row.get(column) {
        None | Some(Value::Null) => Err(invalid(column, "missing")),
        Some(value) => Ok(value),
    }
}

fn required_text(row: &RecordRow, column: &str) -> EngineResult<String> {
    required(row, column).map(cell_text)
}

fn required_time(row: &RecordRow, column: &str) -> EngineResult<TimeOfDay> {
    TimeOfDay::parse(&required_text(row, column)?).map_err(|e| invalid(column, e.to_string()))
}

fn required_decimal(row: &RecordRow, column: &str) -> EngineResult<Decimal> {
    let text = required_text(row, column)?;
    Decimal::from_str(&text).map_err(|e| invalid(column, e.to_string()))
}

fn required_count(row: &RecordRow, column: &str) -> EngineResult<u32> {
    let text = required_text(row, column)?;
    text.parse::<u32>()
        .map_err(|e| invalid(column, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_record() -> EmployeeMonthRecord {
        let mut record = EmployeeMonthRecord::new(Employee::new("E001", "Asha"));
        record.days.insert(
            1,
            DayRecord {
                status: AttendanceStatus::Present,
                check_in: TimeOfDay::parse("22:00").unwrap(),
                check_out: TimeOfDay::parse("07:45").unwrap(),
                overtime_hours: dec("2.0"),
                night_shift: true,
            },
        );
        record.days.insert(
            2,
            DayRecord {
                status: AttendanceStatus::WeekOff,
                check_in: TimeOfDay::parse("09:00").unwrap(),
                check_out: TimeOfDay::parse("17:00").unwrap(),
                overtime_hours: Decimal::ZERO,
                night_shift: false,
            },
        );
        record.counts.record(AttendanceStatus::Present);
        record.counts.record(AttendanceStatus::WeekOff);
        record.ot_hours = dec("2.0");
        record
    }

    #[test]
    fn test_to_row_uses_wire_column_names() {
        let row = sample_record().to_row();

        assert_eq!(row["Employee Code"], json!("E001"));
        assert_eq!(row["Employee Name"], json!("Asha"));
        assert_eq!(row["01_Status"], json!("P"));
        assert_eq!(row["01_Check-in"], json!("22:00"));
        assert_eq!(row["01_Check-out"], json!("07:45"));
        assert_eq!(row["01_OT"], json!(2));
        assert_eq!(row["01_Night"], json!(true));
        assert_eq!(row["02_Status"], json!("WO"));
        assert_eq!(row["Total P"], json!(1));
        assert_eq!(row["Total WO"], json!(1));
        assert_eq!(row["Total PH"], json!(0));
        assert_eq!(row["OT Hours"], json!(2));
        assert_eq!(row.len(), 2 + 2 * 5 + 6 + 1);
    }

    #[test]
    fn test_from_row_restores_record() {
        let record = sample_record();
        let restored = EmployeeMonthRecord::from_row(&record.to_row()).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_from_row_accepts_numbers_and_missing_night() {
        let row: RecordRow = serde_json::from_value(json!({
            "Employee Code": 1042,
            "Employee Name": "Meera",
            "05_Status": "P",
            "05_Check-in": "9:00",
            "05_Check-out": "18:00",
            "05_OT": 1,
            "Total P": "1", "Total A": 0, "Total L": 0,
            "Total WO": 0, "Total HL": 0, "Total PH": 0,
            "OT Hours": 1.5
        }))
        .unwrap();

        let record = EmployeeMonthRecord::from_row(&row).unwrap();
        assert_eq!(record.employee.code, "1042");
        assert_eq!(record.days[&5].overtime_hours, dec("1"));
        assert!(!record.days[&5].night_shift);
        assert_eq!(record.counts.present, 1);
        assert_eq!(record.ot_hours, dec("1.5"));
    }

    #[test]
    fn test_from_row_reports_missing_column() {
        let mut row = sample_record().to_row();
        row.remove("02_Check-out");

        match EmployeeMonthRecord::from_row(&row) {
            Err(EngineError::InvalidRecord { field, message }) => {
                assert_eq!(field, "02_Check-out");
                assert_eq!(message, "missing");
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_from_row_reports_bad_status() {
        let mut row = sample_record().to_row();
        row.insert("01_Status".to_string(), json!("XX"));

        assert!(matches!(
            EmployeeMonthRecord::from_row(&row),
            Err(EngineError::InvalidRecord { field, .. }) if field == "01_Status"
        ));
    }

    #[test]
    fn test_serde_uses_row_form() {
        let record = sample_record();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["01_OT"], json!(2));

        let restored: EmployeeMonthRecord = serde_json::from_value(json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_overtime_written_as_numbers() {
        let mut record = sample_record();
        record.days.get_mut(&2).unwrap().overtime_hours = dec("0.50");
        record.ot_hours = dec("14.3");

        let row = record.to_row();
        assert_eq!(row["02_OT"], json!(0.5));
        assert_eq!(row["OT Hours"], json!(14.3));
        assert!(row["01_OT"].is_i64());

        let restored = EmployeeMonthRecord::from_row(&row).unwrap();
        assert_eq!(restored.days[&2].overtime_hours, dec("0.5"));
        assert_eq!(restored.ot_hours, dec("14.3"));
    }

    #[test]
    fn test_status_counts() {
        let mut counts = StatusCounts::default();
        counts.record(AttendanceStatus::Leave);
        counts.record(AttendanceStatus::Leave);
        counts.record(AttendanceStatus::HalfLeave);

        assert_eq!(counts.get(AttendanceStatus::Leave), 2);
        assert_eq!(counts.get(AttendanceStatus::HalfLeave), 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_day_column_pads_day() {
        assert_eq!(day_column(7, DayField::CheckIn), "07_Check-in");
        assert_eq!(day_column(31, DayField::Night), "31_Night");
    }
}
