//! Day record composition.
//!
//! Turns a [`DayEntry`] into the stored [`DayRecord`] for that day. Present
//! days run the duration, overtime and night-shift calculations on the
//! entered times; every other status takes fixed placeholder values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AttendancePolicy;
use crate::models::{DayEntry, DayRecord, EntryWarning, TimeOfDay};

use super::night_shift::is_night_shift;
use super::overtime_banding::{OvertimeCalculation, calculate_overtime};
use super::shift_duration::calculate_shift_duration;

/// The outcome of composing one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedDay {
    /// The day number within the month.
    pub day: u32,
    /// The fields to store for the day.
    pub record: DayRecord,
    /// Worked hours, for Present days whose times parsed.
    pub worked_hours: Option<Decimal>,
    /// The overtime calculation, for Present days whose times parsed.
    pub overtime: Option<OvertimeCalculation>,
    /// Set when entered times were replaced by defaults.
    pub warning: Option<EntryWarning>,
}

/// Composes the stored record for one day.
///
/// Present days use the entered times, or the policy's Present defaults when
/// a time is not supplied. If either time fails to parse, both are replaced
/// by the Present defaults, overtime is zero, the night flag is false and a
/// warning is returned instead of an error.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::compose_day;
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::models::{AttendanceStatus, DayEntry};
/// use rust_decimal::Decimal;
///
/// let policy = AttendancePolicy::default();
///
/// let day = compose_day(1, &DayEntry::present("09:00", "18:00"), &policy);
/// assert_eq!(day.record.overtime_hours, Decimal::ONE);
///
/// let day = compose_day(2, &DayEntry::status_only(AttendanceStatus::WeekOff), &policy);
/// assert_eq!(day.record.check_out.to_string(), "17:00");
/// assert_eq!(day.record.overtime_hours, Decimal::ZERO);
///
/// let day = compose_day(3, &DayEntry::present("9h00", "18:00"), &policy);
/// assert!(day.warning.is_some());
/// assert_eq!(day.record.overtime_hours, Decimal::ZERO);
/// ```
pub fn compose_day(day: u32, entry: &DayEntry, policy: &AttendancePolicy) -> ComposedDay {
    let Some(window) = policy.status_defaults.for_status(entry.status) else {
        return compose_present_day(day, entry, policy);
    };

    ComposedDay {
        day,
        record: DayRecord {
            status: entry.status,
            check_in: window.check_in,
            check_out: window.check_out,
            overtime_hours: Decimal::ZERO,
            night_shift: false,
        },
        worked_hours: None,
        overtime: None,
        warning: None,
    }
}

fn compose_present_day(day: u32, entry: &DayEntry, policy: &AttendancePolicy) -> ComposedDay {
    let defaults = policy.present_defaults;
    let parse_or_default = |text: Option<&str>, default: TimeOfDay| match text {
        Some(text) => TimeOfDay::parse(text),
        None => Ok(default),
    };

    let check_in = parse_or_default(entry.check_in.as_deref(), defaults.check_in);
    let check_out = parse_or_default(entry.check_out.as_deref(), defaults.check_out);

    match (check_in, check_out) {
        (Ok(check_in), Ok(check_out)) => {
            let duration = calculate_shift_duration(check_in, check_out);
            let overtime = calculate_overtime(duration.worked_hours, &policy.overtime, day);

            ComposedDay {
                day,
                record: DayRecord {
                    status: entry.status,
                    check_in,
                    check_out,
                    overtime_hours: overtime.overtime_hours,
                    night_shift: is_night_shift(check_in, check_out, &policy.night_shift),
                },
                worked_hours: Some(duration.worked_hours),
                overtime: Some(overtime),
                warning: None,
            }
        }
        (Err(error), _) | (_, Err(error)) => ComposedDay {
            day,
            record: DayRecord {
                status: entry.status,
                check_in: defaults.check_in,
                check_out: defaults.check_out,
                overtime_hours: Decimal::ZERO,
                night_shift: false,
            },
            worked_hours: None,
            overtime: None,
            warning: Some(EntryWarning::invalid_time(
                day,
                format!(
                    "{}; recorded {}-{} with no overtime",
                    error, defaults.check_in, defaults.check_out
                ),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn compose(entry: DayEntry) -> ComposedDay {
        compose_day(1, &entry, &AttendancePolicy::default())
    }

    // ==========================================================================
    // Present days
    // ==========================================================================
    #[test]
    fn test_present_nine_hour_day() {
        let day = compose(DayEntry::present("09:00", "18:00"));

        assert_eq!(day.worked_hours, Some(dec("9.00")));
        assert_eq!(day.record.overtime_hours, dec("1.0"));
        assert!(!day.record.night_shift);
        assert!(day.warning.is_none());
    }

    #[test]
    fn test_present_quarter_to_six() {
        let day = compose(DayEntry::present("09:00", "17:45"));

        assert_eq!(day.worked_hours, Some(dec("8.75")));
        assert_eq!(day.record.overtime_hours, dec("1.0"));
        assert_eq!(
            day.overtime.as_ref().map(|o| o.fraction_hundredths),
            Some(75)
        );
    }

    #[test]
    fn test_present_overnight_shift() {
        let day = compose(DayEntry::present("22:00", "06:00"));

        assert_eq!(day.worked_hours, Some(dec("8.00")));
        assert_eq!(day.record.overtime_hours, Decimal::ZERO);
        assert!(day.record.night_shift);
    }

    #[test]
    fn test_present_times_are_normalized() {
        let day = compose(DayEntry::present("9:05", " 18:10 "));
        assert_eq!(day.record.check_in, t("09:05"));
        assert_eq!(day.record.check_out, t("18:10"));
    }

    #[test]
    fn test_present_without_times_uses_defaults() {
        let day = compose(DayEntry::status_only(AttendanceStatus::Present));

        assert_eq!(day.record.check_in, t("09:00"));
        assert_eq!(day.record.check_out, t("18:00"));
        assert_eq!(day.record.overtime_hours, dec("1"));
        assert!(day.warning.is_none());
    }

    #[test]
    fn test_present_with_only_check_out() {
        let entry = DayEntry {
            status: AttendanceStatus::Present,
            check_in: None,
            check_out: Some("19:00".to_string()),
        };
        let day = compose(entry);
        assert_eq!(day.worked_hours, Some(dec("10")));
        assert_eq!(day.record.overtime_hours, dec("2"));
    }

    #[test]
    fn test_overtime_audit_uses_day_as_step_number() {
        let day = compose_day(
            17,
            &DayEntry::present("09:00", "18:00"),
            &AttendancePolicy::default(),
        );
        assert_eq!(day.overtime.unwrap().audit_step.step_number, 17);
    }

    // ==========================================================================
    // Malformed input
    // ==========================================================================
    #[test]
    fn test_malformed_check_in_falls_back() {
        let day = compose(DayEntry::present("9h00", "18:00"));

        assert_eq!(day.record.status, AttendanceStatus::Present);
        assert_eq!(day.record.check_in, t("09:00"));
        assert_eq!(day.record.check_out, t("18:00"));
        assert_eq!(day.record.overtime_hours, Decimal::ZERO);
        assert!(!day.record.night_shift);
        assert_eq!(day.worked_hours, None);

        let warning = day.warning.unwrap();
        assert_eq!(warning.code, "INVALID_TIME");
        assert_eq!(warning.day, 1);
        assert!(warning.message.contains("9h00"));
    }

    #[test]
    fn test_malformed_check_out_falls_back() {
        let day = compose(DayEntry::present("22:00", "25:00"));

        assert_eq!(day.record.check_in, t("09:00"));
        assert_eq!(day.record.overtime_hours, Decimal::ZERO);
        assert!(!day.record.night_shift);
        assert!(day.warning.unwrap().message.contains("25:00"));
    }

    // ==========================================================================
    // Fixed statuses
    // ==========================================================================
    #[test]
    fn test_week_off_defaults() {
        let day = compose(DayEntry::status_only(AttendanceStatus::WeekOff));

        assert_eq!(day.record.check_in, t("09:00"));
        assert_eq!(day.record.check_out, t("17:00"));
        assert_eq!(day.record.overtime_hours, Decimal::ZERO);
        assert!(!day.record.night_shift);
    }

    #[test]
    fn test_half_leave_defaults() {
        let day = compose(DayEntry::status_only(AttendanceStatus::HalfLeave));
        assert_eq!(day.record.check_in, t("09:00"));
        assert_eq!(day.record.check_out, t("13:00"));
    }

    #[test]
    fn test_midnight_statuses() {
        for status in [
            AttendanceStatus::Absent,
            AttendanceStatus::Leave,
            AttendanceStatus::PublicHoliday,
        ] {
            let day = compose(DayEntry::status_only(status));
            assert_eq!(day.record.status, status);
            assert_eq!(day.record.check_in, TimeOfDay::MIDNIGHT);
            assert_eq!(day.record.check_out, TimeOfDay::MIDNIGHT);
            assert_eq!(day.record.overtime_hours, Decimal::ZERO);
        }
    }

    #[test]
    fn test_fixed_status_ignores_entered_times() {
        let entry = DayEntry {
            status: AttendanceStatus::Leave,
            check_in: Some("21:00".to_string()),
            check_out: Some("not a time".to_string()),
        };
        let day = compose(entry);

        assert_eq!(day.record.check_in, TimeOfDay::MIDNIGHT);
        assert!(!day.record.night_shift);
        assert!(day.warning.is_none());
    }

    // ==========================================================================
    // Determinism
    // ==========================================================================
    #[test]
    fn test_composing_twice_is_identical() {
        let entry = DayEntry::present("21:15", "07:50");
        assert_eq!(compose(entry.clone()), compose(entry));
    }
}
