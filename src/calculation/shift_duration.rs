//! Shift duration calculation.
//!
//! Converts a check-in/check-out pair into worked hours. A check-out that is
//! not strictly after the check-in is taken to fall on the next day.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{MINUTES_PER_DAY, TimeOfDay};

/// The worked time for one check-in/check-out pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDuration {
    /// Worked hours, rounded to two decimal places.
    pub worked_hours: Decimal,
    /// Worked minutes before conversion to hours.
    pub worked_minutes: u32,
    /// Whether the check-out was moved to the following day.
    pub crosses_midnight: bool,
}

/// Calculates worked hours between a check-in and a check-out.
///
/// When `check_out <= check_in` the shift is treated as crossing midnight
/// and 24 hours are added to the check-out. Equal times therefore give a
/// full 24-hour shift.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::calculate_shift_duration;
/// use attendance_engine::models::TimeOfDay;
/// use rust_decimal::Decimal;
///
/// let day = calculate_shift_duration(
///     TimeOfDay::parse("09:00").unwrap(),
///     TimeOfDay::parse("17:45").unwrap(),
/// );
/// assert_eq!(day.worked_hours, Decimal::new(875, 2));
///
/// let night = calculate_shift_duration(
///     TimeOfDay::parse("22:00").unwrap(),
///     TimeOfDay::parse("06:00").unwrap(),
/// );
/// assert_eq!(night.worked_hours, Decimal::new(8, 0));
/// assert!(night.crosses_midnight);
/// ```
pub fn calculate_shift_duration(check_in: TimeOfDay, check_out: TimeOfDay) -> ShiftDuration {
    let start = check_in.minutes_from_midnight();
    let end = adjusted_check_out_minutes(check_in, check_out);
    let worked_minutes = end - start;

    let worked_hours = (Decimal::from(worked_minutes) / Decimal::from(60))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    ShiftDuration {
        worked_hours,
        worked_minutes,
        crosses_midnight: end >= MINUTES_PER_DAY,
    }
}

/// Returns the check-out as minutes from the check-in day's midnight.
///
/// Check-outs that are not strictly after the check-in gain a day.
pub(crate) fn adjusted_check_out_minutes(check_in: TimeOfDay, check_out: TimeOfDay) -> u32 {
    let end = check_out.minutes_from_midnight();
    if end <= check_in.minutes_from_midnight() {
        end + MINUTES_PER_DAY
    } else {
        end
    }
}
