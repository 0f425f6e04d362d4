//! Monthly aggregation.
//!
//! Derives the per-status day counts and the overtime total for one
//! employee's month, and removes day records that fall outside the month.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{DayRecord, EmployeeMonthRecord, Period, StatusCounts};

/// Returns the number of days in a month.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidPeriod`] if the month is not
/// in `1..=12` or the year is out of range.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert_eq!(days_in_month(2023, 2).unwrap(), 28);
/// assert!(days_in_month(2024, 13).is_err());
/// ```
pub fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    Ok(Period::new(year, month)?.days_in_month())
}

/// Aggregated figures for one employee's month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Day counts per status.
    pub counts: StatusCounts,
    /// Total overtime, rounded to one decimal place.
    pub ot_hours: Decimal,
    /// Number of days that contributed.
    pub days_counted: u32,
}

/// Aggregates the day records that fall within `1..=days_in_month`.
///
/// Days keyed outside the month are ignored.
pub fn aggregate_month(days: &BTreeMap<u32, DayRecord>, days_in_month: u32) -> MonthlySummary {
    let mut counts = StatusCounts::default();
    let mut total = Decimal::ZERO;
    let mut days_counted = 0;

    let in_month = days
        .iter()
        .filter(|(day, _)| (1..=days_in_month).contains(*day))
        .map(|(_, record)| record);

    for record in in_month {
        counts.record(record.status);
        total += record.overtime_hours;
        days_counted += 1;
    }

    MonthlySummary {
        counts,
        ot_hours: total.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        days_counted,
    }
}

/// Removes day records keyed beyond the month's length.
///
/// Returns the removed day numbers in ascending order.
pub fn purge_stale_days(days: &mut BTreeMap<u32, DayRecord>, days_in_month: u32) -> Vec<u32> {
    let stale = days.split_off(&(days_in_month + 1));
    let mut removed: Vec<u32> = stale.into_keys().collect();

    // Day zero is never valid either.
    if days.remove(&0).is_some() {
        removed.insert(0, 0);
    }

    removed
}

/// Inserts a record for every day of the month that has none.
///
/// `fill` builds the record for a missing day. Returns the filled day
/// numbers in ascending order.
pub fn fill_missing_days<F>(
    days: &mut BTreeMap<u32, DayRecord>,
    days_in_month: u32,
    fill: F,
) -> Vec<u32>
where
    F: Fn(u32) -> DayRecord,
{
    let missing: Vec<u32> = (1..=days_in_month)
        .filter(|day| !days.contains_key(day))
        .collect();
    for day in &missing {
        days.insert(*day, fill(*day));
    }
    missing
}

/// Purges stale days from a record and refreshes its counts and total.
///
/// Returns the removed day numbers.
pub fn recompute_month(record: &mut EmployeeMonthRecord, period: Period) -> Vec<u32> {
    let removed = purge_stale_days(&mut record.days, period.days_in_month());
    let summary = aggregate_month(&record.days, period.days_in_month());
    record.counts = summary.counts;
    record.ot_hours = summary.ot_hours;
    removed
}
