//! Attendance period model.
//!
//! This module contains the [`Period`] type, the calendar month that day
//! records are entered for.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// A calendar month with its Gregorian length.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Period;
///
/// assert_eq!(Period::new(2024, 2).unwrap().days_in_month(), 29);
/// assert_eq!(Period::new(2023, 2).unwrap().days_in_month(), 28);
/// assert!(Period::new(2023, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    year: i32,
    month: u32,
    days_in_month: u32,
}

impl Period {
    /// Creates a period for a year and month (1-12).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] when the month is out of range
    /// or the month cannot be represented as a calendar date.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod { year, month };

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            days_in_month: (next_first - first).num_days() as u32,
        })
    }

    /// Returns the period containing today's local date.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
            days_in_month: days_in(today),
        }
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    /// Returns true if `day` is a valid day number in this month.
    pub fn contains_day(&self, day: u32) -> bool {
        (1..=self.days_in_month).contains(&day)
    }
}

fn days_in(date: NaiveDate) -> u32 {
    // Largest day number the month accepts.
    (28..=31)
        .rev()
        .find(|day| date.with_day(*day).is_some())
        .unwrap_or(28)
}
