//! Calculation logic for the Attendance Engine.
//!
//! This module contains the pure functions that derive a day's stored fields
//! from clock times and a status: shift duration with overnight wraparound,
//! banded overtime, night-shift classification, day composition, and the
//! monthly aggregation of status counts and overtime.

mod day_composer;
mod monthly_aggregate;
mod night_shift;
mod overtime_banding;
mod shift_duration;

pub use day_composer::{ComposedDay, compose_day};
pub use monthly_aggregate::{
    MonthlySummary, aggregate_month, days_in_month, fill_missing_days, purge_stale_days,
    recompute_month,
};
pub use night_shift::{classify_night_shift, is_night_shift};
pub use overtime_banding::{OvertimeBand, OvertimeCalculation, calculate_overtime};
pub use shift_duration::{ShiftDuration, calculate_shift_duration};
