//! Attendance Engine for monthly attendance entry
//!
//! This crate records an employee's attendance for a calendar month and
//! derives worked hours, banded overtime and a night-shift flag for each day,
//! together with per-status day counts and the monthly overtime total.
//! Records are persisted to a keyed record store and an append-only backup.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod session;
pub mod store;
