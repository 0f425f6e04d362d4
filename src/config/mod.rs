//! Configuration loading and management for the Attendance Engine.
//!
//! This module provides functionality to load the attendance policy from a
//! YAML file (overtime banding, night-shift boundaries and per-status default
//! times) and to read the server's runtime settings from the environment.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendance.yaml").unwrap();
//! println!("Loaded policy: {}", config.policy().name);
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::ServerSettings;
pub use types::{
    AttendancePolicy, DEFAULT_BASE_WORKDAY_HOURS, NightShiftPolicy, OvertimePolicy,
    StatusDefaults, TimeWindow,
};
