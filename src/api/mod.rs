//! HTTP API module for the Attendance Engine.
//!
//! This module provides the REST endpoints for loading a roster, entering
//! days for the current employee, moving through the roster, and exporting
//! the saved records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ComposeRequest, PeriodRequest, RosterRequest};
pub use response::{ApiError, EmployeeResponse, RosterResponse};
pub use state::AppState;
