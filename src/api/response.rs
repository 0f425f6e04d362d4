//! Response types for the Attendance Engine API.
//!
//! This module defines the response bodies and the mapping from engine
//! errors to HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::export::ExportTable;
use crate::models::{Employee, Period, StatusCounts};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidTime { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::new("INVALID_TIME", message))
            }
            EngineError::InvalidStatus { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_STATUS",
                    message,
                    "Status must be one of P, A, L, WO, HL, PH",
                ),
            ),
            EngineError::InvalidPeriod { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::new("INVALID_PERIOD", message))
            }
            EngineError::InvalidDay { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::new("INVALID_DAY", message))
            }
            EngineError::MissingRosterColumn { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "MISSING_COLUMN",
                    message,
                    "Roster rows must include 'Employee Code' and 'Employee Name'",
                ),
            ),
            EngineError::NoRoster => (
                StatusCode::CONFLICT,
                ApiError::with_details("NO_ROSTER", message, "Upload a roster with POST /roster"),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::InvalidRecord { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("INVALID_RECORD", message),
            ),
            EngineError::StoreError { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new("STORE_ERROR", message),
            ),
            EngineError::ExportError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("EXPORT_ERROR", message),
            ),
            EngineError::SaveFailed { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::with_details("SAVE_FAILED", "Save failed", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Response body for `POST /roster`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResponse {
    /// Number of distinct employees loaded.
    pub employees: usize,
}

/// Response body for `GET /employee`.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    /// Roster position of the employee.
    pub index: usize,
    /// Number of employees in the roster.
    pub total: usize,
    /// The active month.
    pub period: Period,
    /// The employee.
    pub employee: Employee,
    /// Day counts per status.
    pub counts: StatusCounts,
    /// Overtime total for the month.
    pub ot_hours: Decimal,
    /// The record as a one-row table in display order.
    pub preview: ExportTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_day_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidDay {
            day: 30,
            days_in_month: 29,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_DAY");
        assert!(api_error.error.message.contains("30"));
    }

    #[test]
    fn test_no_roster_maps_to_409() {
        let api_error: ApiErrorResponse = EngineError::NoRoster.into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "NO_ROSTER");
    }

    #[test]
    fn test_save_failed_maps_to_503() {
        let api_error: ApiErrorResponse = EngineError::SaveFailed {
            store: "disk full".to_string(),
            backup: "offline".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(api_error.error.details.unwrap().contains("disk full"));
    }

    #[test]
    fn test_export_error_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::ExportError {
            message: "sheet name too long".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "EXPORT_ERROR");
    }
}
