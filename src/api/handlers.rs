//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::compose_day;
use crate::error::EngineError;
use crate::export::{XLSX_CONTENT_TYPE, XLSX_FILE_NAME, export_records, export_table_to_xlsx};
use crate::models::{DayEntry, Period, Roster};
use crate::store::SaveOutcome;

use super::request::{ComposeRequest, PeriodRequest, RosterRequest};
use super::response::{ApiError, ApiErrorResponse, EmployeeResponse, RosterResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/roster", post(load_roster_handler))
        .route("/period", put(set_period_handler))
        .route("/employee", get(current_employee_handler))
        .route("/days/:day", put(enter_day_handler))
        .route("/next", post(next_handler))
        .route("/previous", post(previous_handler))
        .route("/compose", post(compose_handler))
        .route("/export", get(export_handler))
        .route("/export.xlsx", get(export_xlsx_handler))
        .route("/reset", post(reset_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /roster.
///
/// Replaces the roster. A rejected upload leaves the previous roster in place.
async fn load_roster_handler(
    State(state): State<AppState>,
    payload: Result<Json<RosterRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing roster upload");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let roster = match Roster::from_rows(&request.rows) {
        Ok(roster) => roster,
        Err(err) => return error_response(correlation_id, err),
    };

    let employees = state.session().load_roster(roster);
    info!(
        correlation_id = %correlation_id,
        rows = request.rows.len(),
        employees,
        "Roster loaded"
    );
    json_response(StatusCode::OK, RosterResponse { employees })
}

/// Handler for PUT /period.
async fn set_period_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match Period::new(request.year, request.month) {
        Ok(period) => {
            let change = state.session().set_period(period);
            json_response(StatusCode::OK, change)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employee.
///
/// Returns the record of the employee being edited, opening it if needed.
async fn current_employee_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let mut session = state.session();

    let index = session.current_index();
    let total = session.roster().len();
    let period = session.period();

    match session.current_record() {
        Ok(record) => {
            let body = EmployeeResponse {
                index,
                total,
                period,
                employee: record.employee.clone(),
                counts: record.counts,
                ot_hours: record.ot_hours,
                preview: export_records(std::slice::from_ref(record)),
            };
            json_response(StatusCode::OK, body)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /days/:day.
///
/// Records one day for the current employee and saves the record. When
/// neither sink accepts the save, the day result is still returned, with
/// status 503.
async fn enter_day_handler(
    State(state): State<AppState>,
    day: Result<Path<u32>, PathRejection>,
    payload: Result<Json<DayEntry>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let day = match day {
        Ok(Path(day)) => day,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid day path");
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_DAY", rejection.body_text()),
            );
        }
    };
    let entry = match payload {
        Ok(Json(entry)) => entry,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = state.session().enter_day(day, &entry);
    match result {
        Ok(update) => {
            let status = match update.save.outcome {
                SaveOutcome::BothFailed => {
                    error!(
                        correlation_id = %correlation_id,
                        index = update.index,
                        day,
                        "Day entered but not saved"
                    );
                    StatusCode::SERVICE_UNAVAILABLE
                }
                _ => {
                    info!(
                        correlation_id = %correlation_id,
                        index = update.index,
                        day,
                        status = %update.composed.record.status,
                        overtime_hours = %update.composed.record.overtime_hours,
                        ot_total = %update.ot_hours,
                        "Day entered"
                    );
                    StatusCode::OK
                }
            };
            json_response(status, update)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /next.
async fn next_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.session().next();
    match result {
        Ok(navigation) => {
            info!(
                correlation_id = %correlation_id,
                current_index = navigation.current_index,
                complete = navigation.complete,
                "Moved to next employee"
            );
            json_response(StatusCode::OK, navigation)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /previous.
async fn previous_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.session().previous();
    match result {
        Ok(navigation) => json_response(StatusCode::OK, navigation),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /compose.
///
/// Composes one day under the loaded policy without touching the session.
async fn compose_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComposeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let day = request.day;
    let composed = compose_day(day, &request.into(), state.config().policy());
    if let Some(warning) = &composed.warning {
        warn!(correlation_id = %correlation_id, day, message = %warning.message, "Compose warning");
    }
    json_response(StatusCode::OK, composed)
}

/// Handler for GET /export.
async fn export_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.session().export();
    match result {
        Ok(table) => {
            info!(correlation_id = %correlation_id, rows = table.len(), "Export served");
            json_response(StatusCode::OK, table)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /export.xlsx.
///
/// Serves the same table as `GET /export` as an Excel download.
async fn export_xlsx_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state
        .session()
        .export()
        .and_then(|table| Ok((table.len(), export_table_to_xlsx(&table)?)));
    match result {
        Ok((rows, bytes)) => {
            info!(
                correlation_id = %correlation_id,
                rows,
                bytes = bytes.len(),
                "Workbook export served"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", XLSX_FILE_NAME),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /reset.
async fn reset_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.session().reset();
    match result {
        Ok(()) => {
            info!(correlation_id = %correlation_id, "All records reset");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}
