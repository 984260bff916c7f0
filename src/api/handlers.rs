//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler converts its request into domain types, runs one pure calculation
//! and returns the result as JSON.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    WorkSessionReport, build_work_session_report, calculate_payroll_with_rules,
    calculate_performance_score_with_weights, count_business_days, leaves_for_period,
    monthly_leave_totals, predict_from_history, predict_next_month_leaves,
    summarize_attendance_days, validate_attendance,
};
use crate::error::EngineError;
use crate::models::{LeavePrediction, PerformanceResult, ValidationInput, ValidationResult};

use super::request::{
    LeavePredictionRequest, PayrollRequest, PerformanceRequest, PredictionSource,
    ValidateAttendanceRequest, WorkSessionsRequest, parse_events,
};
use super::response::{ApiError, ApiErrorResponse, PayrollResponse};
use super::state::AppState;

type HandlerResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/validate", post(validate_attendance_handler))
        .route("/attendance/sessions", post(work_sessions_handler))
        .route("/payroll/calculate", post(payroll_handler))
        .route("/performance/score", post(performance_handler))
        .route("/leaves/predict", post(leave_prediction_handler))
        .with_state(state)
}

/// Handler for POST /attendance/validate.
///
/// Classifies one check-in or check-out as in-office or remote and flags
/// unapproved devices.
async fn validate_attendance_handler(
    payload: Result<Json<ValidateAttendanceRequest>, JsonRejection>,
) -> HandlerResult<ValidationResult> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance validation request");

    let request = extract(correlation_id, payload)?;
    let input = ValidationInput::try_from(request).map_err(|err| failure(correlation_id, err))?;
    let verdict = validate_attendance(&input).map_err(|err| failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        ranges = input.whitelisted_ip_ranges.len(),
        status = ?verdict.status,
        suspicious = verdict.suspicious,
        should_add_to_unverified = verdict.should_add_to_unverified,
        "Attendance validated"
    );
    Ok(Json(verdict))
}

/// Handler for POST /attendance/sessions.
async fn work_sessions_handler(
    payload: Result<Json<WorkSessionsRequest>, JsonRejection>,
) -> HandlerResult<WorkSessionReport> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing work session request");

    let request = extract(correlation_id, payload)?;
    let events = parse_events(&request.events).map_err(|err| failure(correlation_id, err))?;
    let report = build_work_session_report(&events);

    info!(
        correlation_id = %correlation_id,
        events = events.len(),
        sessions = report.sessions.len(),
        incomplete = report.incomplete_count(),
        orphaned_check_outs = report.orphaned_check_outs.len(),
        "Work sessions built"
    );
    Ok(Json(report))
}

/// Handler for POST /payroll/calculate.
///
/// Uses the overtime rules from configuration and wraps the result in an
/// envelope carrying the calculation id and engine version.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> HandlerResult<PayrollResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = extract(correlation_id, payload)?;
    request
        .validate()
        .map_err(|err| failure(correlation_id, err))?;
    let events = parse_events(&request.events).map_err(|err| failure(correlation_id, err))?;

    let config = state.config();
    let start_time = Instant::now();
    let result = calculate_payroll_with_rules(
        &events,
        request.base_salary,
        request.hourly_rate,
        &request.allowances,
        &request.deductions,
        &config.payroll_rules(),
    )
    .map_err(|err| failure(correlation_id, err))?;
    let duration = start_time.elapsed();

    if !result.audit_trace.warnings.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            employee_id = %request.employee_id,
            warnings = result.audit_trace.warnings.len(),
            "Payroll completed with warnings"
        );
    }
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        events_count = events.len(),
        gross_pay = %result.totals.gross_pay,
        net_pay = %result.totals.net_pay,
        duration_us = duration.as_micros(),
        "Payroll calculated successfully"
    );

    Ok(Json(PayrollResponse {
        calculation_id: correlation_id,
        generated_at: Utc::now(),
        engine_version: config.engine().version.clone(),
        employee_id: request.employee_id,
        duration_us: duration.as_micros() as u64,
        result,
    }))
}

/// Handler for POST /performance/score.
///
/// Derives daily attendance from raw events with the configured punctuality
/// policy, keeps approved leave overlapping the period, and scores against
/// the period's business days.
async fn performance_handler(
    State(state): State<AppState>,
    payload: Result<Json<PerformanceRequest>, JsonRejection>,
) -> HandlerResult<PerformanceResult> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing performance request");

    let request = extract(correlation_id, payload)?;
    request
        .validate()
        .map_err(|err| failure(correlation_id, err))?;
    let events = parse_events(&request.events).map_err(|err| failure(correlation_id, err))?;

    let config = state.config();
    let days = summarize_attendance_days(
        &events,
        request.period_start,
        request.period_end,
        &config.punctuality_policy(),
    );
    let leaves = leaves_for_period(&request.leaves, request.period_start, request.period_end);
    let working_days = count_business_days(request.period_start, request.period_end);
    let result = calculate_performance_score_with_weights(
        &days,
        &leaves,
        working_days,
        &config.performance_weights(),
    )
    .map_err(|err| failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        working_days,
        present_days = result.present_days,
        score = %result.score,
        "Performance scored"
    );
    Ok(Json(result))
}

/// Handler for POST /leaves/predict.
async fn leave_prediction_handler(
    payload: Result<Json<LeavePredictionRequest>, JsonRejection>,
) -> HandlerResult<LeavePrediction> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave prediction request");

    let request = extract(correlation_id, payload)?;
    let source = PredictionSource::try_from(request).map_err(|err| failure(correlation_id, err))?;

    let prediction = match source {
        PredictionSource::History(history) => predict_from_history(&history),
        PredictionSource::Records {
            leaves,
            reference_date,
        } => monthly_leave_totals(&leaves, reference_date)
            .and_then(|totals| predict_next_month_leaves(&totals)),
    }
    .map_err(|err| failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        predicted = %prediction.predicted,
        trend_increasing = prediction.trend_increasing,
        "Leave prediction completed"
    );
    Ok(Json(prediction))
}

/// Unwraps a JSON body, mapping rejections to 400 responses.
fn extract<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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
    Err(ApiErrorResponse::bad_request(error))
}

/// Logs a failed request and converts the error for the response.
fn failure(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    error.into()
}
