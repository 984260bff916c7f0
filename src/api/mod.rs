//! HTTP API module for the attendance engine.
//!
//! This module exposes the calculations as JSON endpoints. It holds no
//! persistence and no authentication; callers send already-fetched rows and
//! receive verdicts, payroll summaries, scores and predictions.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceEventRequest, IpRangeRequest, LeavePredictionRequest, PayrollRequest,
    PerformanceRequest, PredictionSource, ValidateAttendanceRequest, WorkSessionsRequest,
};
pub use response::{ApiError, ApiErrorResponse, PayrollResponse};
pub use state::AppState;
