//! HTTP request handlers

use super::types::{
    CalculateRequest, CalculateResponse, ErrorResponse, HelloResponse, KeypadRequest,
    KeypadResponse, StatusResponse,
};
use super::AppState;
use crate::arithmetic::{evaluate_batch, ArithmeticError, Operation};
use crate::db::{CalculationLog, RECENT_LOG_LIMIT};
use crate::runtime::run_events;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

const INVALID_INPUT: &str = "Invalid input data";
const UNSUPPORTED_OPERATION: &str = "Unsupported operation";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/api/hello", get(hello))
        .route("/api/status", get(status))
        // Batch arithmetic
        .route("/api/calculate", post(calculate))
        .route("/api/calculation-logs", get(calculation_logs))
        // Server-side keypad
        .route("/api/keypad", post(keypad))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Liveness
// ============================================================

async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from API!".to_string(),
    })
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// ============================================================
// Batch Arithmetic
// ============================================================

async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected calculate body");
        AppError::BadRequest(INVALID_INPUT.to_string())
    })?;

    let (Some(operation), Some(operands)) = (req.operation, req.operands) else {
        return Err(AppError::BadRequest(INVALID_INPUT.to_string()));
    };
    if operation.is_empty() || operands.is_empty() {
        return Err(AppError::BadRequest(INVALID_INPUT.to_string()));
    }

    let op = Operation::from_name(&operation)
        .map_err(|_| AppError::BadRequest(UNSUPPORTED_OPERATION.to_string()))?;

    let result = evaluate_batch(op, &operands).map_err(|e| {
        tracing::info!(operation = %op, error = %e, "Calculation rejected");
        AppError::from(e)
    })?;

    tracing::info!(operation = %op, operands = operands.len(), result, "Calculation completed");
    state.recorder.record_in_background(op, operands, result);

    Ok(Json(CalculateResponse { result }))
}

async fn calculation_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<CalculationLog>>, AppError> {
    let logs = state
        .recorder
        .recent(RECENT_LOG_LIMIT)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error fetching calculation logs");
            AppError::Internal(e)
        })?;
    Ok(Json(logs))
}

// ============================================================
// Server-side Keypad
// ============================================================

async fn keypad(
    State(state): State<AppState>,
    payload: Result<Json<KeypadRequest>, JsonRejection>,
) -> Result<Json<KeypadResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let initial = req.state.unwrap_or_default();
    initial
        .validate()
        .map_err(|e| AppError::BadRequest(format!("Invalid state: {e}")))?;

    let (new_state, effects) = run_events(initial, &state.engine, req.events);
    state.recorder.execute_effects(&effects);

    Ok(Json(KeypadResponse {
        display: new_state.display().to_string(),
        state: new_state,
    }))
}

async fn get_version() -> &'static str {
    concat!("calc-engine ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<ArithmeticError> for AppError {
    fn from(e: ArithmeticError) -> Self {
        match e {
            ArithmeticError::UnsupportedOperation(_) => {
                AppError::BadRequest(UNSUPPORTED_OPERATION.to_string())
            }
            ArithmeticError::EmptyOperands => AppError::BadRequest(INVALID_INPUT.to_string()),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
