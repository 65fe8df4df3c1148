//! HTTP route handlers for the calculator API

use super::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::math::BinaryOp;

// ============================================================================
// Health Check
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

// ============================================================================
// Structured Calculation
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CalcRequest {
    pub op: BinaryOp,
    pub a: f64,
    pub b: f64,
}

/// POST /api/calc
///
/// Body shape errors and non-finite operands are `invalid_input`; a division
/// by zero is its own error so clients can tell the cases apart.
pub async fn calc(
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> impl IntoResponse {
    let body = body.map(|Json(value)| value).unwrap_or_else(|| json!({}));

    let req: CalcRequest = match serde_json::from_value(body) {
        Ok(req) => req,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_input" })),
            )
                .into_response()
        }
    };

    if !req.a.is_finite() || !req.b.is_finite() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_input" })),
        )
            .into_response();
    }

    match req.op.apply(req.a, req.b) {
        Ok(result) => {
            let entry = state.history.record_calc(req.op, req.a, req.b, result);
            Json(json!({ "result": result, "entry": entry })).into_response()
        }
        // the only arithmetic failure here is division by zero
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "division_by_zero" })),
        )
            .into_response(),
    }
}

// ============================================================================
// Natural-Language Calculation
// ============================================================================

/// POST /api/nl-calc
pub async fn nl_calc(
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> impl IntoResponse {
    let body = body.map(|Json(value)| value).unwrap_or_else(|| json!({}));

    let query = match body.get("query").and_then(|q| q.as_str()) {
        Some(q) if !q.trim().is_empty() => q.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_query" })),
            )
                .into_response()
        }
    };

    let parsed = match state.parser.parse(&query) {
        Some(parsed) => parsed,
        None => {
            tracing::debug!(query = %query, "no phrase pattern matched");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "unrecognized_expression" })),
            )
                .into_response();
        }
    };

    match parsed.op.apply(parsed.a, parsed.b) {
        Ok(result) => {
            let entry = state.history.record_nl_calc(
                parsed.op,
                parsed.a,
                parsed.b,
                result,
                &query,
                &parsed.normalized,
            );
            Json(json!({ "result": result, "entry": entry })).into_response()
        }
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "division_by_zero" })),
        )
            .into_response(),
    }
}

// ============================================================================
// History
// ============================================================================

/// GET /api/history
pub async fn get_history(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "items": state.history.list() }))
}

/// DELETE /api/history
pub async fn clear_history(State(state): State<AppState>) -> impl IntoResponse {
    state.history.clear();
    StatusCode::NO_CONTENT
}
