use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use seatplan_core::models::{OptimizeRequest, OptimizeResponse};
use seatplan_core::{solve, SolveError};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Error surface of the optimize endpoint: 422 for anything wrong with the
/// request (malformed JSON, type mismatches, domain validation), 500 for
/// internal defects. Bodies carry a human-readable `detail` field.
pub enum ApiError {
    Unprocessable(String),
    Internal(String),
}

impl From<SolveError> for ApiError {
    fn from(err: SolveError) -> Self {
        if err.is_validation() {
            ApiError::Unprocessable(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Unprocessable(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            ApiError::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// `POST /v1/optimize`: validates and solves one seating instance.
///
/// The solve blocks for up to the request's time limit, so it runs on the
/// blocking thread pool. A client that disconnects mid-solve does not cancel
/// the computation; it runs to its own budget.
pub async fn optimize_handler(
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))?;

    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        tables = request.tables.len(),
        guests = request.guests.len(),
        groups = request.groups.len(),
        affinities = request.affinities.len(),
        "optimize request received"
    );

    let response = tokio::task::spawn_blocking(move || solve(&request))
        .await
        .map_err(|join_err| ApiError::Internal(format!("solver task failed: {join_err}")))??;

    tracing::info!(
        %request_id,
        status = ?response.status,
        objective = ?response.objective_value,
        wall_time_seconds = response.solver_stats.wall_time_seconds,
        "optimize request finished"
    );
    Ok(Json(response))
}
