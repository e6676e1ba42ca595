//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for the actual work.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::dto::{HealthResponse, ListResponse, PractitionerResponse};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::query::RawParams;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Reports whether the service runs and the store answers.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Practitioners
// =============================================================================

/// GET /api/doctors
///
/// Filtered, sorted, paginated listing. Unknown query parameters are ignored.
pub async fn list_practitioners(
    State(state): State<AppState>,
    Query(params): Query<RawParams>,
) -> HandlerResult<ListResponse> {
    let envelope = db_services::list_practitioners(state.repository.as_ref(), &params).await?;
    Ok(Json(envelope.into()))
}

/// POST /api/doctors
///
/// Validate and persist a new practitioner; answers 201 with the stored record.
pub async fn create_practitioner(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<PractitionerResponse>), AppError> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let created = db_services::create_practitioner(state.repository.as_ref(), &payload).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /api/doctors/{slug}
pub async fn get_practitioner(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> HandlerResult<PractitionerResponse> {
    let practitioner = db_services::get_practitioner(state.repository.as_ref(), &slug).await?;
    Ok(Json(practitioner.into()))
}
