//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{DayScheduleQuery, HealthResponse, InvalidateCacheResponse};
use super::error::AppError;
use super::state::AppState;
use crate::api::{AvailabilityCheckParams, AvailabilityCheckResult, BranchId, DayConflicts};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the data source
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Availability
// =============================================================================

/// POST /v1/availability/check
///
/// Check whether a proposed booking slot is free. Never fails at the HTTP
/// level for scheduling reasons: conflicts and degraded checks are reported
/// in the result body.
pub async fn check_availability(
    State(state): State<AppState>,
    Json(params): Json<AvailabilityCheckParams>,
) -> HandlerResult<AvailabilityCheckResult> {
    let result = services::check_availability(state.repository.as_ref(), &params).await;
    Ok(Json(result))
}

/// GET /v1/branches/{branch_id}/day-schedule?date=YYYY-MM-DD
///
/// Render the busy-slot timeline for one branch and date.
pub async fn day_schedule(
    State(state): State<AppState>,
    Path(branch_id): Path<i64>,
    Query(query): Query<DayScheduleQuery>,
) -> HandlerResult<DayConflicts> {
    let conflicts = services::day_conflicts(
        state.repository.as_ref(),
        &state.reference_cache,
        query.date,
        BranchId::new(branch_id),
    )
    .await?;
    Ok(Json(conflicts))
}

// =============================================================================
// Cache Management
// =============================================================================

/// POST /v1/cache/invalidate
///
/// Drop the cached reference data snapshot after branches, rooms, teachers or
/// subjects change.
pub async fn invalidate_cache(
    State(state): State<AppState>,
) -> HandlerResult<InvalidateCacheResponse> {
    state.reference_cache.invalidate();
    Ok(Json(InvalidateCacheResponse {
        message: "Reference cache invalidated".to_string(),
    }))
}
