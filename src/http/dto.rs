//! Data Transfer Objects for the HTTP API.
//!
//! Most request/response types are re-exported from the routes module since
//! they already derive Serialize/Deserialize; only the wrappers specific to
//! the HTTP surface live here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Availability check
    AvailabilityCheckParams, AvailabilityCheckResult, AvailabilityIssue, ConflictDetails,
    IssueKind,
    // Day timeline
    BusySlot, DayConflicts,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
    /// Data source status
    pub database: String,
}

/// Query parameters for the day timeline endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayScheduleQuery {
    /// Date to render, ISO format (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// Response for cache invalidation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidateCacheResponse {
    /// Message about the operation
    pub message: String,
}
