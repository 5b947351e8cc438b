use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{BranchId, RoomId, TeacherId};
use crate::models::{BookingKind, TimeOfDay};

/// Proposed booking to check for availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityCheckParams {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub branch_id: BranchId,
    pub room_id: RoomId,
    pub teacher_id: TeacherId,
    /// What kind of booking is being placed.
    pub kind: BookingKind,
    /// When re-checking an edit: the id of the booking being edited (of the
    /// same kind as `kind`), excluded from self-conflict.
    #[serde(default)]
    pub exclude_id: Option<i64>,
    /// Downgrade all conflicts to warnings (staff override).
    #[serde(default)]
    pub allow_conflicts: bool,
}

/// Category of an availability conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    RoomConflict,
    TeacherConflict,
    Holiday,
}

/// Denormalized display data for a single conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictDetails {
    /// Kind of the existing booking collided with; `None` for holidays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_kind: Option<BookingKind>,
    pub conflict_name: String,
    /// `"HH:MM-HH:MM"` slot of the existing booking, or the holiday name.
    pub conflict_time: String,
}

/// One conflict found during an availability check.
///
/// The same shape serves both hard failures (`reasons`) and soft advisories
/// (`warnings`); only the list it lands in differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ConflictDetails>,
}

/// Outcome of an availability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityCheckResult {
    pub available: bool,
    /// Hard conflicts; the booking must not be committed while non-empty.
    pub reasons: Vec<AvailabilityIssue>,
    /// Soft advisories; may be non-empty even when `available` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<AvailabilityIssue>>,
}

impl AvailabilityCheckResult {
    /// Build a result from partitioned conflicts; `available` is derived,
    /// never stored independently.
    pub fn from_conflicts(
        reasons: Vec<AvailabilityIssue>,
        warnings: Vec<AvailabilityIssue>,
    ) -> Self {
        Self {
            available: reasons.is_empty(),
            reasons,
            warnings: if warnings.is_empty() {
                None
            } else {
                Some(warnings)
            },
        }
    }
}

/// Availability route function name constant
pub const CHECK_AVAILABILITY: &str = "check_availability";
