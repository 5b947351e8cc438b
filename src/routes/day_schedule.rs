use serde::{Deserialize, Serialize};

use crate::api::{RoomId, TeacherId};
use crate::models::{BookingKind, TimeOfDay};

/// One occupied slot in a branch day timeline.
///
/// Carries enough denormalized display data for a UI to render without
/// further lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusySlot {
    pub kind: BookingKind,
    /// Class name, or a makeup/trial label.
    pub name: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub room_id: RoomId,
    pub room_name: String,
    pub teacher_id: TeacherId,
    pub teacher_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    /// Students in the slot; populated for makeups and trials (grouped slots
    /// list every student sharing the slot).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub student_names: Vec<String>,
    /// Session counter for class slots, e.g. session 3 of 24.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sessions: Option<u32>,
    pub completed: bool,
}

/// Full busy-slot timeline for a branch on a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayConflicts {
    pub is_holiday: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
    /// All occupied slots, sorted by start time.
    pub busy_slots: Vec<BusySlot>,
}

/// Day schedule route function name constant
pub const GET_DAY_CONFLICTS: &str = "get_day_conflicts";
