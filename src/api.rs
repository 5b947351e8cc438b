//! Public API surface for the availability core.
//!
//! This file consolidates the DTO types consumed by HTTP callers and embeds
//! the ID newtypes shared across the crate. All types derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::routes::availability::AvailabilityCheckParams;
pub use crate::routes::availability::AvailabilityCheckResult;
pub use crate::routes::availability::AvailabilityIssue;
pub use crate::routes::availability::ConflictDetails;
pub use crate::routes::availability::IssueKind;
pub use crate::routes::day_schedule::BusySlot;
pub use crate::routes::day_schedule::DayConflicts;

pub use crate::models::time::{TimeOfDay, TimeRange};
pub use crate::models::BookingKind;

use crate::define_id_type;

define_id_type!(i64, BranchId);
define_id_type!(i64, RoomId);
define_id_type!(i64, TeacherId);
define_id_type!(i64, StudentId);
define_id_type!(i64, SubjectId);
define_id_type!(i64, ClassId);
define_id_type!(i64, ScheduleRowId);
define_id_type!(i64, MakeupId);
define_id_type!(i64, TrialId);
define_id_type!(i64, HolidayId);
