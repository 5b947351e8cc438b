//! Conflict classifier: partitions raw overlaps into hard issues and soft
//! warnings.
//!
//! This asymmetric policy is the central business rule of the module:
//! committing a new recurring class must never silently collide with another
//! class or a committed makeup, but placing a makeup or trial (exceptional,
//! staff-mediated bookings) should inform rather than block. Trials never
//! block anything.

use crate::models::BookingKind;
use crate::routes::availability::{AvailabilityIssue, ConflictDetails, IssueKind};
use crate::services::overlap::{Dimension, RawConflict};

/// Partitioned conflicts for one scan dimension.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub issues: Vec<AvailabilityIssue>,
    pub warnings: Vec<AvailabilityIssue>,
}

impl Classified {
    pub fn merge(mut self, other: Classified) -> Classified {
        self.issues.extend(other.issues);
        self.warnings.extend(other.warnings);
        self
    }
}

/// Classify the raw conflicts found along one dimension.
///
/// Rules, per conflict:
/// - against a class or committed makeup: Issue, unless the booking being
///   checked is itself a makeup or trial, or `allow_conflicts` is set, in
///   which case it becomes a Warning;
/// - against a trial: always a Warning.
///
/// Holiday blocks never pass through here; the orchestrator emits them as
/// Issues directly and they are never reclassified.
pub fn classify(
    dimension: Dimension,
    conflicts: Vec<RawConflict>,
    checking_kind: BookingKind,
    allow_conflicts: bool,
) -> Classified {
    let mut out = Classified::default();
    for conflict in conflicts {
        let soft = match conflict.booking_kind {
            BookingKind::Trial => true,
            BookingKind::Class | BookingKind::Makeup => {
                allow_conflicts
                    || matches!(checking_kind, BookingKind::Makeup | BookingKind::Trial)
            }
        };

        let issue = AvailabilityIssue {
            kind: dimension.issue_kind(),
            message: message_for(dimension, &conflict),
            details: Some(ConflictDetails {
                conflict_kind: Some(conflict.booking_kind),
                conflict_name: conflict.display_name,
                conflict_time: conflict.range.to_string(),
            }),
        };

        if soft {
            out.warnings.push(issue);
        } else {
            out.issues.push(issue);
        }
    }
    out
}

fn message_for(dimension: Dimension, conflict: &RawConflict) -> String {
    match dimension {
        Dimension::Room => format!(
            "Room is already booked: {} ({})",
            conflict.display_name, conflict.range
        ),
        Dimension::Teacher => format!(
            "Teacher is not available: {} ({})",
            conflict.display_name, conflict.range
        ),
    }
}
