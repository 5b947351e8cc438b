//! Generic overlap scanner.
//!
//! Finds all existing bookings on a date whose time range overlaps a
//! requested range, along one dimension (room or teacher). The three booking
//! sources are scanned concurrently; a failed source degrades to "no
//! conflicts found from that source" rather than aborting the whole check,
//! and the degradation is reported in `ScanOutcome::degraded_sources` so
//! callers can tell a clean scan from a partial one.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

use crate::api::{BranchId, MakeupId, RoomId, ScheduleRowId, StudentId, TeacherId};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::{
    BookingKind, MakeupSchedule, MakeupSession, ScheduleRowStatus, TimeOfDay, TimeRange,
};
use crate::routes::availability::IssueKind;

/// Axis along which conflicts are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Room,
    Teacher,
}

impl Dimension {
    pub fn issue_kind(&self) -> IssueKind {
        match self {
            Dimension::Room => IssueKind::RoomConflict,
            Dimension::Teacher => IssueKind::TeacherConflict,
        }
    }
}

/// Inputs for one scan pass.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub dimension: Dimension,
    pub date: NaiveDate,
    pub range: TimeRange,
    pub branch_id: BranchId,
    pub room_id: RoomId,
    pub teacher_id: TeacherId,
    /// What kind of booking is being placed (drives the skip/exclusion rules).
    pub checking_kind: BookingKind,
    /// Id of the booking under edit, of kind `checking_kind`.
    pub exclude_id: Option<i64>,
}

/// One overlapping booking found by a scan.
///
/// Makeups and trials colliding at the same time slot are grouped into one
/// raw conflict listing every student sharing the slot.
#[derive(Debug, Clone)]
pub struct RawConflict {
    pub booking_kind: BookingKind,
    pub display_name: String,
    pub range: TimeRange,
    pub source_ids: Vec<i64>,
}

/// Result of one scan pass, separating found conflicts from sources that
/// could not be read (the soft failure channel).
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub conflicts: Vec<RawConflict>,
    pub degraded_sources: Vec<BookingKind>,
}

/// Scan the three booking sources for overlaps along `req.dimension`.
pub async fn find_overlaps(repo: &dyn FullRepository, req: &ScanRequest) -> ScanOutcome {
    let (classes, makeups, trials) = tokio::join!(
        scan_classes(repo, req),
        scan_makeups(repo, req),
        scan_trials(repo, req),
    );

    let mut outcome = ScanOutcome::default();
    for (kind, result) in [
        (BookingKind::Class, classes),
        (BookingKind::Makeup, makeups),
        (BookingKind::Trial, trials),
    ] {
        match result {
            Ok(conflicts) => outcome.conflicts.extend(conflicts),
            Err(e) => {
                tracing::warn!(
                    source = %kind,
                    dimension = ?req.dimension,
                    date = %req.date,
                    error = %e,
                    "overlap sub-scan failed, treating source as conflict-free"
                );
                outcome.degraded_sources.push(kind);
            }
        }
    }
    outcome
}

/// Class scan: recurring classes whose fixed weekly slot overlaps the range.
///
/// A class is only a candidate when its status occupies slots, the weekday
/// and date range match, and a non-cancelled schedule row confirms a session
/// on the exact date (the row lookups are batched into one concurrent group).
async fn scan_classes(
    repo: &dyn FullRepository,
    req: &ScanRequest,
) -> RepositoryResult<Vec<RawConflict>> {
    let candidates = match req.dimension {
        Dimension::Room => {
            repo.list_classes_for_room(req.branch_id, req.room_id)
                .await?
        }
        // The teacher scan ignores branch: the same person cannot teach in
        // two branches at once.
        Dimension::Teacher => repo.list_classes_for_teacher(req.teacher_id).await?,
    };

    let excluded_class = match req.checking_kind {
        BookingKind::Class => req.exclude_id,
        _ => None,
    };

    let candidates: Vec<_> = candidates
        .into_iter()
        .filter(|c| c.status.occupies_slots())
        .filter(|c| c.covers_date(req.date))
        .filter(|c| excluded_class != Some(c.id.value()))
        .filter(|c| c.time_range().overlaps(&req.range))
        .collect();

    let lookups = candidates
        .iter()
        .map(|c| repo.schedule_row_on(c.id, req.date));
    let rows = futures::future::join_all(lookups).await;

    let mut conflicts = Vec::new();
    for (class, row) in candidates.iter().zip(rows) {
        let Some(row) = row? else {
            continue;
        };
        if row.status == ScheduleRowStatus::Cancelled {
            continue;
        }
        conflicts.push(RawConflict {
            booking_kind: BookingKind::Class,
            display_name: class.name.clone(),
            range: class.time_range(),
            source_ids: vec![class.id.value()],
        });
    }
    Ok(conflicts)
}

/// Makeup scan.
///
/// When the booking being checked is itself a makeup, the makeup under edit
/// is excluded and so are its group siblings: makeups derived from the same
/// original session row but for different students intentionally share one
/// slot and are not conflicts.
async fn scan_makeups(
    repo: &dyn FullRepository,
    req: &ScanRequest,
) -> RepositoryResult<Vec<RawConflict>> {
    let self_makeup = match req.checking_kind {
        BookingKind::Makeup => req.exclude_id,
        _ => None,
    };

    // Resolve the sibling key from the makeup under edit. Makeups exist as
    // pending rows before they are placed, so the id is available here.
    let sibling_key: Option<(ScheduleRowId, StudentId)> = match self_makeup {
        Some(id) => repo
            .find_makeup(MakeupId::new(id))
            .await?
            .map(|m| (m.original_schedule_id, m.student_id)),
        None => None,
    };

    let makeups = repo.list_scheduled_makeups_on(req.date).await?;

    let mut hits: Vec<(MakeupSession, MakeupSchedule)> = Vec::new();
    for makeup in makeups {
        let Some(schedule) = makeup.schedule.clone() else {
            continue;
        };
        if !matches_dimension(req, schedule.room_id, schedule.teacher_id) {
            continue;
        }
        if self_makeup == Some(makeup.id.value()) {
            continue;
        }
        if let Some((origin, student)) = sibling_key {
            if makeup.original_schedule_id == origin && makeup.student_id != student {
                continue;
            }
        }
        if !schedule.time_range().overlaps(&req.range) {
            continue;
        }
        hits.push((makeup, schedule));
    }

    // Group same-slot makeups into one conflict listing every student.
    let mut groups: BTreeMap<(TimeOfDay, TimeOfDay), Vec<MakeupSession>> = BTreeMap::new();
    for (makeup, schedule) in hits {
        groups
            .entry((schedule.start_time, schedule.end_time))
            .or_default()
            .push(makeup);
    }
    if groups.is_empty() {
        return Ok(Vec::new());
    }

    let student_ids: Vec<StudentId> = {
        let mut seen = HashSet::new();
        groups
            .values()
            .flatten()
            .map(|m| m.student_id)
            .filter(|id| seen.insert(*id))
            .collect()
    };
    let names = repo.student_names(&student_ids).await?;

    let conflicts = groups
        .into_iter()
        .map(|((start, end), mut members)| {
            // Stable student order regardless of storage iteration order.
            members.sort_by_key(|m| m.student_id);
            let students: Vec<String> = members
                .iter()
                .map(|m| {
                    names
                        .get(&m.student_id)
                        .cloned()
                        .unwrap_or_else(|| format!("Student #{}", m.student_id))
                })
                .collect();
            RawConflict {
                booking_kind: BookingKind::Makeup,
                display_name: format!("Makeup: {}", students.join(", ")),
                range: TimeRange::new(start, end),
                source_ids: members.iter().map(|m| m.id.value()).collect(),
            }
        })
        .collect();
    Ok(conflicts)
}

/// Trial scan. Skipped entirely when the booking being checked is a trial:
/// trials are provisional and deliberately overbookable among themselves.
async fn scan_trials(
    repo: &dyn FullRepository,
    req: &ScanRequest,
) -> RepositoryResult<Vec<RawConflict>> {
    if req.checking_kind == BookingKind::Trial {
        return Ok(Vec::new());
    }

    let trials = repo.list_scheduled_trials_on(req.date).await?;

    let mut groups: BTreeMap<(TimeOfDay, TimeOfDay), Vec<(i64, String)>> = BTreeMap::new();
    for trial in trials {
        if !matches_dimension(req, trial.room_id, trial.teacher_id) {
            continue;
        }
        if !trial.time_range().overlaps(&req.range) {
            continue;
        }
        groups
            .entry((trial.start_time, trial.end_time))
            .or_default()
            .push((trial.id.value(), trial.student_name));
    }

    Ok(groups
        .into_iter()
        .map(|((start, end), members)| {
            let students: Vec<&str> = members.iter().map(|(_, name)| name.as_str()).collect();
            RawConflict {
                booking_kind: BookingKind::Trial,
                display_name: format!("Trial: {}", students.join(", ")),
                range: TimeRange::new(start, end),
                source_ids: members.iter().map(|(id, _)| *id).collect(),
            }
        })
        .collect())
}

fn matches_dimension(req: &ScanRequest, room_id: RoomId, teacher_id: TeacherId) -> bool {
    match req.dimension {
        Dimension::Room => room_id == req.room_id,
        Dimension::Teacher => teacher_id == req.teacher_id,
    }
}
