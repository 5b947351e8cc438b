//! Day conflict aggregator.
//!
//! Produces the full busy-slot timeline for a branch/date: the scan step of
//! the availability check without a proposed range to compare against, so
//! every matching booking of the day is returned. Slots carry denormalized
//! display names (resolved through the reference cache) so a UI can render
//! the timeline without further lookups.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::api::{BranchId, RoomId, TeacherId};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::{BookingKind, ScheduleRowStatus, TimeOfDay};
use crate::routes::day_schedule::{BusySlot, DayConflicts};
use crate::services::holiday_gate;
use crate::services::reference_cache::{ReferenceCache, ReferenceSnapshot};

/// Build the busy-slot timeline for a branch on a date.
///
/// Per-source read failures degrade to an empty contribution, mirroring the
/// availability scanner; a reference-data failure is hard because the view
/// cannot render names without it.
pub async fn day_conflicts(
    repo: &dyn FullRepository,
    cache: &ReferenceCache,
    date: NaiveDate,
    branch_id: BranchId,
) -> RepositoryResult<DayConflicts> {
    let refs = cache.get(repo).await?;

    let holiday = holiday_gate::describe_block(repo, date, branch_id).await;

    let (classes, makeups, trials) = tokio::join!(
        collect_class_slots(repo, &refs, date, branch_id),
        collect_makeup_slots(repo, &refs, date, branch_id),
        collect_trial_slots(repo, &refs, date, branch_id),
    );

    let mut busy_slots = Vec::new();
    for (kind, result) in [
        (BookingKind::Class, classes),
        (BookingKind::Makeup, makeups),
        (BookingKind::Trial, trials),
    ] {
        match result {
            Ok(slots) => busy_slots.extend(slots),
            Err(e) => {
                tracing::warn!(
                    source = %kind,
                    %date,
                    %branch_id,
                    error = %e,
                    "day timeline sub-scan failed, omitting source"
                );
            }
        }
    }

    busy_slots.sort_by_key(|s| (s.start_time, s.end_time, s.room_id.value()));

    Ok(DayConflicts {
        is_holiday: holiday.is_some(),
        holiday_name: holiday.map(|h| h.name),
        busy_slots,
    })
}

async fn collect_class_slots(
    repo: &dyn FullRepository,
    refs: &ReferenceSnapshot,
    date: NaiveDate,
    branch_id: BranchId,
) -> RepositoryResult<Vec<BusySlot>> {
    let candidates: Vec<_> = repo
        .list_classes_for_branch(branch_id)
        .await?
        .into_iter()
        .filter(|c| c.status.occupies_slots())
        .filter(|c| c.covers_date(date))
        .collect();

    let lookups = candidates.iter().map(|c| repo.schedule_row_on(c.id, date));
    let rows = futures::future::join_all(lookups).await;

    let mut slots = Vec::new();
    for (class, row) in candidates.iter().zip(rows) {
        let Some(row) = row? else {
            continue;
        };
        if row.status == ScheduleRowStatus::Cancelled {
            continue;
        }
        slots.push(BusySlot {
            kind: BookingKind::Class,
            name: class.name.clone(),
            start_time: class.start_time,
            end_time: class.end_time,
            room_id: class.room_id,
            room_name: refs.room_name(class.room_id),
            teacher_id: class.teacher_id,
            teacher_name: refs.teacher_name(class.teacher_id),
            subject_name: refs.subject_name(class.subject_id),
            student_names: vec![],
            session_number: Some(row.session_number),
            total_sessions: Some(class.total_sessions),
            completed: row.status == ScheduleRowStatus::Completed,
        });
    }
    Ok(slots)
}

/// Group key for makeup/trial slots sharing an exact time+room+teacher.
type SlotKey = (TimeOfDay, TimeOfDay, RoomId, TeacherId);

async fn collect_makeup_slots(
    repo: &dyn FullRepository,
    refs: &ReferenceSnapshot,
    date: NaiveDate,
    branch_id: BranchId,
) -> RepositoryResult<Vec<BusySlot>> {
    let makeups = repo.list_scheduled_makeups_on(date).await?;

    let mut groups: BTreeMap<SlotKey, Vec<crate::api::StudentId>> = BTreeMap::new();
    for makeup in makeups {
        let Some(schedule) = makeup.schedule else {
            continue;
        };
        if schedule.branch_id != branch_id {
            continue;
        }
        groups
            .entry((
                schedule.start_time,
                schedule.end_time,
                schedule.room_id,
                schedule.teacher_id,
            ))
            .or_default()
            .push(makeup.student_id);
    }
    if groups.is_empty() {
        return Ok(Vec::new());
    }

    let all_ids: Vec<_> = groups.values().flatten().copied().collect();
    let names = repo.student_names(&all_ids).await?;

    Ok(groups
        .into_iter()
        .map(|((start, end, room_id, teacher_id), mut students)| {
            // Stable student order regardless of storage iteration order.
            students.sort();
            BusySlot {
                kind: BookingKind::Makeup,
                name: "Makeup".to_string(),
                start_time: start,
                end_time: end,
                room_id,
                room_name: refs.room_name(room_id),
                teacher_id,
                teacher_name: refs.teacher_name(teacher_id),
                subject_name: None,
                student_names: students
                    .iter()
                    .map(|id| {
                        names
                            .get(id)
                            .cloned()
                            .unwrap_or_else(|| format!("Student #{}", id))
                    })
                    .collect(),
                session_number: None,
                total_sessions: None,
                completed: false,
            }
        })
        .collect())
}

async fn collect_trial_slots(
    repo: &dyn FullRepository,
    refs: &ReferenceSnapshot,
    date: NaiveDate,
    branch_id: BranchId,
) -> RepositoryResult<Vec<BusySlot>> {
    let trials = repo.list_scheduled_trials_on(date).await?;

    let mut groups: BTreeMap<SlotKey, (Vec<String>, Option<String>)> = BTreeMap::new();
    for trial in trials {
        if trial.branch_id != branch_id {
            continue;
        }
        let entry = groups
            .entry((
                trial.start_time,
                trial.end_time,
                trial.room_id,
                trial.teacher_id,
            ))
            .or_default();
        entry.0.push(trial.student_name);
        if entry.1.is_none() {
            entry.1 = refs.subject_name(trial.subject_id);
        }
    }

    Ok(groups
        .into_iter()
        .map(
            |((start, end, room_id, teacher_id), (students, subject_name))| BusySlot {
                kind: BookingKind::Trial,
                name: "Trial".to_string(),
                start_time: start,
                end_time: end,
                room_id,
                room_name: refs.room_name(room_id),
                teacher_id,
                teacher_name: refs.teacher_name(teacher_id),
                subject_name,
                student_names: students,
                session_number: None,
                total_sessions: None,
                completed: false,
            },
        )
        .collect())
}
