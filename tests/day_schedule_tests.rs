//! Integration tests for the day conflict aggregator and the reference cache
//! wiring behind it.

mod support;

use std::time::Duration;

use support::*;
use tms_rust::api::BranchId;
use tms_rust::models::{BookingKind, ClassScheduleRow, Room, ScheduleRowStatus};
use tms_rust::services::{day_conflicts, ReferenceCache};

#[tokio::test]
async fn test_timeline_includes_confirmed_class_sessions() {
    let repo = seeded_repo();
    monday_class(&repo, 1, "Math A1", 101, 1, "10:00", "11:00");

    let cache = ReferenceCache::new();
    let day = day_conflicts(&repo, &cache, d(MONDAY), BranchId::new(1))
        .await
        .unwrap();

    assert!(!day.is_holiday);
    assert_eq!(day.busy_slots.len(), 1);
    let slot = &day.busy_slots[0];
    assert_eq!(slot.kind, BookingKind::Class);
    assert_eq!(slot.name, "Math A1");
    assert_eq!(slot.room_name, "Room 101");
    assert_eq!(slot.teacher_name, "Alice Wong");
    assert_eq!(slot.subject_name.as_deref(), Some("Math"));
    assert_eq!(slot.session_number, Some(2));
    assert_eq!(slot.total_sessions, Some(16));
    assert!(!slot.completed);
}

#[tokio::test]
async fn test_timeline_is_sorted_by_start_time() {
    let repo = seeded_repo();
    monday_class(&repo, 1, "Afternoon", 101, 1, "14:00", "15:00");
    monday_class(&repo, 2, "Morning", 102, 2, "09:00", "10:00");
    repo.insert_trial(scheduled_trial(70, "Gail Ng", 101, 2, "11:00", "12:00"));

    let cache = ReferenceCache::new();
    let day = day_conflicts(&repo, &cache, d(MONDAY), BranchId::new(1))
        .await
        .unwrap();

    let starts: Vec<String> = day
        .busy_slots
        .iter()
        .map(|s| s.start_time.to_string())
        .collect();
    assert_eq!(starts, vec!["09:00", "11:00", "14:00"]);
}

#[tokio::test]
async fn test_group_makeup_renders_as_one_slot() {
    let repo = seeded_repo();
    repo.insert_makeup(scheduled_makeup(50, 1, 1000, 101, 1, "14:00", "15:00"));
    repo.insert_makeup(scheduled_makeup(51, 2, 1000, 101, 1, "14:00", "15:00"));

    let cache = ReferenceCache::new();
    let day = day_conflicts(&repo, &cache, d(MONDAY), BranchId::new(1))
        .await
        .unwrap();

    assert_eq!(day.busy_slots.len(), 1);
    let slot = &day.busy_slots[0];
    assert_eq!(slot.kind, BookingKind::Makeup);
    assert_eq!(slot.student_names, vec!["Dana Liu", "Evan Patel"]);
    assert_eq!(slot.session_number, None);
}

#[tokio::test]
async fn test_other_branch_bookings_are_excluded() {
    let repo = seeded_repo();
    repo.insert_trial(scheduled_trial(70, "Gail Ng", 101, 1, "10:00", "11:00"));

    let cache = ReferenceCache::new();
    let riverside = day_conflicts(&repo, &cache, d(MONDAY), BranchId::new(2))
        .await
        .unwrap();

    assert!(riverside.busy_slots.is_empty());
}

#[tokio::test]
async fn test_cancelled_session_is_omitted() {
    let repo = seeded_repo();
    monday_class(&repo, 1, "Math A1", 101, 1, "10:00", "11:00");
    monday_class(&repo, 2, "Sci B1", 102, 2, "10:00", "11:00");
    // Replace class 2's confirmed row by a cancelled one on a later Monday
    // and render that day instead.
    let later_monday = d("2026-09-21");
    repo.insert_schedule_row(ClassScheduleRow {
        id: tms_rust::api::ScheduleRowId::new(2001),
        class_id: tms_rust::api::ClassId::new(2),
        date: later_monday,
        session_number: 3,
        status: ScheduleRowStatus::Cancelled,
    });
    repo.insert_schedule_row(ClassScheduleRow {
        id: tms_rust::api::ScheduleRowId::new(1001),
        class_id: tms_rust::api::ClassId::new(1),
        date: later_monday,
        session_number: 3,
        status: ScheduleRowStatus::Completed,
    });

    let cache = ReferenceCache::new();
    let day = day_conflicts(&repo, &cache, later_monday, BranchId::new(1))
        .await
        .unwrap();

    assert_eq!(day.busy_slots.len(), 1);
    assert_eq!(day.busy_slots[0].name, "Math A1");
    assert!(day.busy_slots[0].completed);
}

#[tokio::test]
async fn test_holiday_flag_and_name() {
    let repo = seeded_repo();
    repo.insert_holiday(national_holiday(1, "Founders Day", MONDAY));
    monday_class(&repo, 1, "Math A1", 101, 1, "10:00", "11:00");

    let cache = ReferenceCache::new();
    let day = day_conflicts(&repo, &cache, d(MONDAY), BranchId::new(1))
        .await
        .unwrap();

    // The timeline still shows the booked slots; the holiday is advisory here.
    assert!(day.is_holiday);
    assert_eq!(day.holiday_name.as_deref(), Some("Founders Day"));
    assert_eq!(day.busy_slots.len(), 1);
}

#[tokio::test]
async fn test_stale_names_refresh_after_invalidation() {
    let repo = seeded_repo();
    monday_class(&repo, 1, "Math A1", 103, 1, "10:00", "11:00");

    let cache = ReferenceCache::new();
    let day = day_conflicts(&repo, &cache, d(MONDAY), BranchId::new(1))
        .await
        .unwrap();
    // Room 103 is unknown to the cached snapshot.
    assert_eq!(day.busy_slots[0].room_name, "Room #103");

    repo.insert_room(Room {
        id: tms_rust::api::RoomId::new(103),
        branch_id: BranchId::new(1),
        name: "Annex".to_string(),
        capacity: None,
    });

    // Still stale until invalidated.
    let stale = day_conflicts(&repo, &cache, d(MONDAY), BranchId::new(1))
        .await
        .unwrap();
    assert_eq!(stale.busy_slots[0].room_name, "Room #103");

    cache.invalidate();
    let fresh = day_conflicts(&repo, &cache, d(MONDAY), BranchId::new(1))
        .await
        .unwrap();
    assert_eq!(fresh.busy_slots[0].room_name, "Annex");
}

#[tokio::test]
async fn test_broken_booking_source_degrades() {
    let inner = seeded_repo();
    monday_class(&inner, 1, "Math A1", 101, 1, "10:00", "11:00");
    inner.insert_makeup(scheduled_makeup(50, 1, 1000, 102, 2, "14:00", "15:00"));
    let repo = FailingSources {
        fail_classes: true,
        ..FailingSources::wrapping(inner)
    };

    let cache = ReferenceCache::new();
    let day = day_conflicts(&repo, &cache, d(MONDAY), BranchId::new(1))
        .await
        .unwrap();

    // Classes are omitted but the makeup still renders.
    assert_eq!(day.busy_slots.len(), 1);
    assert_eq!(day.busy_slots[0].kind, BookingKind::Makeup);
}

#[tokio::test]
async fn test_broken_reference_source_is_a_hard_error() {
    let repo = FailingSources {
        fail_references: true,
        ..FailingSources::wrapping(seeded_repo())
    };

    let cache = ReferenceCache::with_ttl(Duration::ZERO);
    let result = day_conflicts(&repo, &cache, d(MONDAY), BranchId::new(1)).await;

    assert!(result.is_err());
}
