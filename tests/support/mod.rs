//! Shared fixtures for integration tests.
//!
//! Builders produce a consistent small dataset: branch 1 "Downtown" with
//! rooms 101/102 and branch 2 "Riverside" with room 201, two teachers, two
//! subjects and three students. Booking builders default to sane values and
//! let each test override only what it exercises.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, Weekday};
use std::collections::HashMap;

use tms_rust::api::{
    AvailabilityCheckParams, BranchId, ClassId, HolidayId, MakeupId, RoomId, ScheduleRowId,
    StudentId, SubjectId, TeacherId, TrialId,
};
use tms_rust::db::repository::{
    ClassRepository, FullRepository, HolidayRepository, MakeupRepository, ReferenceRepository,
    RepositoryError, RepositoryResult, TrialRepository,
};
use tms_rust::db::LocalRepository;
use tms_rust::models::{
    BookingKind, Branch, Class, ClassScheduleRow, ClassStatus, Holiday, HolidayType,
    MakeupSchedule, MakeupSession, MakeupStatus, Room, ScheduleRowStatus, Student, Subject,
    Teacher, TimeOfDay, TrialSession, TrialStatus,
};

/// A Monday inside every fixture class date range.
pub const MONDAY: &str = "2026-09-14";

pub fn t(s: &str) -> TimeOfDay {
    s.parse().expect("valid HH:MM literal")
}

pub fn d(s: &str) -> NaiveDate {
    s.parse().expect("valid ISO date literal")
}

/// Repository seeded with reference data only; bookings are added per test.
pub fn seeded_repo() -> LocalRepository {
    let repo = LocalRepository::new();

    repo.insert_branch(Branch {
        id: BranchId::new(1),
        name: "Downtown".to_string(),
    });
    repo.insert_branch(Branch {
        id: BranchId::new(2),
        name: "Riverside".to_string(),
    });

    repo.insert_room(Room {
        id: RoomId::new(101),
        branch_id: BranchId::new(1),
        name: "Room 101".to_string(),
        capacity: Some(12),
    });
    repo.insert_room(Room {
        id: RoomId::new(102),
        branch_id: BranchId::new(1),
        name: "Room 102".to_string(),
        capacity: Some(8),
    });
    repo.insert_room(Room {
        id: RoomId::new(201),
        branch_id: BranchId::new(2),
        name: "Room 201".to_string(),
        capacity: None,
    });

    repo.insert_teacher(Teacher {
        id: TeacherId::new(1),
        name: "Alice Wong".to_string(),
    });
    repo.insert_teacher(Teacher {
        id: TeacherId::new(2),
        name: "Ben Carter".to_string(),
    });

    repo.insert_subject(Subject {
        id: SubjectId::new(1),
        name: "Math".to_string(),
    });
    repo.insert_subject(Subject {
        id: SubjectId::new(2),
        name: "English".to_string(),
    });

    for (id, name) in [(1, "Dana Liu"), (2, "Evan Patel"), (3, "Fay Osei")] {
        repo.insert_student(Student {
            id: StudentId::new(id),
            name: name.to_string(),
        });
    }

    repo
}

/// A published Monday class in branch 1, confirmed on `MONDAY` with row id
/// `class_id * 1000`.
pub fn monday_class(
    repo: &LocalRepository,
    class_id: i64,
    name: &str,
    room: i64,
    teacher: i64,
    start: &str,
    end: &str,
) {
    repo.insert_class(Class {
        id: ClassId::new(class_id),
        name: name.to_string(),
        subject_id: SubjectId::new(1),
        branch_id: BranchId::new(1),
        room_id: RoomId::new(room),
        teacher_id: TeacherId::new(teacher),
        days_of_week: vec![Weekday::Mon],
        start_time: t(start),
        end_time: t(end),
        start_date: d("2026-09-01"),
        end_date: d("2026-12-31"),
        status: ClassStatus::Published,
        total_sessions: 16,
    });
    repo.insert_schedule_row(ClassScheduleRow {
        id: ScheduleRowId::new(class_id * 1000),
        class_id: ClassId::new(class_id),
        date: d(MONDAY),
        session_number: 2,
        status: ScheduleRowStatus::Scheduled,
    });
}

/// A scheduled makeup in branch 1 on `MONDAY`.
pub fn scheduled_makeup(
    id: i64,
    student: i64,
    origin_row: i64,
    room: i64,
    teacher: i64,
    start: &str,
    end: &str,
) -> MakeupSession {
    MakeupSession {
        id: MakeupId::new(id),
        student_id: StudentId::new(student),
        original_schedule_id: ScheduleRowId::new(origin_row),
        original_class_id: ClassId::new(1),
        status: MakeupStatus::Scheduled,
        schedule: Some(MakeupSchedule {
            date: d(MONDAY),
            start_time: t(start),
            end_time: t(end),
            branch_id: BranchId::new(1),
            room_id: RoomId::new(room),
            teacher_id: TeacherId::new(teacher),
        }),
    }
}

/// A scheduled trial in branch 1 on `MONDAY`.
pub fn scheduled_trial(
    id: i64,
    student_name: &str,
    room: i64,
    teacher: i64,
    start: &str,
    end: &str,
) -> TrialSession {
    TrialSession {
        id: TrialId::new(id),
        student_name: student_name.to_string(),
        subject_id: SubjectId::new(2),
        date: d(MONDAY),
        start_time: t(start),
        end_time: t(end),
        branch_id: BranchId::new(1),
        room_id: RoomId::new(room),
        teacher_id: TeacherId::new(teacher),
        status: TrialStatus::Scheduled,
    }
}

pub fn national_holiday(id: i64, name: &str, date: &str) -> Holiday {
    Holiday {
        id: HolidayId::new(id),
        name: name.to_string(),
        date: d(date),
        holiday_type: HolidayType::National,
        branches: vec![],
    }
}

pub fn branch_holiday(id: i64, name: &str, date: &str, branches: &[i64]) -> Holiday {
    Holiday {
        id: HolidayId::new(id),
        name: name.to_string(),
        date: d(date),
        holiday_type: HolidayType::Branch,
        branches: branches.iter().map(|b| BranchId::new(*b)).collect(),
    }
}

/// Wrapper that delegates to a seeded `LocalRepository` but fails configured
/// data sources, for exercising the degradation paths.
#[derive(Default)]
pub struct FailingSources {
    pub inner: LocalRepository,
    pub fail_classes: bool,
    pub fail_trials: bool,
    pub fail_holidays: bool,
    pub fail_references: bool,
    /// Panic instead of erroring when listing classes, for exercising the
    /// unwind path of the orchestrator.
    pub panic_on_classes: bool,
}

impl FailingSources {
    pub fn wrapping(inner: LocalRepository) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }

    fn broken() -> RepositoryError {
        RepositoryError::connection("source unreachable")
    }
}

#[async_trait]
impl ClassRepository for FailingSources {
    async fn list_classes_for_room(
        &self,
        branch_id: BranchId,
        room_id: RoomId,
    ) -> RepositoryResult<Vec<Class>> {
        if self.panic_on_classes {
            panic!("class listing panicked");
        }
        if self.fail_classes {
            return Err(Self::broken());
        }
        self.inner.list_classes_for_room(branch_id, room_id).await
    }

    async fn list_classes_for_teacher(
        &self,
        teacher_id: TeacherId,
    ) -> RepositoryResult<Vec<Class>> {
        if self.fail_classes {
            return Err(Self::broken());
        }
        self.inner.list_classes_for_teacher(teacher_id).await
    }

    async fn list_classes_for_branch(&self, branch_id: BranchId) -> RepositoryResult<Vec<Class>> {
        if self.fail_classes {
            return Err(Self::broken());
        }
        self.inner.list_classes_for_branch(branch_id).await
    }

    async fn schedule_row_on(
        &self,
        class_id: ClassId,
        date: NaiveDate,
    ) -> RepositoryResult<Option<ClassScheduleRow>> {
        self.inner.schedule_row_on(class_id, date).await
    }
}

#[async_trait]
impl MakeupRepository for FailingSources {
    async fn list_scheduled_makeups_on(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<MakeupSession>> {
        self.inner.list_scheduled_makeups_on(date).await
    }

    async fn find_makeup(&self, id: MakeupId) -> RepositoryResult<Option<MakeupSession>> {
        self.inner.find_makeup(id).await
    }
}

#[async_trait]
impl TrialRepository for FailingSources {
    async fn list_scheduled_trials_on(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<TrialSession>> {
        if self.fail_trials {
            return Err(Self::broken());
        }
        self.inner.list_scheduled_trials_on(date).await
    }
}

#[async_trait]
impl HolidayRepository for FailingSources {
    async fn list_holidays_on(&self, date: NaiveDate) -> RepositoryResult<Vec<Holiday>> {
        if self.fail_holidays {
            return Err(Self::broken());
        }
        self.inner.list_holidays_on(date).await
    }
}

#[async_trait]
impl ReferenceRepository for FailingSources {
    async fn list_branches(&self) -> RepositoryResult<Vec<Branch>> {
        if self.fail_references {
            return Err(Self::broken());
        }
        self.inner.list_branches().await
    }

    async fn list_rooms(&self, branch_id: BranchId) -> RepositoryResult<Vec<Room>> {
        if self.fail_references {
            return Err(Self::broken());
        }
        self.inner.list_rooms(branch_id).await
    }

    async fn list_teachers(&self) -> RepositoryResult<Vec<Teacher>> {
        if self.fail_references {
            return Err(Self::broken());
        }
        self.inner.list_teachers().await
    }

    async fn list_subjects(&self) -> RepositoryResult<Vec<Subject>> {
        if self.fail_references {
            return Err(Self::broken());
        }
        self.inner.list_subjects().await
    }

    async fn student_names(
        &self,
        ids: &[StudentId],
    ) -> RepositoryResult<HashMap<StudentId, String>> {
        self.inner.student_names(ids).await
    }

    async fn find_student(&self, id: StudentId) -> RepositoryResult<Option<Student>> {
        self.inner.find_student(id).await
    }
}

#[async_trait]
impl FullRepository for FailingSources {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(!self.fail_classes && !self.fail_trials && !self.fail_holidays && !self.fail_references)
    }
}

/// Check params for a class booking in branch 1 on `MONDAY`.
pub fn class_params(room: i64, teacher: i64, start: &str, end: &str) -> AvailabilityCheckParams {
    AvailabilityCheckParams {
        date: d(MONDAY),
        start_time: t(start),
        end_time: t(end),
        branch_id: BranchId::new(1),
        room_id: RoomId::new(room),
        teacher_id: TeacherId::new(teacher),
        kind: BookingKind::Class,
        exclude_id: None,
        allow_conflicts: false,
    }
}
