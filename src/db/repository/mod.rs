//! Repository traits: the read-only seam between the availability core and
//! whatever owns the booking data.
//!
//! The core never writes through these traits. Each trait covers one booking
//! source (or the reference data), so a storage backend can be swapped per
//! source; `FullRepository` is the umbrella the services take.
//!
//! # Thread Safety
//! Implementations must be `Send + Sync` to work with async Rust.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::api::{BranchId, ClassId, MakeupId, RoomId, StudentId, TeacherId};
use crate::models::{
    Branch, Class, ClassScheduleRow, Holiday, MakeupSession, Room, Student, Subject, Teacher,
    TrialSession,
};

/// Read access to recurring classes and their persisted session rows.
#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// List classes assigned to a room within a branch (any status; the
    /// scanner applies the status/weekday/date-range filters).
    async fn list_classes_for_room(
        &self,
        branch_id: BranchId,
        room_id: RoomId,
    ) -> RepositoryResult<Vec<Class>>;

    /// List classes taught by a teacher across all branches.
    async fn list_classes_for_teacher(
        &self,
        teacher_id: TeacherId,
    ) -> RepositoryResult<Vec<Class>>;

    /// List classes of a branch (day timeline view).
    async fn list_classes_for_branch(&self, branch_id: BranchId) -> RepositoryResult<Vec<Class>>;

    /// Fetch the persisted schedule row of a class on an exact date, if any.
    ///
    /// Absence means the class holds no session that day even when its
    /// weekday/date-range filters match.
    async fn schedule_row_on(
        &self,
        class_id: ClassId,
        date: NaiveDate,
    ) -> RepositoryResult<Option<ClassScheduleRow>>;
}

/// Read access to makeup sessions.
#[async_trait]
pub trait MakeupRepository: Send + Sync {
    /// List makeups with status `scheduled` whose slot falls on `date`.
    async fn list_scheduled_makeups_on(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<MakeupSession>>;

    /// Fetch a makeup by id (used to resolve the group-makeup sibling key
    /// when re-checking a makeup edit).
    async fn find_makeup(&self, id: MakeupId) -> RepositoryResult<Option<MakeupSession>>;
}

/// Read access to trial sessions.
#[async_trait]
pub trait TrialRepository: Send + Sync {
    /// List trials with status `scheduled` on `date`.
    async fn list_scheduled_trials_on(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<TrialSession>>;
}

/// Read access to the holiday calendar.
#[async_trait]
pub trait HolidayRepository: Send + Sync {
    /// List holiday records falling on `date` (national and branch scoped).
    async fn list_holidays_on(&self, date: NaiveDate) -> RepositoryResult<Vec<Holiday>>;
}

/// Read access to static reference data (display names only).
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    async fn list_branches(&self) -> RepositoryResult<Vec<Branch>>;

    async fn list_rooms(&self, branch_id: BranchId) -> RepositoryResult<Vec<Room>>;

    async fn list_teachers(&self) -> RepositoryResult<Vec<Teacher>>;

    async fn list_subjects(&self) -> RepositoryResult<Vec<Subject>>;

    /// Resolve display names for a batch of student ids. Unknown ids are
    /// simply absent from the map.
    async fn student_names(
        &self,
        ids: &[StudentId],
    ) -> RepositoryResult<HashMap<StudentId, String>>;

    async fn find_student(&self, id: StudentId) -> RepositoryResult<Option<Student>>;
}

/// Umbrella trait the service layer takes.
#[async_trait]
pub trait FullRepository:
    ClassRepository
    + MakeupRepository
    + TrialRepository
    + HolidayRepository
    + ReferenceRepository
    + Send
    + Sync
{
    /// Check that the underlying data source is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
