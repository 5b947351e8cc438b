//! In-memory repository for unit testing and local development.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::api::{BranchId, ClassId, MakeupId, RoomId, StudentId, TeacherId};
use crate::db::repository::{
    ClassRepository, FullRepository, HolidayRepository, MakeupRepository, ReferenceRepository,
    RepositoryResult, TrialRepository,
};
use crate::models::{
    Branch, Class, ClassScheduleRow, Holiday, MakeupSession, MakeupStatus, Room, Student, Subject,
    Teacher, TrialSession, TrialStatus,
};

#[derive(Default)]
struct Inner {
    classes: HashMap<ClassId, Class>,
    schedule_rows: Vec<ClassScheduleRow>,
    makeups: HashMap<MakeupId, MakeupSession>,
    trials: Vec<TrialSession>,
    holidays: Vec<Holiday>,
    branches: Vec<Branch>,
    rooms: Vec<Room>,
    teachers: Vec<Teacher>,
    subjects: Vec<Subject>,
    students: HashMap<StudentId, Student>,
}

/// In-memory implementation of the repository seam.
///
/// Backed by `parking_lot::RwLock`; all lookups clone out of the store so no
/// lock is held across await points.
#[derive(Default)]
pub struct LocalRepository {
    inner: RwLock<Inner>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Seeding (tests / local development) ====================

    pub fn insert_class(&self, class: Class) {
        self.inner.write().classes.insert(class.id, class);
    }

    pub fn insert_schedule_row(&self, row: ClassScheduleRow) {
        self.inner.write().schedule_rows.push(row);
    }

    pub fn insert_makeup(&self, makeup: MakeupSession) {
        self.inner.write().makeups.insert(makeup.id, makeup);
    }

    pub fn insert_trial(&self, trial: TrialSession) {
        self.inner.write().trials.push(trial);
    }

    pub fn insert_holiday(&self, holiday: Holiday) {
        self.inner.write().holidays.push(holiday);
    }

    pub fn insert_branch(&self, branch: Branch) {
        self.inner.write().branches.push(branch);
    }

    pub fn insert_room(&self, room: Room) {
        self.inner.write().rooms.push(room);
    }

    pub fn insert_teacher(&self, teacher: Teacher) {
        self.inner.write().teachers.push(teacher);
    }

    pub fn insert_subject(&self, subject: Subject) {
        self.inner.write().subjects.push(subject);
    }

    pub fn insert_student(&self, student: Student) {
        self.inner.write().students.insert(student.id, student);
    }
}

#[async_trait]
impl ClassRepository for LocalRepository {
    async fn list_classes_for_room(
        &self,
        branch_id: BranchId,
        room_id: RoomId,
    ) -> RepositoryResult<Vec<Class>> {
        Ok(self
            .inner
            .read()
            .classes
            .values()
            .filter(|c| c.branch_id == branch_id && c.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn list_classes_for_teacher(
        &self,
        teacher_id: TeacherId,
    ) -> RepositoryResult<Vec<Class>> {
        Ok(self
            .inner
            .read()
            .classes
            .values()
            .filter(|c| c.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn list_classes_for_branch(&self, branch_id: BranchId) -> RepositoryResult<Vec<Class>> {
        Ok(self
            .inner
            .read()
            .classes
            .values()
            .filter(|c| c.branch_id == branch_id)
            .cloned()
            .collect())
    }

    async fn schedule_row_on(
        &self,
        class_id: ClassId,
        date: NaiveDate,
    ) -> RepositoryResult<Option<ClassScheduleRow>> {
        Ok(self
            .inner
            .read()
            .schedule_rows
            .iter()
            .find(|r| r.class_id == class_id && r.date == date)
            .cloned())
    }
}

#[async_trait]
impl MakeupRepository for LocalRepository {
    async fn list_scheduled_makeups_on(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<MakeupSession>> {
        Ok(self
            .inner
            .read()
            .makeups
            .values()
            .filter(|m| {
                m.status == MakeupStatus::Scheduled
                    && m.schedule.as_ref().is_some_and(|s| s.date == date)
            })
            .cloned()
            .collect())
    }

    async fn find_makeup(&self, id: MakeupId) -> RepositoryResult<Option<MakeupSession>> {
        Ok(self.inner.read().makeups.get(&id).cloned())
    }
}

#[async_trait]
impl TrialRepository for LocalRepository {
    async fn list_scheduled_trials_on(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<TrialSession>> {
        Ok(self
            .inner
            .read()
            .trials
            .iter()
            .filter(|t| t.status == TrialStatus::Scheduled && t.date == date)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl HolidayRepository for LocalRepository {
    async fn list_holidays_on(&self, date: NaiveDate) -> RepositoryResult<Vec<Holiday>> {
        Ok(self
            .inner
            .read()
            .holidays
            .iter()
            .filter(|h| h.date == date)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReferenceRepository for LocalRepository {
    async fn list_branches(&self) -> RepositoryResult<Vec<Branch>> {
        Ok(self.inner.read().branches.clone())
    }

    async fn list_rooms(&self, branch_id: BranchId) -> RepositoryResult<Vec<Room>> {
        Ok(self
            .inner
            .read()
            .rooms
            .iter()
            .filter(|r| r.branch_id == branch_id)
            .cloned()
            .collect())
    }

    async fn list_teachers(&self) -> RepositoryResult<Vec<Teacher>> {
        Ok(self.inner.read().teachers.clone())
    }

    async fn list_subjects(&self) -> RepositoryResult<Vec<Subject>> {
        Ok(self.inner.read().subjects.clone())
    }

    async fn student_names(
        &self,
        ids: &[StudentId],
    ) -> RepositoryResult<HashMap<StudentId, String>> {
        let inner = self.inner.read();
        Ok(ids
            .iter()
            .filter_map(|id| inner.students.get(id).map(|s| (*id, s.name.clone())))
            .collect())
    }

    async fn find_student(&self, id: StudentId) -> RepositoryResult<Option<Student>> {
        Ok(self.inner.read().students.get(&id).cloned())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
