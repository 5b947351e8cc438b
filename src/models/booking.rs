//! Booking entities: recurring classes, makeup sessions and trial sessions.
//!
//! These are the three independent booking systems that can occupy a
//! room/teacher time slot. They are owned by the CRUD layer; the availability
//! core only reads them.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::api::{
    BranchId, ClassId, MakeupId, RoomId, ScheduleRowId, StudentId, SubjectId, TeacherId, TrialId,
};
use crate::models::time::{TimeOfDay, TimeRange};

/// The kind of booking occupying (or being placed into) a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Class,
    Makeup,
    Trial,
}

impl std::fmt::Display for BookingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingKind::Class => write!(f, "class"),
            BookingKind::Makeup => write!(f, "makeup"),
            BookingKind::Trial => write!(f, "trial"),
        }
    }
}

/// Lifecycle status of a recurring class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Draft,
    Published,
    Started,
    Completed,
    Cancelled,
}

impl ClassStatus {
    /// Only published and started classes occupy room/teacher time.
    pub fn occupies_slots(&self) -> bool {
        matches!(self, ClassStatus::Published | ClassStatus::Started)
    }
}

/// A recurring class: fixed room, teacher and weekly time slot over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub subject_id: SubjectId,
    pub branch_id: BranchId,
    pub room_id: RoomId,
    pub teacher_id: TeacherId,
    pub days_of_week: Vec<Weekday>,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ClassStatus,
    pub total_sessions: u32,
}

impl Class {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Coarse check: could this class have a session on `date`?
    ///
    /// A persisted, non-cancelled schedule row must still confirm the session;
    /// a class can be active in its date range yet have a specific day
    /// cancelled or rescheduled.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date
            && date <= self.end_date
            && self.days_of_week.contains(&date.weekday())
    }
}

/// Status of a single persisted class session row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleRowStatus {
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

/// One persisted session of a class on a concrete date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassScheduleRow {
    pub id: ScheduleRowId,
    pub class_id: ClassId,
    pub date: NaiveDate,
    pub session_number: u32,
    pub status: ScheduleRowStatus,
}

/// Lifecycle status of a makeup session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MakeupStatus {
    Pending,
    Scheduled,
    Completed,
    Cancelled,
}

/// Concrete slot a makeup has been scheduled into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeupSchedule {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub branch_id: BranchId,
    pub room_id: RoomId,
    pub teacher_id: TeacherId,
}

impl MakeupSchedule {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

/// A rescheduled replacement session for a student who missed an original
/// class session. Only `scheduled` makeups occupy room/teacher time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeupSession {
    pub id: MakeupId,
    pub student_id: StudentId,
    /// The original class session row this makeup replaces. Makeups sharing
    /// this id form a group makeup that intentionally shares one slot.
    pub original_schedule_id: ScheduleRowId,
    pub original_class_id: ClassId,
    pub status: MakeupStatus,
    /// Present once the makeup has been placed; `pending` makeups have none.
    pub schedule: Option<MakeupSchedule>,
}

/// Lifecycle status of a trial session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrialStatus {
    Scheduled,
    Attended,
    Absent,
    Cancelled,
}

/// A prospective single lesson for a not-yet-enrolled student.
/// Only `scheduled` trials occupy room/teacher time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialSession {
    pub id: TrialId,
    pub student_name: String,
    pub subject_id: SubjectId,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub branch_id: BranchId,
    pub room_id: RoomId,
    pub teacher_id: TeacherId,
    pub status: TrialStatus,
}

impl TrialSession {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}
