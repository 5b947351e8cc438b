//! Short-lived cache of static reference data.
//!
//! The day timeline denormalizes room/teacher/subject names into every slot;
//! refetching the reference tables for each render is wasteful, so a
//! snapshot is cached with a small TTL. The cache is an explicit object
//! passed to whoever needs it (never a hidden module-level singleton) and
//! can be invalidated on demand after reference data changes. The
//! conflict-checking path does not use it.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{BranchId, RoomId, SubjectId, TeacherId};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::{Branch, Room, Subject, Teacher};

/// Default snapshot lifetime.
pub const DEFAULT_REFERENCE_TTL: Duration = Duration::from_secs(5 * 60);

/// Immutable snapshot of the reference tables, keyed for display lookups.
#[derive(Debug)]
pub struct ReferenceSnapshot {
    pub branches: HashMap<BranchId, Branch>,
    pub rooms: HashMap<RoomId, Room>,
    pub teachers: HashMap<TeacherId, Teacher>,
    pub subjects: HashMap<SubjectId, Subject>,
    fetched_at: Instant,
}

impl ReferenceSnapshot {
    pub fn room_name(&self, id: RoomId) -> String {
        self.rooms
            .get(&id)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| format!("Room #{}", id))
    }

    pub fn teacher_name(&self, id: TeacherId) -> String {
        self.teachers
            .get(&id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("Teacher #{}", id))
    }

    pub fn subject_name(&self, id: SubjectId) -> Option<String> {
        self.subjects.get(&id).map(|s| s.name.clone())
    }
}

/// Time-bounded reference data cache with explicit invalidation.
pub struct ReferenceCache {
    ttl: Duration,
    slot: RwLock<Option<Arc<ReferenceSnapshot>>>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_REFERENCE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached snapshot, refetching when absent or expired.
    ///
    /// Two concurrent callers may both refetch after expiry; the cache is
    /// read-mostly and the duplicate fetch is harmless.
    pub async fn get(&self, repo: &dyn FullRepository) -> RepositoryResult<Arc<ReferenceSnapshot>> {
        if let Some(snapshot) = self.slot.read().clone() {
            if snapshot.fetched_at.elapsed() < self.ttl {
                return Ok(snapshot);
            }
        }

        let snapshot = Arc::new(fetch_snapshot(repo).await?);
        *self.slot.write() = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Drop the cached snapshot; the next `get` refetches.
    pub fn invalidate(&self) {
        *self.slot.write() = None;
    }
}

impl Default for ReferenceCache {
    fn default() -> Self {
        Self::new()
    }
}

async fn fetch_snapshot(repo: &dyn FullRepository) -> RepositoryResult<ReferenceSnapshot> {
    let (branches, teachers, subjects) = tokio::try_join!(
        repo.list_branches(),
        repo.list_teachers(),
        repo.list_subjects(),
    )?;

    let room_lists =
        futures::future::join_all(branches.iter().map(|b| repo.list_rooms(b.id))).await;
    let mut rooms = HashMap::new();
    for list in room_lists {
        for room in list? {
            rooms.insert(room.id, room);
        }
    }

    Ok(ReferenceSnapshot {
        branches: branches.into_iter().map(|b| (b.id, b)).collect(),
        rooms,
        teachers: teachers.into_iter().map(|t| (t.id, t)).collect(),
        subjects: subjects.into_iter().map(|s| (s.id, s)).collect(),
        fetched_at: Instant::now(),
    })
}
