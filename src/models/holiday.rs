//! Holiday calendar entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{BranchId, HolidayId};

/// Scope of a holiday record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayType {
    /// Blocks every branch.
    National,
    /// Blocks only the branches listed on the record.
    Branch,
}

/// A calendar date on which scheduling is blocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holiday {
    pub id: HolidayId,
    pub name: String,
    pub date: NaiveDate,
    pub holiday_type: HolidayType,
    /// Branch ids the holiday applies to; only meaningful for `Branch` type.
    #[serde(default)]
    pub branches: Vec<BranchId>,
}

impl Holiday {
    /// Whether this record blocks the given branch.
    pub fn blocks_branch(&self, branch_id: BranchId) -> bool {
        match self.holiday_type {
            HolidayType::National => true,
            HolidayType::Branch => self.branches.contains(&branch_id),
        }
    }
}
