//! Holiday gate: decides whether a calendar date is blocked for a branch.
//!
//! A date is blocked when a national holiday falls on it, or a branch holiday
//! falls on it and lists the branch. The gate fails open: a read error is
//! logged and treated as "not a holiday" so a transient backend hiccup never
//! blocks the whole scheduling UI. A fully broken check still fails closed at
//! the orchestrator level (see `services::availability`).

use chrono::NaiveDate;

use crate::api::BranchId;
use crate::db::repository::FullRepository;
use crate::models::Holiday;

/// Return the holiday blocking `date` for `branch_id`, if any.
///
/// When several holiday records match, the one with the lowest id wins. The
/// ordering has no business meaning; it only makes the displayed name stable.
pub async fn describe_block(
    repo: &dyn FullRepository,
    date: NaiveDate,
    branch_id: BranchId,
) -> Option<Holiday> {
    let holidays = match repo.list_holidays_on(date).await {
        Ok(holidays) => holidays,
        Err(e) => {
            tracing::warn!(%date, error = %e, "holiday lookup failed, treating date as not blocked");
            return None;
        }
    };

    holidays
        .into_iter()
        .filter(|h| h.blocks_branch(branch_id))
        .min_by_key(|h| h.id)
}

/// Whether `date` is blocked for `branch_id`.
pub async fn is_blocked(repo: &dyn FullRepository, date: NaiveDate, branch_id: BranchId) -> bool {
    describe_block(repo, date, branch_id).await.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HolidayId;
    use crate::db::LocalRepository;
    use crate::models::HolidayType;

    fn holiday(id: i64, name: &str, date: NaiveDate, branches: Vec<BranchId>) -> Holiday {
        let holiday_type = if branches.is_empty() {
            HolidayType::National
        } else {
            HolidayType::Branch
        };
        Holiday {
            id: HolidayId::new(id),
            name: name.to_string(),
            date,
            holiday_type,
            branches,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_national_holiday_blocks_every_branch() {
        let repo = LocalRepository::new();
        repo.insert_holiday(holiday(1, "Songkran", date(2024, 4, 13), vec![]));

        assert!(is_blocked(&repo, date(2024, 4, 13), BranchId::new(1)).await);
        assert!(is_blocked(&repo, date(2024, 4, 13), BranchId::new(2)).await);
        assert!(!is_blocked(&repo, date(2024, 4, 14), BranchId::new(1)).await);
    }

    #[tokio::test]
    async fn test_branch_holiday_blocks_listed_branch_only() {
        let repo = LocalRepository::new();
        repo.insert_holiday(holiday(
            1,
            "Branch day",
            date(2024, 5, 1),
            vec![BranchId::new(1)],
        ));

        assert!(is_blocked(&repo, date(2024, 5, 1), BranchId::new(1)).await);
        assert!(!is_blocked(&repo, date(2024, 5, 1), BranchId::new(2)).await);
    }

    #[tokio::test]
    async fn test_lowest_id_wins_when_multiple_match() {
        let repo = LocalRepository::new();
        repo.insert_holiday(holiday(7, "Second", date(2024, 4, 13), vec![]));
        repo.insert_holiday(holiday(3, "First", date(2024, 4, 13), vec![]));

        let block = describe_block(&repo, date(2024, 4, 13), BranchId::new(1)).await;
        assert_eq!(block.unwrap().name, "First");
    }
}
