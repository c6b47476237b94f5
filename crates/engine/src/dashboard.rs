//! Rewards dashboard aggregation
//!
//! Backs GET /api/rewards/dashboard: one call collects the balance, recent
//! ledger activity, badges, and the full leaderboard with the caller's rank.

use buildflow_core::{DashboardResponse, Error, Result, RewardPoints};
use buildflow_persistence::sqlite;
use sqlx::SqlitePool;
use tracing::debug;

/// Assemble the dashboard payload for one employee
pub async fn dashboard(
    pool: &SqlitePool,
    employee_id: &str,
    recent_limit: u32,
) -> Result<DashboardResponse> {
    if !sqlite::employee_exists(pool, employee_id).await? {
        return Err(Error::EmployeeNotFound(employee_id.to_string()));
    }

    let leaderboard = crate::leaderboard::leaderboard(pool).await?;
    let user_rank = leaderboard
        .iter()
        .find(|e| e.employee_id == employee_id)
        .and_then(|e| e.rank);
    let total_users = leaderboard.len() as u32;

    let points = sqlite::get_points(pool, employee_id)
        .await?
        .unwrap_or_else(|| RewardPoints::zero(employee_id));
    let recent_transactions = sqlite::recent_transactions(pool, employee_id, recent_limit).await?;
    let achievements = sqlite::list_achievements(pool, employee_id).await?;

    debug!(
        "Dashboard for {}: rank {:?} of {}, {} recent transactions",
        employee_id,
        user_rank,
        total_users,
        recent_transactions.len()
    );

    Ok(DashboardResponse {
        points,
        recent_transactions,
        achievements,
        leaderboard,
        user_rank,
        total_users,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildflow_core::{RewardConfig, SubmissionEvent};
    use buildflow_persistence::Database;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_dashboard_shape_for_active_and_new_employees() {
        let db = Database::connect_in_memory().await.unwrap();
        sqlite::upsert_employee(db.pool(), "emp-a", "Alex", None).await.unwrap();
        sqlite::upsert_employee(db.pool(), "emp-n", "Newcomer", None)
            .await
            .unwrap();

        let event = SubmissionEvent {
            employee_id: "emp-a".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            leave: None,
        };
        crate::evaluate_submission(db.pool(), &RewardConfig::default(), &event)
            .await
            .unwrap();

        let active = dashboard(db.pool(), "emp-a", 10).await.unwrap();
        assert_eq!(active.user_rank, Some(1));
        assert_eq!(active.total_users, 1);
        assert!(!active.recent_transactions.is_empty());
        assert!(!active.achievements.is_empty());

        // An employee with no evaluations yet gets a zeroed, unranked view
        let fresh = dashboard(db.pool(), "emp-n", 10).await.unwrap();
        assert_eq!(fresh.user_rank, None);
        assert_eq!(fresh.points.total_points, 0);
        assert!(fresh.recent_transactions.is_empty());

        let missing = dashboard(db.pool(), "emp-x", 10).await;
        assert!(matches!(missing, Err(Error::EmployeeNotFound(_))));
    }
}
