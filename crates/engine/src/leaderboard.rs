//! Points leaderboard read model

use buildflow_core::{LeaderboardEntry, Result};
use buildflow_persistence::sqlite;
use sqlx::SqlitePool;

/// Ranked view of every employee with a reward balance
///
/// Sort key is total points descending with ties broken by ascending
/// employee id, so repeated calls always agree. Streak columns are carried
/// for display only. Employees with no balance row do not appear; they are
/// unranked, not rank = N.
pub async fn leaderboard(pool: &SqlitePool) -> Result<Vec<LeaderboardEntry>> {
    let rows = sqlite::list_ranked_points(pool).await?;

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| LeaderboardEntry {
            employee_id: row.employee_id,
            name: row.name,
            total_points: row.total_points,
            current_streak: row.current_streak,
            longest_streak: row.longest_streak,
            rank: Some(i as u32 + 1),
        })
        .collect())
}

/// 1-based rank of one employee, None while unranked
pub async fn employee_rank(pool: &SqlitePool, employee_id: &str) -> Result<Option<u32>> {
    let board = leaderboard(pool).await?;
    Ok(board
        .iter()
        .find(|e| e.employee_id == employee_id)
        .and_then(|e| e.rank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildflow_core::{RewardConfig, SubmissionEvent};
    use buildflow_persistence::Database;
    use chrono::NaiveDate;

    async fn submit(db: &Database, employee_id: &str, day: u32) {
        let event = SubmissionEvent {
            employee_id: employee_id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            leave: None,
        };
        crate::evaluate_submission(db.pool(), &RewardConfig::default(), &event)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ties_break_by_ascending_employee_id() {
        let db = Database::connect_in_memory().await.unwrap();
        for (id, name) in [("emp-b", "Billie"), ("emp-a", "Alex"), ("emp-c", "Casey")] {
            sqlite::upsert_employee(db.pool(), id, name, None).await.unwrap();
        }

        // emp-c earns two days, emp-a and emp-b one equal day each
        submit(&db, "emp-c", 3).await;
        submit(&db, "emp-c", 4).await;
        submit(&db, "emp-b", 3).await;
        submit(&db, "emp-a", 3).await;

        let board = leaderboard(db.pool()).await.unwrap();
        let ids: Vec<_> = board.iter().map(|e| e.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["emp-c", "emp-a", "emp-b"]);
        assert_eq!(board[0].rank, Some(1));
        assert_eq!(board[1].rank, Some(2));
        assert_eq!(board[2].rank, Some(3));

        // Deterministic across repeated calls
        let again = leaderboard(db.pool()).await.unwrap();
        let ids_again: Vec<_> = again.iter().map(|e| e.employee_id.as_str()).collect();
        assert_eq!(ids, ids_again);
    }

    #[tokio::test]
    async fn test_employee_without_points_is_unranked() {
        let db = Database::connect_in_memory().await.unwrap();
        sqlite::upsert_employee(db.pool(), "emp-a", "Alex", None).await.unwrap();
        sqlite::upsert_employee(db.pool(), "emp-z", "Zoe", None).await.unwrap();

        submit(&db, "emp-a", 3).await;

        let board = leaderboard(db.pool()).await.unwrap();
        assert_eq!(board.len(), 1);

        assert_eq!(employee_rank(db.pool(), "emp-a").await.unwrap(), Some(1));
        assert_eq!(employee_rank(db.pool(), "emp-z").await.unwrap(), None);
    }
}
