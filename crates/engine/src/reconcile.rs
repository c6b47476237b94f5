//! Ledger reconciliation
//!
//! The balance table and the transaction ledger are written in the same
//! database transaction, so they should never disagree. If they ever do
//! (manual edits, partial restores), the employee's automated awards are
//! halted until a reconcile pass sees the numbers match again.

use buildflow_core::{Error, Result};
use buildflow_persistence::sqlite;
use sqlx::SqlitePool;
use tracing::{error, info};

/// Verify the balance against the ledger for one employee
///
/// On divergence the halt flag is set and a ConsistencyError returned; on a
/// clean pass the flag is cleared. Employees with no balance row are
/// vacuously consistent.
pub async fn reconcile(pool: &SqlitePool, employee_id: &str) -> Result<()> {
    if !sqlite::employee_exists(pool, employee_id).await? {
        return Err(Error::EmployeeNotFound(employee_id.to_string()));
    }

    let Some(points) = sqlite::get_points(pool, employee_id).await? else {
        return Ok(());
    };

    let actual = sqlite::ledger_sum(pool, employee_id).await?;
    if points.total_points == actual {
        if points.awards_halted {
            info!("Ledger for {} reconciled, resuming awards", employee_id);
            sqlite::set_awards_halted(pool, employee_id, false).await?;
        }
        return Ok(());
    }

    error!(
        "Ledger mismatch for {}: balance {}, ledger {}; halting awards",
        employee_id, points.total_points, actual
    );
    sqlite::set_awards_halted(pool, employee_id, true).await?;

    Err(Error::ConsistencyError {
        employee_id: employee_id.to_string(),
        recorded: points.total_points,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildflow_core::{RewardConfig, SubmissionEvent};
    use buildflow_persistence::Database;
    use chrono::NaiveDate;

    async fn setup_with_points() -> Database {
        let db = Database::connect_in_memory().await.unwrap();
        sqlite::upsert_employee(db.pool(), "emp-a", "Alex", None).await.unwrap();

        let event = SubmissionEvent {
            employee_id: "emp-a".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            leave: None,
        };
        crate::evaluate_submission(db.pool(), &RewardConfig::default(), &event)
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_clean_ledger_passes() {
        let db = setup_with_points().await;
        reconcile(db.pool(), "emp-a").await.unwrap();
    }

    #[tokio::test]
    async fn test_divergence_halts_and_repair_resumes() {
        let db = setup_with_points().await;

        // Corrupt the balance behind the ledger's back
        sqlx::query("UPDATE reward_points SET total_points = total_points + 7 WHERE employee_id = 'emp-a'")
            .execute(db.pool())
            .await
            .unwrap();

        let err = reconcile(db.pool(), "emp-a").await.unwrap_err();
        assert!(matches!(err, Error::ConsistencyError { .. }));

        // Evaluator now refuses this employee
        let event = SubmissionEvent {
            employee_id: "emp-a".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            leave: None,
        };
        let blocked = crate::evaluate_submission(db.pool(), &RewardConfig::default(), &event).await;
        assert!(matches!(blocked, Err(Error::ConsistencyError { .. })));

        // Repair the balance; reconcile clears the halt and awards resume
        sqlx::query("UPDATE reward_points SET total_points = total_points - 7 WHERE employee_id = 'emp-a'")
            .execute(db.pool())
            .await
            .unwrap();
        reconcile(db.pool(), "emp-a").await.unwrap();

        let outcome = crate::evaluate_submission(db.pool(), &RewardConfig::default(), &event)
            .await
            .unwrap();
        assert!(outcome.daily_awarded);
    }

    #[tokio::test]
    async fn test_employee_without_balance_is_vacuously_consistent() {
        let db = Database::connect_in_memory().await.unwrap();
        sqlite::upsert_employee(db.pool(), "emp-n", "Newcomer", None)
            .await
            .unwrap();

        reconcile(db.pool(), "emp-n").await.unwrap();
    }
}
