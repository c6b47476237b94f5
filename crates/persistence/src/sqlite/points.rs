//! Reward balance and streak persistence

use buildflow_core::{Error, Result, RewardPoints};
use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};

/// Database row for reward_points
#[derive(Debug, sqlx::FromRow)]
struct RewardPointsRow {
    employee_id: String,
    total_points: i64,
    available_points: i64,
    current_streak: i64,
    longest_streak: i64,
    last_submission_date: Option<NaiveDate>,
    awards_halted: i64,
}

impl From<RewardPointsRow> for RewardPoints {
    fn from(row: RewardPointsRow) -> Self {
        RewardPoints {
            employee_id: row.employee_id,
            total_points: row.total_points,
            available_points: row.available_points,
            current_streak: row.current_streak,
            longest_streak: row.longest_streak,
            last_submission_date: row.last_submission_date,
            awards_halted: row.awards_halted != 0,
        }
    }
}

const SELECT_POINTS: &str = r#"
    SELECT employee_id, total_points, available_points, current_streak,
           longest_streak, last_submission_date, awards_halted
    FROM reward_points
    WHERE employee_id = ?
"#;

/// Get the balance row for an employee, if one exists yet
pub async fn get_points(pool: &SqlitePool, employee_id: &str) -> Result<Option<RewardPoints>> {
    let row: Option<RewardPointsRow> = sqlx::query_as(SELECT_POINTS)
        .bind(employee_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.map(RewardPoints::from))
}

/// Same as [`get_points`] but inside a caller-held transaction
pub async fn get_points_tx(
    conn: &mut SqliteConnection,
    employee_id: &str,
) -> Result<Option<RewardPoints>> {
    let row: Option<RewardPointsRow> = sqlx::query_as(SELECT_POINTS)
        .bind(employee_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.map(RewardPoints::from))
}

/// Create the zeroed balance row if the employee has none yet
pub async fn ensure_points_row(conn: &mut SqliteConnection, employee_id: &str) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO reward_points (employee_id)
           VALUES (?)
           ON CONFLICT(employee_id) DO NOTHING"#,
    )
    .bind(employee_id)
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Add points to both the running total and the spendable balance
///
/// Must be called in the same transaction as the matching ledger insert so
/// the balance and the ledger can never diverge.
pub async fn apply_points_delta(
    conn: &mut SqliteConnection,
    employee_id: &str,
    delta: i64,
) -> Result<()> {
    sqlx::query(
        r#"UPDATE reward_points
           SET total_points = total_points + ?,
               available_points = available_points + ?,
               updated_at = CURRENT_TIMESTAMP
           WHERE employee_id = ?"#,
    )
    .bind(delta)
    .bind(delta)
    .bind(employee_id)
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Update streak counters and the last submission date
pub async fn update_streak(
    conn: &mut SqliteConnection,
    employee_id: &str,
    current_streak: i64,
    longest_streak: i64,
    last_submission_date: Option<NaiveDate>,
) -> Result<()> {
    sqlx::query(
        r#"UPDATE reward_points
           SET current_streak = ?,
               longest_streak = ?,
               last_submission_date = ?,
               updated_at = CURRENT_TIMESTAMP
           WHERE employee_id = ?"#,
    )
    .bind(current_streak)
    .bind(longest_streak)
    .bind(last_submission_date)
    .bind(employee_id)
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Set or clear the consistency halt flag
pub async fn set_awards_halted(pool: &SqlitePool, employee_id: &str, halted: bool) -> Result<()> {
    sqlx::query(
        r#"UPDATE reward_points
           SET awards_halted = ?,
               updated_at = CURRENT_TIMESTAMP
           WHERE employee_id = ?"#,
    )
    .bind(halted as i64)
    .bind(employee_id)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// One leaderboard row: balance joined with the employee name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RankedPointsRow {
    pub employee_id: String,
    pub name: String,
    pub total_points: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
}

/// All balances joined with names, in leaderboard order
///
/// Descending total points, ties broken by ascending employee id so repeated
/// calls return the same ordering.
pub async fn list_ranked_points(pool: &SqlitePool) -> Result<Vec<RankedPointsRow>> {
    sqlx::query_as::<_, RankedPointsRow>(
        r#"
        SELECT p.employee_id, e.name, p.total_points, p.current_streak, p.longest_streak
        FROM reward_points p
        JOIN employees e ON e.id = p.employee_id
        ORDER BY p.total_points DESC, p.employee_id ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))
}
