//! Reward transaction ledger operations
//!
//! The ledger is append-only: entries are inserted, listed, and summed, never
//! updated or deleted.

use buildflow_core::{Error, Result, RewardTransaction, TransactionKind};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{SqliteConnection, SqlitePool};

/// Ledger row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    employee_id: String,
    kind: String,
    points: i64,
    reason: String,
    related_date: Option<NaiveDate>,
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<TransactionRow> for RewardTransaction {
    type Error = Error;

    fn try_from(row: TransactionRow) -> Result<Self> {
        Ok(RewardTransaction {
            id: row.id,
            employee_id: row.employee_id,
            kind: TransactionKind::parse(&row.kind)?,
            points: row.points,
            reason: row.reason,
            related_date: row.related_date,
            created_at: row.created_at,
        })
    }
}

/// Append a ledger entry
///
/// Runs inside the caller's transaction; the matching reward_points update
/// must commit or roll back together with this insert.
pub async fn insert_transaction(
    conn: &mut SqliteConnection,
    employee_id: &str,
    kind: TransactionKind,
    points: i64,
    reason: &str,
    related_date: Option<NaiveDate>,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO reward_transactions (employee_id, kind, points, reason, related_date)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(kind.as_str())
    .bind(points)
    .bind(reason)
    .bind(related_date)
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.last_insert_rowid())
}

/// Most recent ledger entries for an employee, newest first
pub async fn recent_transactions(
    pool: &SqlitePool,
    employee_id: &str,
    limit: u32,
) -> Result<Vec<RewardTransaction>> {
    let rows: Vec<TransactionRow> = sqlx::query_as(
        r#"
        SELECT id, employee_id, kind, points, reason, related_date, created_at
        FROM reward_transactions
        WHERE employee_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(employee_id)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    rows.into_iter().map(RewardTransaction::try_from).collect()
}

/// Signed sum of the full ledger for an employee
///
/// earned/bonus count positive, spent/penalty negative. This is the number
/// `reward_points.total_points` must always equal.
pub async fn ledger_sum(pool: &SqlitePool, employee_id: &str) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(
            CASE WHEN kind IN ('earned', 'bonus') THEN points ELSE -points END
        ), 0)
        FROM reward_transactions
        WHERE employee_id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_one(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.0)
}
