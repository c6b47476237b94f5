//! Submission-day guard and period-award claims
//!
//! Both tables exist for their unique indexes: the conflict-ignoring inserts
//! here are what make daily points and period bonuses exactly-once, including
//! under near-simultaneous submissions for the same employee and date.

use buildflow_core::{Error, LeaveKind, PeriodKind, Result};
use chrono::NaiveDate;
use sqlx::SqliteConnection;

/// Record a submission day if it is not already recorded
///
/// Returns true when this call inserted the row, false when the (employee,
/// day) pair was already present. The UNIQUE index makes the check-then-insert
/// race-safe.
pub async fn try_record_day(
    conn: &mut SqliteConnection,
    employee_id: &str,
    day: NaiveDate,
    leave: Option<LeaveKind>,
) -> Result<bool> {
    let result = sqlx::query(
        r#"INSERT INTO submission_days (employee_id, day, leave_kind)
           VALUES (?, ?, ?)
           ON CONFLICT(employee_id, day) DO NOTHING"#,
    )
    .bind(employee_id)
    .bind(day)
    .bind(leave.map(|l| l.as_str()))
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.rows_affected() == 1)
}

/// Count submission days falling on weekdays within [start, end]
///
/// Leave days count: period completeness asks whether a submission exists for
/// every required working day, not whether it earned points. strftime('%w')
/// yields '0' for Sunday and '6' for Saturday.
pub async fn count_weekday_submissions(
    conn: &mut SqliteConnection,
    employee_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM submission_days
        WHERE employee_id = ?
          AND day >= ? AND day <= ?
          AND strftime('%w', day) NOT IN ('0', '6')
        "#,
    )
    .bind(employee_id)
    .bind(start)
    .bind(end)
    .fetch_one(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.0)
}

/// Claim a period bonus if it has not been claimed yet
///
/// Returns true exactly once per (employee, period kind, period start); the
/// UNIQUE index guarantees re-evaluation can never double-award.
pub async fn try_claim_period(
    conn: &mut SqliteConnection,
    employee_id: &str,
    kind: PeriodKind,
    period_start: NaiveDate,
) -> Result<bool> {
    let result = sqlx::query(
        r#"INSERT INTO period_awards (employee_id, period_kind, period_start)
           VALUES (?, ?, ?)
           ON CONFLICT(employee_id, period_kind, period_start) DO NOTHING"#,
    )
    .bind(employee_id)
    .bind(kind.as_str())
    .bind(period_start)
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.rows_affected() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::{employees, Database};

    async fn setup() -> Database {
        let db = Database::connect_in_memory().await.unwrap();
        employees::upsert_employee(db.pool(), "emp-1", "Test Employee", None)
            .await
            .unwrap();
        db
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_day_guard_records_once() {
        let db = setup().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let first = try_record_day(&mut conn, "emp-1", date(2025, 3, 3), None)
            .await
            .unwrap();
        let second = try_record_day(&mut conn, "emp-1", date(2025, 3, 3), None)
            .await
            .unwrap();

        assert!(first);
        assert!(!second);
    }

    #[tokio::test]
    async fn test_leave_day_counts_toward_weekday_submissions() {
        let db = setup().await;
        let mut conn = db.pool().acquire().await.unwrap();

        // Monday worked, Tuesday sick, Saturday worked
        try_record_day(&mut conn, "emp-1", date(2025, 3, 3), None)
            .await
            .unwrap();
        try_record_day(&mut conn, "emp-1", date(2025, 3, 4), Some(LeaveKind::Sick))
            .await
            .unwrap();
        try_record_day(&mut conn, "emp-1", date(2025, 3, 8), None)
            .await
            .unwrap();

        let count = count_weekday_submissions(&mut conn, "emp-1", date(2025, 3, 3), date(2025, 3, 9))
            .await
            .unwrap();

        // Saturday is excluded from the weekday count
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_period_claim_is_exactly_once() {
        let db = setup().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let first = try_claim_period(&mut conn, "emp-1", PeriodKind::Weekly, date(2025, 3, 3))
            .await
            .unwrap();
        let again = try_claim_period(&mut conn, "emp-1", PeriodKind::Weekly, date(2025, 3, 3))
            .await
            .unwrap();
        let other_kind = try_claim_period(&mut conn, "emp-1", PeriodKind::Fortnightly, date(2025, 3, 3))
            .await
            .unwrap();

        assert!(first);
        assert!(!again);
        assert!(other_kind);
    }
}
