//! Achievement badge persistence

use buildflow_core::{Error, Result, RewardAchievement};
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

#[derive(Debug, sqlx::FromRow)]
struct AchievementRow {
    id: i64,
    employee_id: String,
    kind: String,
    name: String,
    description: String,
    points_awarded: i64,
    badge_icon: String,
    achieved_at: Option<DateTime<Utc>>,
}

impl From<AchievementRow> for RewardAchievement {
    fn from(row: AchievementRow) -> Self {
        RewardAchievement {
            id: row.id,
            employee_id: row.employee_id,
            kind: row.kind,
            name: row.name,
            description: row.description,
            points_awarded: row.points_awarded,
            badge_icon: row.badge_icon,
            achieved_at: row.achieved_at,
        }
    }
}

/// Award a badge if the employee does not already hold it
///
/// Returns true when this call created the badge. The UNIQUE (employee, kind)
/// index keeps milestone awards idempotent across re-evaluations.
pub async fn try_award_achievement(
    conn: &mut SqliteConnection,
    employee_id: &str,
    kind: &str,
    name: &str,
    description: &str,
    points_awarded: i64,
    badge_icon: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"INSERT INTO reward_achievements
               (employee_id, kind, name, description, points_awarded, badge_icon)
           VALUES (?, ?, ?, ?, ?, ?)
           ON CONFLICT(employee_id, kind) DO NOTHING"#,
    )
    .bind(employee_id)
    .bind(kind)
    .bind(name)
    .bind(description)
    .bind(points_awarded)
    .bind(badge_icon)
    .execute(conn)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(result.rows_affected() == 1)
}

/// All badges held by an employee, newest first
pub async fn list_achievements(
    pool: &SqlitePool,
    employee_id: &str,
) -> Result<Vec<RewardAchievement>> {
    let rows: Vec<AchievementRow> = sqlx::query_as(
        r#"
        SELECT id, employee_id, kind, name, description, points_awarded, badge_icon, achieved_at
        FROM reward_achievements
        WHERE employee_id = ?
        ORDER BY achieved_at DESC, id DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(rows.into_iter().map(RewardAchievement::from).collect())
}
