//! Reward configuration persistence
//!
//! The config lives as a JSON blob in the settings key/value table. A missing
//! row is a hard ConfigurationError: the evaluator must never fall back to
//! silent defaults and mis-award points.

use buildflow_core::{Error, Result, RewardConfig};
use sqlx::SqlitePool;

const CONFIG_KEY: &str = "reward_config";

/// Load the reward config, failing if it has never been set
pub async fn load_reward_config(pool: &SqlitePool) -> Result<RewardConfig> {
    let json: Option<String> =
        sqlx::query_scalar::<sqlx::Sqlite, String>("SELECT value FROM settings WHERE key = ?")
            .bind(CONFIG_KEY)
            .fetch_optional(pool)
            .await
            .map_err(|e| Error::DatabaseError(e.to_string()))?;

    match json {
        Some(j) => Ok(serde_json::from_str(&j)?),
        None => Err(Error::ConfigurationError(
            "Reward config has not been set".to_string(),
        )),
    }
}

/// Persist the reward config, replacing any previous value
///
/// Validation happens in the engine before this is called; changes affect
/// future accruals only.
pub async fn save_reward_config(pool: &SqlitePool, config: &RewardConfig) -> Result<()> {
    let json = serde_json::to_string(config)?;

    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = ?2",
    )
    .bind(CONFIG_KEY)
    .bind(&json)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}
