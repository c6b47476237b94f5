//! Admin operations on the reward configuration

use buildflow_core::{Result, RewardConfig};
use buildflow_persistence::sqlite;
use sqlx::SqlitePool;
use tracing::info;

/// Validate and persist new reward tunables
///
/// Backs PUT /api/admin/rewards/config. Rejected values leave the stored
/// config untouched; accepted values affect future accruals only.
pub async fn update_config(pool: &SqlitePool, new: &RewardConfig) -> Result<RewardConfig> {
    new.validate()?;
    sqlite::save_reward_config(pool, new).await?;
    info!(
        "Reward config updated: daily {}, weekly {}, fortnightly {}, monthly {}, weekend bonus {}",
        new.daily_points,
        new.weekly_points,
        new.fortnightly_points,
        new.monthly_points,
        new.weekend_bonus
    );
    Ok(new.clone())
}

/// Load the stored config for an evaluation pass
pub async fn load_config(pool: &SqlitePool) -> Result<RewardConfig> {
    sqlite::load_reward_config(pool).await
}
