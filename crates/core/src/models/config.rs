//! Reward accrual configuration

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Admin-tunable point values
///
/// Changes apply to future accruals only; past ledger entries are never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardConfig {
    /// Points for one qualifying submission day
    pub daily_points: i64,
    /// Bonus for a complete calendar week of submissions
    pub weekly_points: i64,
    /// Bonus for a complete fortnight of submissions
    pub fortnightly_points: i64,
    /// Bonus for a complete calendar month of submissions
    pub monthly_points: i64,
    /// Extra points on top of the daily award for Saturday/Sunday work
    pub weekend_bonus: i64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            daily_points: 10,
            weekly_points: 50,
            fortnightly_points: 120,
            monthly_points: 250,
            weekend_bonus: 5,
        }
    }
}

impl RewardConfig {
    /// Reject negative values before anything is persisted
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("dailyPoints", self.daily_points),
            ("weeklyPoints", self.weekly_points),
            ("fortnightlyPoints", self.fortnightly_points),
            ("monthlyPoints", self.monthly_points),
            ("weekendBonus", self.weekend_bonus),
        ];

        for (name, value) in fields {
            if value < 0 {
                return Err(Error::ValidationError(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
