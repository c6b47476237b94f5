//! Leaderboard and dashboard read models

use serde::{Deserialize, Serialize};

use crate::models::{RewardAchievement, RewardPoints, RewardTransaction};

/// One row of the points leaderboard
///
/// Sorted by total points descending, ties broken by ascending employee id.
/// Streak fields are display-only and never part of the sort key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub employee_id: String,
    pub name: String,
    pub total_points: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    /// 1-based position; None for employees not yet awarded points
    pub rank: Option<u32>,
}

/// Response body for GET /api/rewards/dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub points: RewardPoints,
    pub recent_transactions: Vec<RewardTransaction>,
    pub achievements: Vec<RewardAchievement>,
    pub leaderboard: Vec<LeaderboardEntry>,
    /// 1-based rank of the requesting employee, None while unranked
    pub user_rank: Option<u32>,
    /// Number of employees on the leaderboard
    pub total_users: u32,
}
