//! Timesheet submission events and evaluation outcomes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::PeriodKind;

/// Leave classification attached to a timesheet day
///
/// Every kind here breaks the submission streak; a worked day carries none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveKind {
    Sick,
    Personal,
    Annual,
    LeaveWithoutPay,
}

impl LeaveKind {
    /// Stable identifier stored in the submission_days table
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveKind::Sick => "sick",
            LeaveKind::Personal => "personal",
            LeaveKind::Annual => "annual",
            LeaveKind::LeaveWithoutPay => "leave_without_pay",
        }
    }
}

/// A single timesheet submission event fed into the rules evaluator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEvent {
    pub employee_id: String,
    pub date: NaiveDate,
    /// Leave classification for the day, if any
    #[serde(default)]
    pub leave: Option<LeaveKind>,
}

/// A period bonus granted during one evaluation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAward {
    pub kind: PeriodKind,
    pub period_start: NaiveDate,
    pub points: i64,
}

/// Side-effect summary returned by the rules evaluator
///
/// Callers treat evaluation as fire-and-forget relative to the timesheet
/// write itself; this summary is what they get to log or display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOutcome {
    pub employee_id: String,
    pub date: NaiveDate,
    /// True when the daily award was applied (false for duplicates and leave)
    pub daily_awarded: bool,
    /// True when the day was already recorded and nothing was awarded
    pub duplicate: bool,
    /// True when a streak-breaking leave reset the streak
    pub streak_reset: bool,
    /// Total signed points granted by this pass (daily + bonuses)
    pub points_awarded: i64,
    pub streak_before: i64,
    pub streak_after: i64,
    pub period_awards: Vec<PeriodAward>,
    /// Names of achievements earned during this pass
    pub achievements: Vec<String>,
}

impl EvaluationOutcome {
    /// Outcome skeleton for an event before any rule has fired
    pub fn empty(employee_id: &str, date: NaiveDate, streak: i64) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            date,
            daily_awarded: false,
            duplicate: false,
            streak_reset: false,
            points_awarded: 0,
            streak_before: streak,
            streak_after: streak,
            period_awards: Vec::new(),
            achievements: Vec::new(),
        }
    }
}
