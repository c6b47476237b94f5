//! Reward balance, ledger, and achievement models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Ledger entry classification
///
/// `Earned` and `Bonus` add to the balance, `Spent` and `Penalty` subtract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earned,
    Spent,
    Bonus,
    Penalty,
}

impl TransactionKind {
    /// Stable identifier stored in the reward_transactions table
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Earned => "earned",
            TransactionKind::Spent => "spent",
            TransactionKind::Bonus => "bonus",
            TransactionKind::Penalty => "penalty",
        }
    }

    /// Parse a stored identifier back into a kind
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "earned" => Ok(TransactionKind::Earned),
            "spent" => Ok(TransactionKind::Spent),
            "bonus" => Ok(TransactionKind::Bonus),
            "penalty" => Ok(TransactionKind::Penalty),
            other => Err(Error::InvalidData(format!(
                "Unknown transaction kind: {}",
                other
            ))),
        }
    }

    /// +1 for kinds that add to the balance, -1 for kinds that subtract
    pub fn sign(&self) -> i64 {
        match self {
            TransactionKind::Earned | TransactionKind::Bonus => 1,
            TransactionKind::Spent | TransactionKind::Penalty => -1,
        }
    }
}

/// Per-employee reward balance and streak counters
///
/// One row per employee, created on first evaluation and only ever updated.
/// `total_points` must always reconcile against the transaction ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardPoints {
    pub employee_id: String,
    pub total_points: i64,
    /// Points not yet spent in the rewards store
    pub available_points: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_submission_date: Option<NaiveDate>,
    /// Set when the ledger fails reconciliation; blocks further awards
    #[serde(default)]
    pub awards_halted: bool,
}

impl RewardPoints {
    /// Fresh zeroed balance for a new employee
    pub fn zero(employee_id: &str) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            total_points: 0,
            available_points: 0,
            current_streak: 0,
            longest_streak: 0,
            last_submission_date: None,
            awards_halted: false,
        }
    }
}

/// Immutable ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardTransaction {
    pub id: i64,
    pub employee_id: String,
    pub kind: TransactionKind,
    /// Magnitude; direction comes from the kind
    pub points: i64,
    pub reason: String,
    /// The business date the entry relates to (submission day, period start)
    pub related_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
}

impl RewardTransaction {
    /// Signed contribution of this entry to the running balance
    pub fn signed_points(&self) -> i64 {
        self.kind.sign() * self.points
    }
}

/// Signed sum of a slice of ledger entries
pub fn ledger_balance(transactions: &[RewardTransaction]) -> i64 {
    transactions.iter().map(|t| t.signed_points()).sum()
}

/// Awarded badge
///
/// At most one per (employee, kind); the award is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardAchievement {
    pub id: i64,
    pub employee_id: String,
    pub kind: String,
    pub name: String,
    pub description: String,
    pub points_awarded: i64,
    pub badge_icon: String,
    pub achieved_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            TransactionKind::Earned,
            TransactionKind::Spent,
            TransactionKind::Bonus,
            TransactionKind::Penalty,
        ] {
            assert_eq!(TransactionKind::parse(kind.as_str()).unwrap(), kind);
        }
        assert!(TransactionKind::parse("refund").is_err());
    }

    #[test]
    fn test_ledger_balance_signs() {
        let tx = |kind, points| RewardTransaction {
            id: 0,
            employee_id: "e1".to_string(),
            kind,
            points,
            reason: String::new(),
            related_date: None,
            created_at: None,
        };

        let ledger = vec![
            tx(TransactionKind::Earned, 10),
            tx(TransactionKind::Bonus, 50),
            tx(TransactionKind::Spent, 20),
            tx(TransactionKind::Penalty, 5),
        ];

        assert_eq!(ledger_balance(&ledger), 35);
    }
}
