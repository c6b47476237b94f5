//! Shared type definitions

use serde::{Deserialize, Serialize};

/// Granularity of a period-completion bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Weekly,
    Fortnightly,
    Monthly,
}

impl PeriodKind {
    /// Stable identifier used in the period_awards table
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Weekly => "weekly",
            PeriodKind::Fortnightly => "fortnightly",
            PeriodKind::Monthly => "monthly",
        }
    }
}
