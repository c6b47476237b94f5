//! Employee models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A staff member eligible for reward points
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Mobile number for SMS notifications (raw, normalized on send)
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
