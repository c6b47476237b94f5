//! SMS delivery result models

use serde::{Deserialize, Serialize};

/// Result of one pass through the SMS provider chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsOutcome {
    pub success: bool,
    /// Name of the provider that accepted the message
    #[serde(default)]
    pub provider_used: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SmsOutcome {
    /// Delivered through the named provider
    pub fn delivered(provider: &str) -> Self {
        Self {
            success: true,
            provider_used: Some(provider.to_string()),
            error: None,
        }
    }

    /// Every provider failed or was skipped
    pub fn failed(error: &str) -> Self {
        Self {
            success: false,
            provider_used: None,
            error: Some(error.to_string()),
        }
    }
}
