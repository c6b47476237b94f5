//! MessageBird SMS provider

use async_trait::async_trait;
use buildflow_core::{Error, Result};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, instrument};

use super::SmsProvider;

const DEFAULT_BASE_URL: &str = "https://rest.messagebird.com";

/// MessageBird REST client (AccessKey header auth)
pub struct MessageBirdProvider {
    http: Client,
    api_key: String,
    base_url: String,
}

impl MessageBirdProvider {
    pub fn new(api_key: &str) -> Self {
        Self {
            http: super::http_client(),
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read MESSAGEBIRD_API_KEY; None when missing
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("MESSAGEBIRD_API_KEY").ok()?;
        Some(Self::new(&api_key))
    }

    /// Point the provider at a different API host (tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl SmsProvider for MessageBirdProvider {
    fn name(&self) -> &'static str {
        "MessageBird"
    }

    #[instrument(skip(self, message))]
    async fn send(&self, phone: &str, message: &str) -> Result<()> {
        let url = format!("{}/messages", self.base_url);
        let body = json!({
            "recipients": [phone],
            "originator": "BuildFlow",
            "body": message,
        });

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("AccessKey {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::DeliveryError {
                provider: "MessageBird".to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("MessageBird send failed: HTTP {} — {}", status, body);
            return Err(Error::DeliveryError {
                provider: "MessageBird".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        debug!("MessageBird accepted message for {}", phone);
        Ok(())
    }
}
