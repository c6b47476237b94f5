//! ClickSend SMS provider

use async_trait::async_trait;
use buildflow_core::{Error, Result};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, instrument};

use super::SmsProvider;

const DEFAULT_BASE_URL: &str = "https://rest.clicksend.com";

/// ClickSend REST v3 client (basic auth with username + API key)
pub struct ClickSendProvider {
    http: Client,
    username: String,
    api_key: String,
    base_url: String,
}

impl ClickSendProvider {
    pub fn new(username: &str, api_key: &str) -> Self {
        Self {
            http: super::http_client(),
            username: username.to_string(),
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read CLICKSEND_USERNAME / CLICKSEND_API_KEY; None when either is missing
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("CLICKSEND_USERNAME").ok()?;
        let api_key = std::env::var("CLICKSEND_API_KEY").ok()?;
        Some(Self::new(&username, &api_key))
    }

    /// Point the provider at a different API host (tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl SmsProvider for ClickSendProvider {
    fn name(&self) -> &'static str {
        "ClickSend"
    }

    #[instrument(skip(self, message))]
    async fn send(&self, phone: &str, message: &str) -> Result<()> {
        let url = format!("{}/v3/sms/send", self.base_url);
        let body = json!({
            "messages": [{
                "to": phone,
                "body": message,
                "source": "buildflow",
            }]
        });

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.username, Some(&self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::DeliveryError {
                provider: "ClickSend".to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("ClickSend send failed: HTTP {} — {}", status, body);
            return Err(Error::DeliveryError {
                provider: "ClickSend".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        debug!("ClickSend accepted message for {}", phone);
        Ok(())
    }
}
