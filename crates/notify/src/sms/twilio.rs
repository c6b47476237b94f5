//! Twilio SMS provider

use async_trait::async_trait;
use buildflow_core::{Error, Result};
use reqwest::Client;
use tracing::{debug, error, instrument};

use super::SmsProvider;

const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

/// Twilio Messages API client (basic auth with account SID + auth token)
///
/// Unlike the other vendors Twilio requires a dedicated sending number,
/// so its credential set is three variables rather than two.
pub struct TwilioProvider {
    http: Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    base_url: String,
}

impl TwilioProvider {
    pub fn new(account_sid: &str, auth_token: &str, from_number: &str) -> Self {
        Self {
            http: super::http_client(),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from_number: from_number.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read TWILIO_ACCOUNT_SID / TWILIO_AUTH_TOKEN / TWILIO_PHONE_NUMBER;
    /// None when any of the three is missing
    pub fn from_env() -> Option<Self> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID").ok()?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN").ok()?;
        let from_number = std::env::var("TWILIO_PHONE_NUMBER").ok()?;
        Some(Self::new(&account_sid, &auth_token, &from_number))
    }

    /// Point the provider at a different API host (tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl SmsProvider for TwilioProvider {
    fn name(&self) -> &'static str {
        "Twilio"
    }

    #[instrument(skip(self, message))]
    async fn send(&self, phone: &str, message: &str) -> Result<()> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );
        let params = [
            ("To", phone),
            ("From", self.from_number.as_str()),
            ("Body", message),
        ];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::DeliveryError {
                provider: "Twilio".to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Twilio send failed: HTTP {} — {}", status, body);
            return Err(Error::DeliveryError {
                provider: "Twilio".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        debug!("Twilio accepted message for {}", phone);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_posts_form_to_messages_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("To".into(), "+61412345678".into()),
                mockito::Matcher::UrlEncoded("From".into(), "+61400000000".into()),
            ]))
            .with_status(201)
            .with_body(r#"{"sid":"SM1"}"#)
            .create_async()
            .await;

        let provider =
            TwilioProvider::new("AC123", "token", "+61400000000").with_base_url(&server.url());
        provider.send("+61412345678", "hello").await.unwrap();

        mock.assert_async().await;
    }
}
