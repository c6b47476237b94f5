//! SMS delivery with provider failover
//!
//! Providers are tried in a fixed preference order (ClickSend, Twilio,
//! MessageBird); the first 2xx response wins. A provider with incomplete
//! credentials is skipped with a logged reason. One pass through the list,
//! no retries — this is a failover chain, not a backoff loop.

mod clicksend;
mod messagebird;
mod twilio;

pub use clicksend::ClickSendProvider;
pub use messagebird::MessageBirdProvider;
pub use twilio::TwilioProvider;

use async_trait::async_trait;
use buildflow_core::{Error, Result, SmsOutcome};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::phone::{normalize_phone, DiallingConfig};

/// Hard cap from the product docs: one SMS segment
pub const MAX_SMS_CHARS: usize = 160;

/// Per-provider HTTP timeout; a timed-out provider is not retried, the chain
/// moves straight to the next one
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared HTTP client construction for all providers
pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(PROVIDER_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}

/// One SMS vendor behind the failover chain
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Vendor name used in logs and delivery outcomes
    fn name(&self) -> &'static str;

    /// Attempt one delivery; Ok(()) means the vendor accepted the message
    async fn send(&self, phone: &str, message: &str) -> Result<()>;
}

/// Ordered failover chain over interchangeable SMS providers
pub struct SmsChain {
    providers: Vec<Box<dyn SmsProvider>>,
    dialling: DiallingConfig,
}

impl SmsChain {
    pub fn new(providers: Vec<Box<dyn SmsProvider>>, dialling: DiallingConfig) -> Self {
        Self {
            providers,
            dialling,
        }
    }

    /// Build the chain from environment credentials
    ///
    /// Providers with an incomplete credential set are left out of the chain
    /// rather than erroring the whole send.
    pub fn from_env() -> Self {
        let mut providers: Vec<Box<dyn SmsProvider>> = Vec::new();

        match ClickSendProvider::from_env() {
            Some(p) => providers.push(Box::new(p)),
            None => debug!("ClickSend credentials missing, provider skipped"),
        }
        match TwilioProvider::from_env() {
            Some(p) => providers.push(Box::new(p)),
            None => debug!("Twilio credentials missing, provider skipped"),
        }
        match MessageBirdProvider::from_env() {
            Some(p) => providers.push(Box::new(p)),
            None => debug!("MessageBird credentials missing, provider skipped"),
        }

        let chain = Self::new(providers, DiallingConfig::default());
        info!("SMS chain configured with {} provider(s)", chain.provider_count());
        chain
    }

    /// Number of providers currently in the chain
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Deliver one message, failing over across providers
    ///
    /// Validation failures (length, phone format) are errors and reach no
    /// provider. Provider failures never propagate: the returned outcome
    /// carries either the provider that delivered or the aggregate error.
    #[instrument(skip(self, message))]
    pub async fn send(&self, phone_number: &str, message: &str) -> Result<SmsOutcome> {
        let chars = message.chars().count();
        if chars > MAX_SMS_CHARS {
            return Err(Error::ValidationError(format!(
                "Message is {} characters, maximum is {}",
                chars, MAX_SMS_CHARS
            )));
        }

        let to = normalize_phone(phone_number, &self.dialling)?;

        for provider in &self.providers {
            debug!("Attempting SMS via {}", provider.name());

            match provider.send(&to, message).await {
                Ok(()) => {
                    info!("SMS delivered via {}", provider.name());
                    return Ok(SmsOutcome::delivered(provider.name()));
                }
                Err(e) => {
                    warn!("SMS via {} failed: {}", provider.name(), e);
                }
            }
        }

        error!("No SMS provider could deliver to {}", to);
        Ok(SmsOutcome::failed(&Error::AllProvidersFailed.to_string()))
    }
}
