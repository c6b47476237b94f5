//! Reward event notifications over SMS
//!
//! Delivery is fire-and-forget: reward messages are a perk, never a gate,
//! so every failure is logged and swallowed. Messages go through the
//! provider failover chain in buildflow-notify.

use buildflow_core::PeriodKind;
use buildflow_notify::SmsChain;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ─── Config ──────────────────────────────────────────────────────────

/// Per-category notification toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierConfig {
    /// Master switch — if false, no reward SMS at all
    pub enabled: bool,
    /// Achievement badge announcements
    pub achievement_alerts: bool,
    /// Weekly/fortnightly/monthly bonus announcements
    pub period_bonus_alerts: bool,
    /// Streak reset notices
    pub streak_reset_alerts: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            achievement_alerts: true,
            period_bonus_alerts: true,
            streak_reset_alerts: false, // off by default — too noisy
        }
    }
}

// ─── Notifier ────────────────────────────────────────────────────────

/// Sends reward event messages through the SMS failover chain
pub struct RewardNotifier {
    chain: SmsChain,
    config: NotifierConfig,
}

impl RewardNotifier {
    pub fn new(chain: SmsChain) -> Self {
        Self {
            chain,
            config: NotifierConfig::default(),
        }
    }

    pub fn with_config(chain: SmsChain, config: NotifierConfig) -> Self {
        Self { chain, config }
    }

    /// Update the notification configuration
    pub fn set_config(&mut self, config: NotifierConfig) {
        self.config = config;
    }

    /// Notify when an achievement badge lands
    pub async fn notify_achievement(&self, phone: &str, badge_name: &str, points: i64) {
        if !self.config.enabled || !self.config.achievement_alerts {
            return;
        }

        self.send(
            phone,
            &format!("You earned the {} badge (+{} pts)!", badge_name, points),
        )
        .await;
    }

    /// Notify when a period-completion bonus lands
    pub async fn notify_period_bonus(&self, phone: &str, kind: PeriodKind, points: i64) {
        if !self.config.enabled || !self.config.period_bonus_alerts {
            return;
        }

        let label = match kind {
            PeriodKind::Weekly => "week",
            PeriodKind::Fortnightly => "fortnight",
            PeriodKind::Monthly => "month",
        };
        self.send(
            phone,
            &format!("Full {} of timesheets submitted: +{} pts!", label, points),
        )
        .await;
    }

    /// Notify when a leave day resets the streak
    pub async fn notify_streak_reset(&self, phone: &str) {
        if !self.config.enabled || !self.config.streak_reset_alerts {
            return;
        }

        self.send(phone, "Your submission streak has reset. Back tomorrow?")
            .await;
    }

    // ─── Internal ────────────────────────────────────────────────

    /// Send one message, logging instead of propagating failures
    async fn send(&self, phone: &str, body: &str) {
        debug!("Reward SMS: {}", body);

        match self.chain.send(phone, body).await {
            Ok(outcome) if outcome.success => {}
            Ok(outcome) => warn!(
                "Reward SMS not delivered: {}",
                outcome.error.unwrap_or_default()
            ),
            Err(e) => warn!("Reward SMS rejected: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use buildflow_core::Result;
    use buildflow_notify::{DiallingConfig, SmsProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SmsProvider for CountingProvider {
        fn name(&self) -> &'static str {
            "Counting"
        }

        async fn send(&self, _phone: &str, _message: &str) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn chain() -> (SmsChain, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = SmsChain::new(
            vec![Box::new(CountingProvider {
                calls: calls.clone(),
            })],
            DiallingConfig::default(),
        );
        (chain, calls)
    }

    fn notifier(config: NotifierConfig) -> (RewardNotifier, Arc<AtomicUsize>) {
        let (chain, calls) = chain();
        (RewardNotifier::with_config(chain, config), calls)
    }

    #[tokio::test]
    async fn test_achievement_alert_sends_by_default() {
        let (chain, calls) = chain();
        let notifier = RewardNotifier::new(chain);

        notifier
            .notify_achievement("0412345678", "Full Week", 15)
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_set_config_applies_immediately() {
        let (chain, calls) = chain();
        let mut notifier = RewardNotifier::new(chain);

        notifier.set_config(NotifierConfig {
            enabled: false,
            ..NotifierConfig::default()
        });
        notifier
            .notify_achievement("0412345678", "Full Week", 15)
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_master_switch_silences_everything() {
        let (notifier, calls) = notifier(NotifierConfig {
            enabled: false,
            ..NotifierConfig::default()
        });

        notifier
            .notify_achievement("0412345678", "Full Week", 15)
            .await;
        notifier
            .notify_period_bonus("0412345678", PeriodKind::Weekly, 50)
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_streak_reset_alert_is_opt_in() {
        let (silent, silent_calls) = notifier(NotifierConfig::default());
        silent.notify_streak_reset("0412345678").await;
        assert_eq!(silent_calls.load(Ordering::SeqCst), 0);

        let (opted_in, calls) = notifier(NotifierConfig {
            streak_reset_alerts: true,
            ..NotifierConfig::default()
        });
        opted_in.notify_streak_reset("0412345678").await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
