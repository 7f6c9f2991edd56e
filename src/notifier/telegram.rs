//! Telegram message delivery
//!
//! All sends are fire-and-forget: failures are logged and swallowed, and the
//! simulation timer is never blocked on delivery.

use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::CONFIG;
use crate::storage::LedgerStore;

struct Credentials {
    bot_token: String,
    chat_id: String,
}

pub struct TelegramNotifier {
    store: Arc<dyn LedgerStore>,
    client: reqwest::Client,
    api_base: String,
    credentials: RwLock<Option<Credentials>>,
}

impl TelegramNotifier {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self::with_api_base(store, CONFIG.telegram_api_base.clone())
    }

    /// Same as [`TelegramNotifier::new`] with the API endpoint overridden;
    /// used to point sends at a local mock server in tests.
    pub fn with_api_base(store: Arc<dyn LedgerStore>, api_base: String) -> Self {
        Self {
            store,
            client: reqwest::Client::new(),
            api_base,
            credentials: RwLock::new(None),
        }
    }

    /// Caches the bot token and chat id from the stored notifier settings.
    /// Call again after the settings change.
    pub async fn initialize(&self) {
        let settings = match self.store.notifier_settings().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load notifier settings: {e}");
                return;
            }
        };

        let mut credentials = self.credentials.write().await;
        *credentials = match (settings.bot_token, settings.chat_id) {
            (Some(bot_token), Some(chat_id)) => Some(Credentials { bot_token, chat_id }),
            _ => None,
        };
    }

    /// Sends `text` as a Markdown message. Returns whether the API accepted
    /// it; an unconfigured notifier logs the message and reports false.
    pub async fn send(&self, text: &str) -> bool {
        let credentials = self.credentials.read().await;
        let Some(creds) = credentials.as_ref() else {
            debug!("Telegram not configured, would send: {text}");
            return false;
        };

        let url = format!("{}/bot{}/sendMessage", self.api_base, creds.bot_token);
        let body = serde_json::json!({
            "chat_id": creds.chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        match self.client.post(&url).json(&body).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Error sending Telegram message: {e}");
                false
            }
        }
    }

    pub async fn test_connection(&self) -> bool {
        self.send("🤖 *ArbiBot Test Message*\n\nTelegram bot connection is working!")
            .await
    }

    pub async fn notify_trade_success(&self, net_profit: &str, percentage: &str) {
        let Ok(settings) = self.store.notifier_settings().await else {
            return;
        };
        if !settings.enabled || !settings.notify_trade_success {
            return;
        }

        let message = format!(
            "✅ *Arbitrage Trade Successful*\n\n💰 Net Profit: ${net_profit}\n📈 Return: {percentage}%\n⏰ {}",
            timestamp()
        );
        self.send(&message).await;
    }

    pub async fn notify_trade_failed(&self, reason: &str) {
        let Ok(settings) = self.store.notifier_settings().await else {
            return;
        };
        if !settings.enabled || !settings.notify_trade_failed {
            return;
        }

        let message = format!(
            "❌ *Trade Failed*\n\n🚫 Reason: {reason}\n⏰ {}",
            timestamp()
        );
        self.send(&message).await;
    }

    /// Alerts when an opportunity's net return clears the operator's alert
    /// threshold. The threshold check lives here so the simulation loop can
    /// hand off every profitable signal without reading settings itself.
    pub async fn notify_high_profit(&self, percentage: &str) {
        let Ok(settings) = self.store.notifier_settings().await else {
            return;
        };
        if !settings.enabled || !settings.notify_high_profit {
            return;
        }

        let Ok(current) = Decimal::from_str(percentage) else {
            return;
        };
        if current < settings.min_profit_alert {
            return;
        }

        let message = format!(
            "🚀 *High Profit Opportunity*\n\n📊 Potential Profit: {percentage}%\n💎 Above your {}% alert threshold\n⏰ {}",
            settings.min_profit_alert,
            timestamp()
        );
        self.send(&message).await;
    }

    pub async fn notify_error(&self, error: &str) {
        let Ok(settings) = self.store.notifier_settings().await else {
            return;
        };
        if !settings.enabled || !settings.notify_errors {
            return;
        }

        let message = format!(
            "⚠️ *System Error*\n\n🔧 Error: {error}\n⏰ {}",
            timestamp()
        );
        self.send(&message).await;
    }
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
