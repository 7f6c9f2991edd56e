//! Operator-configurable settings and bot status singletons

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Trading thresholds and operational flags. A singleton: mutated only via
/// full replace, never partially patched at the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotSettings {
    pub id: String,
    /// Minimum profit percentage a trade execution requires. Distinct from
    /// the evaluator's fixed signal threshold.
    pub min_profit_threshold: Decimal,
    pub max_slippage: Decimal,
    pub gas_limit: u32,
    pub gas_price_strategy: String,
    pub auto_trading_enabled: bool,
    pub max_trade_amount: Decimal,
    pub refresh_interval_secs: u32,
    pub updated_at: DateTime<Utc>,
}

/// Replace form of [`BotSettings`]; the store keeps the id and stamps
/// `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotSettingsUpdate {
    pub min_profit_threshold: Decimal,
    pub max_slippage: Decimal,
    pub gas_limit: u32,
    pub gas_price_strategy: String,
    pub auto_trading_enabled: bool,
    pub max_trade_amount: Decimal,
    pub refresh_interval_secs: u32,
}

impl Default for BotSettingsUpdate {
    fn default() -> Self {
        Self {
            min_profit_threshold: dec!(1.0),
            max_slippage: dec!(0.5),
            gas_limit: 500_000,
            gas_price_strategy: "standard".to_string(),
            auto_trading_enabled: false,
            max_trade_amount: dec!(1000),
            refresh_interval_secs: crate::config::DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

/// Messaging-bot credentials and notification flags. Singleton, full replace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierSettings {
    pub id: String,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub enabled: bool,
    pub notify_trade_success: bool,
    pub notify_trade_failed: bool,
    pub notify_high_profit: bool,
    pub notify_errors: bool,
    pub min_profit_alert: Decimal,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierSettingsUpdate {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub enabled: bool,
    pub notify_trade_success: bool,
    pub notify_trade_failed: bool,
    pub notify_high_profit: bool,
    pub notify_errors: bool,
    pub min_profit_alert: Decimal,
}

impl Default for NotifierSettingsUpdate {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            enabled: false,
            notify_trade_success: true,
            notify_trade_failed: true,
            notify_high_profit: true,
            notify_errors: true,
            min_profit_alert: dec!(1.5),
        }
    }
}

/// Coarse liveness/throughput counters for the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotStatus {
    pub id: String,
    pub is_active: bool,
    pub uptime_secs: u64,
    pub total_cycles: u64,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotStatusUpdate {
    pub is_active: bool,
    pub uptime_secs: u64,
    pub total_cycles: u64,
}
