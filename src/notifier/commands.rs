//! Telegram slash-command handling
//!
//! Wire this to a bot update stream; each command maps to one reply string.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::config::CONFIG;
use crate::monitor::PriceMonitor;
use crate::storage::LedgerStore;
use crate::types::BotStatusUpdate;

pub async fn handle_command(
    command: &str,
    store: &Arc<dyn LedgerStore>,
    monitor: &Arc<PriceMonitor>,
) -> String {
    match command.trim() {
        "/status" => status_message(store).await,
        "/profit" => profit_message(store).await,
        "/pause" => set_active(store, false).await,
        "/resume" => set_active(store, true).await,
        "/prices" => prices_message(monitor).await,
        "/help" => help_message(),
        _ => "Unknown command. Type /help for available commands.".to_string(),
    }
}

async fn status_message(store: &Arc<dyn LedgerStore>) -> String {
    let (Ok(status), Ok(settings)) = (store.bot_status().await, store.bot_settings().await)
    else {
        return "❌ Bot status unavailable".to_string();
    };

    let state = if status.is_active {
        "🟢 Active"
    } else {
        "🔴 Inactive"
    };

    format!(
        "🤖 *Bot Status*\n\n{state}\n⏱ Uptime: {}\n🔄 Cycles: {}\n📊 Min Profit: {}%\n🎯 Auto Trading: {}",
        format_uptime(status.uptime_secs),
        status.total_cycles,
        settings.min_profit_threshold,
        if settings.auto_trading_enabled { "ON" } else { "OFF" },
    )
}

async fn profit_message(store: &Arc<dyn LedgerStore>) -> String {
    let Ok(stats) = store.daily_stats().await else {
        return "❌ Daily stats unavailable".to_string();
    };

    format!(
        "💰 *Today's Performance*\n\n💵 Total Profit: ${}\n✅ Successful Trades: {}\n📈 Win Rate: {}%\n⛽ Gas Spent: ${}\n📊 Avg Profit: ${}",
        stats.total_profit,
        stats.successful_trades,
        stats.win_rate,
        stats.gas_spent,
        stats.avg_profit,
    )
}

async fn set_active(store: &Arc<dyn LedgerStore>, active: bool) -> String {
    let Ok(status) = store.bot_status().await else {
        return "❌ Cannot access bot status".to_string();
    };

    let updated = store
        .put_bot_status(BotStatusUpdate {
            is_active: active,
            uptime_secs: status.uptime_secs,
            total_cycles: status.total_cycles,
        })
        .await;
    if updated.is_err() {
        return "❌ Cannot access bot status".to_string();
    }

    if active {
        "▶️ *Bot Resumed*\n\nAutomatic trading has been resumed.".to_string()
    } else {
        "⏸️ *Bot Paused*\n\nAutomatic trading has been paused. Use /resume to continue.".to_string()
    }
}

async fn prices_message(monitor: &Arc<PriceMonitor>) -> String {
    let prices = monitor.current_prices().await;
    let diff_pct = ((prices.price_a - prices.price_b).abs()
        / ((prices.price_a + prices.price_b) / dec!(2)))
        * Decimal::ONE_HUNDRED;

    format!(
        "💱 *Current Prices*\n\n🦄 {}: {} {}\n🍣 {}: {} {}\n📊 Difference: {:.2}%\n⏰ {}",
        CONFIG.venue_a_name,
        prices.price_a,
        CONFIG.pair_label,
        CONFIG.venue_b_name,
        prices.price_b,
        CONFIG.pair_label,
        diff_pct,
        prices.observed_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn help_message() -> String {
    let commands = [
        "/status - Get bot status and statistics",
        "/profit - View today's profit summary",
        "/pause - Pause automated trading",
        "/resume - Resume automated trading",
        "/prices - Get current prices",
        "/help - Show this help message",
    ];
    format!("🤖 *Available Commands*\n\n{}", commands.join("\n"))
}

fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours}h {minutes}m")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrage::OpportunityEvaluator;
    use crate::monitor::SubscriberRegistry;
    use crate::notifier::TelegramNotifier;
    use crate::storage::MemStore;
    use crate::types::PriceScenario;

    fn build_fixture() -> (Arc<dyn LedgerStore>, Arc<PriceMonitor>) {
        let ledger: Arc<dyn LedgerStore> = Arc::new(MemStore::new());
        let registry = Arc::new(SubscriberRegistry::new());
        let notifier = Arc::new(TelegramNotifier::new(ledger.clone()));
        let monitor = Arc::new(PriceMonitor::new(
            OpportunityEvaluator::new(ledger.clone()),
            registry,
            notifier,
        ));
        (ledger, monitor)
    }

    #[tokio::test]
    async fn pause_and_resume_flip_the_active_flag() {
        let (store, monitor) = build_fixture();

        let reply = handle_command("/pause", &store, &monitor).await;
        assert!(reply.contains("Bot Paused"));
        assert!(!store.bot_status().await.unwrap().is_active);

        let reply = handle_command("/resume", &store, &monitor).await;
        assert!(reply.contains("Bot Resumed"));
        assert!(store.bot_status().await.unwrap().is_active);
    }

    #[tokio::test]
    async fn status_reflects_settings_and_counters() {
        let (store, monitor) = build_fixture();
        let reply = handle_command("/status", &store, &monitor).await;
        assert!(reply.contains("🟢 Active"));
        assert!(reply.contains("Min Profit: 1.0%"));
        assert!(reply.contains("Auto Trading: OFF"));
    }

    #[tokio::test]
    async fn prices_report_the_current_pair() {
        let (store, monitor) = build_fixture();
        monitor.inject_scenario(PriceScenario::NoProfit).await;

        let reply = handle_command("/prices", &store, &monitor).await;
        assert!(reply.contains("0.7412"));
        assert!(reply.contains("Difference: 0.00%"));
    }

    #[tokio::test]
    async fn unknown_commands_point_at_help() {
        let (store, monitor) = build_fixture();
        let reply = handle_command("/moon", &store, &monitor).await;
        assert!(reply.contains("/help"));

        let help = handle_command("/help", &store, &monitor).await;
        assert!(help.contains("/status"));
        assert!(help.contains("/prices"));
    }

    #[test]
    fn uptime_formats_hours_and_minutes() {
        assert_eq!(format_uptime(0), "0h 0m");
        assert_eq!(format_uptime(3725), "1h 2m");
    }
}
