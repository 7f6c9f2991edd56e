//! ArbiBot - Main Entry Point
//!
//! Wires the in-memory ledger, the price simulation loop, the Telegram
//! notifier, and the dashboard API together, then serves until Ctrl+C.

use anyhow::Result;
use arbibot::arbitrage::OpportunityEvaluator;
use arbibot::execution::TradeExecutionEngine;
use arbibot::monitor::{PriceMonitor, SubscriberRegistry};
use arbibot::notifier::TelegramNotifier;
use arbibot::server::{self, AppState};
use arbibot::storage::{LedgerStore, MemStore};
use arbibot::{CONFIG, utils};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let _logging_guard = utils::setup_logging()?;

    let config = CONFIG.clone();

    info!("🤖 ArbiBot v0.1.0 - Simulated Arbitrage Monitor");
    info!("📋 Configuration:");
    info!("   Pair: {}", config.pair_label);
    info!("   Venues: {} / {}", config.venue_a_name, config.venue_b_name);
    info!("   Port: {}", config.port);
    info!("   ⚠️  SIMULATION MODE - No real funds at risk");

    // Composition root: every service is an explicit instance; nothing is
    // lazily globally initialized.
    let store: Arc<dyn LedgerStore> = Arc::new(MemStore::new());
    let registry = Arc::new(SubscriberRegistry::new());

    let notifier = Arc::new(TelegramNotifier::new(store.clone()));
    notifier.initialize().await;

    let monitor = Arc::new(PriceMonitor::new(
        OpportunityEvaluator::new(store.clone()),
        registry.clone(),
        notifier.clone(),
    ));

    let settings = store.bot_settings().await?;
    monitor.start(settings.refresh_interval_secs).await?;

    let executor = Arc::new(TradeExecutionEngine::new(store.clone(), notifier.clone()));

    let state = AppState {
        store,
        registry,
        monitor: monitor.clone(),
        executor,
        notifier,
    };

    server::serve(state, config.port).await?;

    monitor.stop().await;
    info!("🛑 Shutting down gracefully...");

    Ok(())
}
