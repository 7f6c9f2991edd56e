//! Trade execution engine
//!
//! All execution is simulated: no venue connectivity, no funds movement.
//! Every request leaves exactly one row in the transaction ledger, whatever
//! the outcome.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::GAS_ESTIMATE;
use crate::errors::{BotError, BotResult};
use crate::notifier::TelegramNotifier;
use crate::storage::LedgerStore;
use crate::types::{BotStatusUpdate, NewTransaction, TradeKind, TradeStatus};

/// Simulated processing delay for a manual trade round trip.
const EXECUTION_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsEstimate {
    pub profit: String,
    pub gas: String,
    pub net: String,
}

pub struct TradeExecutionEngine {
    store: Arc<dyn LedgerStore>,
    notifier: Arc<TelegramNotifier>,
}

impl TradeExecutionEngine {
    pub fn new(store: Arc<dyn LedgerStore>, notifier: Arc<TelegramNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Executes a manual arbitrage trade against the latest evaluated
    /// opportunity. The profitability gate here is the operator-configured
    /// threshold, not the evaluator's fixed signal cut.
    pub async fn execute_trade(&self, amount: Decimal, slippage: Decimal) -> TradeOutcome {
        info!(%amount, %slippage, "🚀 Executing simulated arbitrage trade");

        match self.try_execute(amount).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let reason = e.to_string();
                warn!("Trade execution failed: {reason}");
                if let Err(store_err) = self
                    .store
                    .create_transaction(NewTransaction {
                        kind: TradeKind::Arbitrage,
                        amount,
                        gross_profit: None,
                        gas_fee: None,
                        net_profit: None,
                        status: TradeStatus::Failed,
                        reason: Some(reason.clone()),
                        external_reference: None,
                    })
                    .await
                {
                    warn!("Failed to record failed trade: {store_err}");
                }

                let notifier = Arc::clone(&self.notifier);
                let failure = reason.clone();
                tokio::spawn(async move {
                    notifier.notify_trade_failed(&failure).await;
                });

                TradeOutcome {
                    success: false,
                    tx_hash: None,
                    profit: None,
                    gas_fee: None,
                    error: Some(reason),
                }
            }
        }
    }

    async fn try_execute(&self, amount: Decimal) -> BotResult<TradeOutcome> {
        let settings = self.store.bot_settings().await?;

        // Simulated processing time for the swap round trip.
        tokio::time::sleep(Duration::from_millis(EXECUTION_DELAY_MS)).await;

        let opportunity = self
            .store
            .latest_opportunity()
            .await?
            .ok_or(BotError::NoOpportunity)?;

        if opportunity.profit_percentage < settings.min_profit_threshold {
            let reason = format!(
                "Profit {}% below threshold {}%",
                opportunity.profit_percentage, settings.min_profit_threshold
            );
            self.store
                .create_transaction(NewTransaction {
                    kind: TradeKind::Skip,
                    amount,
                    gross_profit: None,
                    gas_fee: None,
                    net_profit: None,
                    status: TradeStatus::Skipped,
                    reason: Some(reason),
                    external_reference: None,
                })
                .await?;

            info!(
                profit_pct = %opportunity.profit_percentage,
                threshold = %settings.min_profit_threshold,
                "Trade skipped, profit below threshold"
            );

            return Ok(TradeOutcome {
                success: false,
                tx_hash: None,
                profit: None,
                gas_fee: None,
                error: Some("Profit below threshold".to_string()),
            });
        }

        let gross_profit = opportunity.profit_percentage / dec!(100) * amount;
        let gas_fee = GAS_ESTIMATE;
        let net_profit = gross_profit - gas_fee;
        let tx_hash = simulated_tx_hash();

        self.store
            .create_transaction(NewTransaction {
                kind: TradeKind::Arbitrage,
                amount,
                gross_profit: Some(gross_profit),
                gas_fee: Some(gas_fee),
                net_profit: Some(net_profit),
                status: TradeStatus::Success,
                reason: None,
                external_reference: Some(tx_hash.clone()),
            })
            .await?;

        let status = self.store.bot_status().await?;
        self.store
            .put_bot_status(BotStatusUpdate {
                is_active: status.is_active,
                uptime_secs: status.uptime_secs,
                total_cycles: status.total_cycles + 1,
            })
            .await?;

        info!(tx_hash = %tx_hash, net_profit = %net_profit, "✅ Simulated trade successful");

        let notifier = Arc::clone(&self.notifier);
        let profit = format!("{net_profit:.2}");
        let pct = format!("{:.2}", opportunity.profit_percentage);
        tokio::spawn(async move {
            notifier.notify_trade_success(&profit, &pct).await;
        });

        Ok(TradeOutcome {
            success: true,
            tx_hash: Some(tx_hash),
            profit: Some(format!("{net_profit:.2}")),
            gas_fee: Some(format!("{gas_fee:.2}")),
            error: None,
        })
    }

    /// Projects returns for a hypothetical trade of `amount` against the
    /// latest opportunity; conservative zeros when no opportunity exists yet.
    pub async fn estimated_returns(&self, amount: Decimal) -> BotResult<ReturnsEstimate> {
        let Some(opportunity) = self.store.latest_opportunity().await? else {
            return Ok(ReturnsEstimate {
                profit: "0.00".to_string(),
                gas: format!("{GAS_ESTIMATE:.2}"),
                net: "0.00".to_string(),
            });
        };

        let gross_profit = opportunity.profit_percentage / dec!(100) * amount;
        let net_profit = gross_profit - GAS_ESTIMATE;

        Ok(ReturnsEstimate {
            profit: format!("{gross_profit:.2}"),
            gas: format!("{GAS_ESTIMATE:.2}"),
            net: format!("{net_profit:.2}"),
        })
    }
}

/// 64 hex chars behind a 0x prefix, like a real chain txid.
fn simulated_tx_hash() -> String {
    format!(
        "0x{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStore;
    use crate::types::NewOpportunity;

    fn build_engine() -> (TradeExecutionEngine, Arc<MemStore>) {
        let store = Arc::new(MemStore::new());
        let ledger: Arc<dyn LedgerStore> = store.clone();
        let notifier = Arc::new(TelegramNotifier::new(ledger.clone()));
        (TradeExecutionEngine::new(ledger, notifier), store)
    }

    async fn seed_opportunity(store: &MemStore, profit_pct: Decimal) {
        store
            .create_opportunity(NewOpportunity {
                price_a: dec!(0.7450),
                price_b: dec!(0.7380),
                profit_percentage: profit_pct,
                profitable: profit_pct >= dec!(1.0),
            })
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn no_opportunity_records_a_failed_transaction() {
        let (engine, store) = build_engine();

        let outcome = engine.execute_trade(dec!(400), dec!(0.5)).await;
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("No arbitrage opportunity found"));

        let txs = store.list_transactions(10, 0).await.unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].status, TradeStatus::Failed);
        assert!(txs[0].reason.is_some());
        assert!(txs[0].external_reference.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn below_threshold_records_a_skip_with_reason() {
        let (engine, store) = build_engine();
        seed_opportunity(&store, dec!(0.25)).await;

        let outcome = engine.execute_trade(dec!(400), dec!(0.5)).await;
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Profit below threshold"));

        let txs = store.list_transactions(10, 0).await.unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].kind, TradeKind::Skip);
        assert_eq!(txs[0].status, TradeStatus::Skipped);
        assert_eq!(
            txs[0].reason.as_deref(),
            Some("Profit 0.25% below threshold 1.0%")
        );

        // A skip is not a completed cycle.
        assert_eq!(store.bot_status().await.unwrap().total_cycles, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn profitable_trade_records_success_and_counts_a_cycle() {
        let (engine, store) = build_engine();
        seed_opportunity(&store, dec!(2.0)).await;

        let outcome = engine.execute_trade(dec!(400), dec!(0.5)).await;
        assert!(outcome.success);
        // 2% of 400 gross, minus the flat gas estimate.
        assert_eq!(outcome.profit.as_deref(), Some("7.63"));
        assert_eq!(outcome.gas_fee.as_deref(), Some("0.37"));

        let hash = outcome.tx_hash.unwrap();
        assert!(hash.starts_with("0x"));
        assert_eq!(hash.len(), 66);

        let txs = store.list_transactions(10, 0).await.unwrap();
        assert_eq!(txs[0].status, TradeStatus::Success);
        assert_eq!(txs[0].gross_profit, Some(dec!(8.000)));
        assert_eq!(txs[0].net_profit, Some(dec!(7.630)));
        assert!(txs[0].reason.is_none());

        assert_eq!(store.bot_status().await.unwrap().total_cycles, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn estimate_uses_the_latest_opportunity() {
        let (engine, store) = build_engine();

        let empty = engine.estimated_returns(dec!(400)).await.unwrap();
        assert_eq!(empty.profit, "0.00");
        assert_eq!(empty.gas, "0.37");
        assert_eq!(empty.net, "0.00");

        seed_opportunity(&store, dec!(1.5)).await;
        let estimate = engine.estimated_returns(dec!(400)).await.unwrap();
        assert_eq!(estimate.profit, "6.00");
        assert_eq!(estimate.net, "5.63");
    }
}
