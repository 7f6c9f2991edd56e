//! In-memory reference implementation of the ledger store

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::LedgerStore;
use crate::errors::BotResult;
use crate::types::{
    BotSettings, BotSettingsUpdate, BotStatus, BotStatusUpdate, DailyStats, NewOpportunity,
    NewTransaction, NotifierSettings, NotifierSettingsUpdate, OpportunityRecord, TradeStatus,
    TransactionRecord,
};

/// Process-lifetime store. Vectors double as the insertion order, which is
/// what breaks `observed_at` ties for the latest-record queries.
pub struct MemStore {
    opportunities: RwLock<Vec<OpportunityRecord>>,
    transactions: RwLock<Vec<TransactionRecord>>,
    bot_settings: RwLock<BotSettings>,
    notifier_settings: RwLock<NotifierSettings>,
    bot_status: RwLock<BotStatus>,
}

impl MemStore {
    pub fn new() -> Self {
        let defaults = BotSettingsUpdate::default();
        let notifier_defaults = NotifierSettingsUpdate::default();
        Self {
            opportunities: RwLock::new(Vec::new()),
            transactions: RwLock::new(Vec::new()),
            bot_settings: RwLock::new(BotSettings {
                id: Uuid::new_v4().to_string(),
                min_profit_threshold: defaults.min_profit_threshold,
                max_slippage: defaults.max_slippage,
                gas_limit: defaults.gas_limit,
                gas_price_strategy: defaults.gas_price_strategy,
                auto_trading_enabled: defaults.auto_trading_enabled,
                max_trade_amount: defaults.max_trade_amount,
                refresh_interval_secs: defaults.refresh_interval_secs,
                updated_at: Utc::now(),
            }),
            notifier_settings: RwLock::new(NotifierSettings {
                id: Uuid::new_v4().to_string(),
                bot_token: notifier_defaults.bot_token,
                chat_id: notifier_defaults.chat_id,
                enabled: notifier_defaults.enabled,
                notify_trade_success: notifier_defaults.notify_trade_success,
                notify_trade_failed: notifier_defaults.notify_trade_failed,
                notify_high_profit: notifier_defaults.notify_high_profit,
                notify_errors: notifier_defaults.notify_errors,
                min_profit_alert: notifier_defaults.min_profit_alert,
                updated_at: Utc::now(),
            }),
            bot_status: RwLock::new(BotStatus {
                id: "singleton".to_string(),
                is_active: true,
                uptime_secs: 0,
                total_cycles: 0,
                last_update: Utc::now(),
            }),
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for MemStore {
    async fn create_opportunity(&self, new: NewOpportunity) -> BotResult<OpportunityRecord> {
        let record = OpportunityRecord {
            id: Uuid::new_v4().to_string(),
            price_a: new.price_a,
            price_b: new.price_b,
            profit_percentage: new.profit_percentage,
            profitable: new.profitable,
            observed_at: Utc::now(),
        };
        self.opportunities.write().await.push(record.clone());
        Ok(record)
    }

    async fn latest_opportunity(&self) -> BotResult<Option<OpportunityRecord>> {
        let opportunities = self.opportunities.read().await;
        Ok(opportunities
            .iter()
            .enumerate()
            .max_by_key(|(index, record)| (record.observed_at, *index))
            .map(|(_, record)| record.clone()))
    }

    async fn list_opportunities(&self, limit: usize) -> BotResult<Vec<OpportunityRecord>> {
        let opportunities = self.opportunities.read().await;
        Ok(opportunities.iter().rev().take(limit).cloned().collect())
    }

    async fn create_transaction(&self, new: NewTransaction) -> BotResult<TransactionRecord> {
        let record = TransactionRecord {
            id: Uuid::new_v4().to_string(),
            kind: new.kind,
            amount: new.amount,
            gross_profit: new.gross_profit,
            gas_fee: new.gas_fee,
            net_profit: new.net_profit,
            status: new.status,
            reason: new.reason,
            observed_at: Utc::now(),
            external_reference: new.external_reference,
        };
        self.transactions.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_transactions(
        &self,
        limit: usize,
        offset: usize,
    ) -> BotResult<Vec<TransactionRecord>> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_transactions(&self) -> BotResult<u64> {
        Ok(self.transactions.read().await.len() as u64)
    }

    async fn daily_stats(&self) -> BotResult<DailyStats> {
        let today = Utc::now().date_naive();
        let transactions = self.transactions.read().await;
        let todays: Vec<&TransactionRecord> = transactions
            .iter()
            .filter(|tx| tx.observed_at.date_naive() == today)
            .collect();

        let successful: Vec<&&TransactionRecord> = todays
            .iter()
            .filter(|tx| tx.status == TradeStatus::Success)
            .collect();

        let total_profit: Decimal = successful
            .iter()
            .filter_map(|tx| tx.net_profit)
            .sum();
        let gas_spent: Decimal = successful.iter().filter_map(|tx| tx.gas_fee).sum();
        let avg_profit = if successful.is_empty() {
            Decimal::ZERO
        } else {
            total_profit / Decimal::from(successful.len() as u64)
        };
        let win_rate = if todays.is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from(successful.len() as u64) / Decimal::from(todays.len() as u64)
                * Decimal::ONE_HUNDRED
        };

        Ok(DailyStats {
            total_profit: format!("{total_profit:.2}"),
            successful_trades: successful.len() as u64,
            avg_profit: format!("{avg_profit:.2}"),
            gas_spent: format!("{gas_spent:.2}"),
            win_rate: format!("{win_rate:.1}"),
        })
    }

    async fn bot_settings(&self) -> BotResult<BotSettings> {
        Ok(self.bot_settings.read().await.clone())
    }

    async fn put_bot_settings(&self, update: BotSettingsUpdate) -> BotResult<BotSettings> {
        let mut settings = self.bot_settings.write().await;
        *settings = BotSettings {
            id: settings.id.clone(),
            min_profit_threshold: update.min_profit_threshold,
            max_slippage: update.max_slippage,
            gas_limit: update.gas_limit,
            gas_price_strategy: update.gas_price_strategy,
            auto_trading_enabled: update.auto_trading_enabled,
            max_trade_amount: update.max_trade_amount,
            refresh_interval_secs: update.refresh_interval_secs,
            updated_at: Utc::now(),
        };
        Ok(settings.clone())
    }

    async fn notifier_settings(&self) -> BotResult<NotifierSettings> {
        Ok(self.notifier_settings.read().await.clone())
    }

    async fn put_notifier_settings(
        &self,
        update: NotifierSettingsUpdate,
    ) -> BotResult<NotifierSettings> {
        let mut settings = self.notifier_settings.write().await;
        *settings = NotifierSettings {
            id: settings.id.clone(),
            bot_token: update.bot_token,
            chat_id: update.chat_id,
            enabled: update.enabled,
            notify_trade_success: update.notify_trade_success,
            notify_trade_failed: update.notify_trade_failed,
            notify_high_profit: update.notify_high_profit,
            notify_errors: update.notify_errors,
            min_profit_alert: update.min_profit_alert,
            updated_at: Utc::now(),
        };
        Ok(settings.clone())
    }

    async fn bot_status(&self) -> BotResult<BotStatus> {
        Ok(self.bot_status.read().await.clone())
    }

    async fn put_bot_status(&self, update: BotStatusUpdate) -> BotResult<BotStatus> {
        let mut status = self.bot_status.write().await;
        *status = BotStatus {
            id: "singleton".to_string(),
            is_active: update.is_active,
            uptime_secs: update.uptime_secs,
            total_cycles: update.total_cycles,
            last_update: Utc::now(),
        };
        Ok(status.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TradeKind;
    use rust_decimal_macros::dec;

    fn opportunity(pct: Decimal) -> NewOpportunity {
        NewOpportunity {
            price_a: dec!(0.7412),
            price_b: dec!(0.7398),
            profit_percentage: pct,
            profitable: pct >= dec!(1.0),
        }
    }

    fn success_tx(net: Decimal) -> NewTransaction {
        NewTransaction {
            kind: TradeKind::Arbitrage,
            amount: dec!(400),
            gross_profit: Some(net + dec!(0.37)),
            gas_fee: Some(dec!(0.37)),
            net_profit: Some(net),
            status: TradeStatus::Success,
            reason: None,
            external_reference: Some("0xabc".to_string()),
        }
    }

    #[tokio::test]
    async fn latest_opportunity_is_most_recent_append() {
        let store = MemStore::new();
        for i in 1..=5 {
            store
                .create_opportunity(opportunity(Decimal::from(i)))
                .await
                .unwrap();
        }
        let latest = store.latest_opportunity().await.unwrap().unwrap();
        assert_eq!(latest.profit_percentage, dec!(5));
    }

    #[tokio::test]
    async fn latest_opportunity_breaks_timestamp_ties_by_insertion_order() {
        let store = MemStore::new();
        // Appends within the same tick can share a timestamp at clock
        // granularity; the later insert must win.
        store.create_opportunity(opportunity(dec!(1))).await.unwrap();
        store.create_opportunity(opportunity(dec!(2))).await.unwrap();
        let latest = store.latest_opportunity().await.unwrap().unwrap();
        assert_eq!(latest.profit_percentage, dec!(2));
    }

    #[tokio::test]
    async fn empty_store_has_no_latest_opportunity() {
        let store = MemStore::new();
        assert!(store.latest_opportunity().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn transactions_paginate_newest_first() {
        let store = MemStore::new();
        for i in 1..=7 {
            store.create_transaction(success_tx(Decimal::from(i))).await.unwrap();
        }

        let first_page = store.list_transactions(3, 0).await.unwrap();
        let profits: Vec<Decimal> = first_page.iter().filter_map(|tx| tx.net_profit).collect();
        assert_eq!(profits, vec![dec!(7), dec!(6), dec!(5)]);

        let second_page = store.list_transactions(3, 3).await.unwrap();
        let profits: Vec<Decimal> = second_page.iter().filter_map(|tx| tx.net_profit).collect();
        assert_eq!(profits, vec![dec!(4), dec!(3), dec!(2)]);

        assert_eq!(store.count_transactions().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn daily_stats_aggregate_todays_successes() {
        let store = MemStore::new();
        store.create_transaction(success_tx(dec!(3.00))).await.unwrap();
        store.create_transaction(success_tx(dec!(1.00))).await.unwrap();
        store
            .create_transaction(NewTransaction {
                kind: TradeKind::Skip,
                amount: dec!(400),
                gross_profit: None,
                gas_fee: None,
                net_profit: None,
                status: TradeStatus::Skipped,
                reason: Some("Profit 0.25% below threshold 1.0%".to_string()),
                external_reference: None,
            })
            .await
            .unwrap();

        let stats = store.daily_stats().await.unwrap();
        assert_eq!(stats.total_profit, "4.00");
        assert_eq!(stats.successful_trades, 2);
        assert_eq!(stats.avg_profit, "2.00");
        assert_eq!(stats.gas_spent, "0.74");
        assert_eq!(stats.win_rate, "66.7");
    }

    #[tokio::test]
    async fn daily_stats_on_empty_ledger_are_zero() {
        let store = MemStore::new();
        let stats = store.daily_stats().await.unwrap();
        assert_eq!(stats.total_profit, "0.00");
        assert_eq!(stats.successful_trades, 0);
        assert_eq!(stats.win_rate, "0.0");
    }

    #[tokio::test]
    async fn settings_replace_keeps_id_and_stamps_updated_at() {
        let store = MemStore::new();
        let before = store.bot_settings().await.unwrap();

        let replaced = store
            .put_bot_settings(BotSettingsUpdate {
                min_profit_threshold: dec!(2.5),
                refresh_interval_secs: 10,
                ..BotSettingsUpdate::default()
            })
            .await
            .unwrap();

        assert_eq!(replaced.id, before.id);
        assert_eq!(replaced.min_profit_threshold, dec!(2.5));
        assert_eq!(replaced.refresh_interval_secs, 10);
        assert!(replaced.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn status_updates_replace_counters() {
        let store = MemStore::new();
        let status = store.bot_status().await.unwrap();
        assert!(status.is_active);
        assert_eq!(status.total_cycles, 0);

        let updated = store
            .put_bot_status(BotStatusUpdate {
                is_active: false,
                uptime_secs: status.uptime_secs,
                total_cycles: status.total_cycles + 1,
            })
            .await
            .unwrap();
        assert!(!updated.is_active);
        assert_eq!(updated.total_cycles, 1);
        assert_eq!(updated.id, "singleton");
    }
}
