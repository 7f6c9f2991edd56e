//! Ledger persistence behind a swappable store interface

pub mod memory;

pub use memory::*;

use async_trait::async_trait;

use crate::errors::BotResult;
use crate::types::{
    BotSettings, BotSettingsUpdate, BotStatus, BotStatusUpdate, DailyStats, NewOpportunity,
    NewTransaction, NotifierSettings, NotifierSettingsUpdate, OpportunityRecord, TransactionRecord,
};

/// Append-friendly ledger of opportunities and trades plus the settings and
/// status singletons. The in-memory [`MemStore`] is the reference
/// implementation; a persistent backend can be slotted in behind this trait
/// without touching the core.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Appends an opportunity record, assigning id and timestamp.
    async fn create_opportunity(&self, new: NewOpportunity) -> BotResult<OpportunityRecord>;

    /// Returns the record with the greatest `observed_at`, ties broken by
    /// insertion order.
    async fn latest_opportunity(&self) -> BotResult<Option<OpportunityRecord>>;

    /// Newest-first opportunity history.
    async fn list_opportunities(&self, limit: usize) -> BotResult<Vec<OpportunityRecord>>;

    /// Appends a transaction record, assigning id and timestamp.
    async fn create_transaction(&self, new: NewTransaction) -> BotResult<TransactionRecord>;

    /// Newest-first page of the transaction ledger.
    async fn list_transactions(
        &self,
        limit: usize,
        offset: usize,
    ) -> BotResult<Vec<TransactionRecord>>;

    async fn count_transactions(&self) -> BotResult<u64>;

    /// Aggregates over transactions recorded today (UTC).
    async fn daily_stats(&self) -> BotResult<DailyStats>;

    async fn bot_settings(&self) -> BotResult<BotSettings>;

    /// Full replace; the stored id survives and `updated_at` is stamped.
    async fn put_bot_settings(&self, update: BotSettingsUpdate) -> BotResult<BotSettings>;

    async fn notifier_settings(&self) -> BotResult<NotifierSettings>;

    async fn put_notifier_settings(
        &self,
        update: NotifierSettingsUpdate,
    ) -> BotResult<NotifierSettings>;

    async fn bot_status(&self) -> BotResult<BotStatus>;

    async fn put_bot_status(&self, update: BotStatusUpdate) -> BotResult<BotStatus>;
}
