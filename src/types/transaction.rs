//! Trade transaction ledger types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    Arbitrage,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Success,
    Failed,
    Skipped,
}

/// One row of the trade ledger.
///
/// Invariants: `status == Success` implies `gross_profit`, `net_profit` and
/// `external_reference` are all present; `Failed`/`Skipped` implies `reason`
/// is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub kind: TradeKind,
    pub amount: Decimal,
    pub gross_profit: Option<Decimal>,
    pub gas_fee: Option<Decimal>,
    pub net_profit: Option<Decimal>,
    pub status: TradeStatus,
    pub reason: Option<String>,
    pub observed_at: DateTime<Utc>,
    /// Simulated transaction hash; only set on success.
    pub external_reference: Option<String>,
}

/// Insert form of [`TransactionRecord`]; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TradeKind,
    pub amount: Decimal,
    pub gross_profit: Option<Decimal>,
    pub gas_fee: Option<Decimal>,
    pub net_profit: Option<Decimal>,
    pub status: TradeStatus,
    pub reason: Option<String>,
    pub external_reference: Option<String>,
}

/// Aggregates over today's transactions, computed on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub total_profit: String,
    pub successful_trades: u64,
    pub avg_profit: String,
    pub gas_spent: String,
    pub win_rate: String,
}
