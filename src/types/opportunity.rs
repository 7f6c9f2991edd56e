//! Arbitrage opportunity types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Persisted verdict for one evaluated price pair. Append-only: records are
/// never updated or deleted, and creation order matches `observed_at` order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityRecord {
    pub id: String,
    pub price_a: Decimal,
    pub price_b: Decimal,
    /// Net of fees, relative to the fixed notional trade amount.
    pub profit_percentage: Decimal,
    pub profitable: bool,
    pub observed_at: DateTime<Utc>,
}

/// Insert form of [`OpportunityRecord`]; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewOpportunity {
    pub price_a: Decimal,
    pub price_b: Decimal,
    pub profit_percentage: Decimal,
    pub profitable: bool,
}

/// Intermediate profit figures for one price pair, before display rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitBreakdown {
    pub gross_margin_pct: Decimal,
    pub gross_profit: Decimal,
    pub fees_cost: Decimal,
    pub net_profit: Decimal,
    pub net_profit_pct: Decimal,
    pub profitable: bool,
}

/// Display payload pushed to dashboard subscribers. All money/percentage
/// fields are fixed two-decimal strings, matching the wire format the UI
/// expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunitySignal {
    pub profit_percentage: String,
    pub profitable: bool,
    pub estimated_profit: String,
    pub estimated_gas: String,
    pub net_profit: String,
}
