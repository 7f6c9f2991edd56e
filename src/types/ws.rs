//! Real-time channel message types

use serde::Serialize;

use super::{OpportunitySignal, PricePair};

/// Server→client payload for the dashboard WebSocket. Each tick produces a
/// `PriceUpdate` immediately followed by an `ArbitrageOpportunity`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum WsMessage {
    PriceUpdate(PricePair),
    ArbitrageOpportunity(OpportunitySignal),
}
