//! Arbitrage profit calculation and opportunity persistence

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{
    GAS_ESTIMATE, MIN_NET_PROFIT_PCT, NOTIONAL_TRADE_AMOUNT, VENUE_A_TRADING_FEE,
    VENUE_B_TRADING_FEE,
};
use crate::errors::{BotError, BotResult};
use crate::storage::LedgerStore;
use crate::types::{NewOpportunity, OpportunitySignal, ProfitBreakdown};

/// Computes the theoretical profit of one round trip between the two venues
/// at the fixed notional trade amount.
///
/// The spread between the quotes is taken relative to their average, fees are
/// both venues' trading fees plus a flat gas estimate, and the verdict
/// compares the net percentage against the fixed signal threshold.
pub fn calculate_profit(price_a: Decimal, price_b: Decimal) -> BotResult<ProfitBreakdown> {
    if price_a <= Decimal::ZERO || price_b <= Decimal::ZERO {
        return Err(BotError::InvalidPriceInput { price_a, price_b });
    }

    let diff = (price_a - price_b).abs();
    let avg = (price_a + price_b) / dec!(2);
    let gross_margin_pct = diff / avg * dec!(100);

    let fee_fraction = VENUE_A_TRADING_FEE + VENUE_B_TRADING_FEE;
    let gross_profit = gross_margin_pct / dec!(100) * NOTIONAL_TRADE_AMOUNT;
    let fees_cost = fee_fraction * NOTIONAL_TRADE_AMOUNT + GAS_ESTIMATE;

    let net_profit = gross_profit - fees_cost;
    let net_profit_pct = net_profit / NOTIONAL_TRADE_AMOUNT * dec!(100);

    Ok(ProfitBreakdown {
        gross_margin_pct,
        gross_profit,
        fees_cost,
        net_profit,
        net_profit_pct,
        profitable: net_profit_pct >= MIN_NET_PROFIT_PCT,
    })
}

/// Turns price pairs into persisted opportunity records and display signals.
pub struct OpportunityEvaluator {
    store: Arc<dyn LedgerStore>,
}

impl OpportunityEvaluator {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Evaluates one price pair and appends an [`OpportunityRecord`] to the
    /// ledger. A store failure is logged and the signal still returned; the
    /// latest-opportunity view is simply stale until the next append lands.
    ///
    /// [`OpportunityRecord`]: crate::types::OpportunityRecord
    pub async fn evaluate(
        &self,
        price_a: Decimal,
        price_b: Decimal,
    ) -> BotResult<OpportunitySignal> {
        let breakdown = calculate_profit(price_a, price_b)?;

        debug!(
            %price_a,
            %price_b,
            net_profit_pct = %breakdown.net_profit_pct,
            profitable = breakdown.profitable,
            "Evaluated price pair"
        );

        if let Err(e) = self
            .store
            .create_opportunity(NewOpportunity {
                price_a,
                price_b,
                profit_percentage: breakdown.net_profit_pct,
                profitable: breakdown.profitable,
            })
            .await
        {
            warn!("Failed to persist opportunity record: {e}");
        }

        Ok(OpportunitySignal {
            profit_percentage: format!("{:.2}", breakdown.net_profit_pct),
            profitable: breakdown.profitable,
            estimated_profit: format!("{:.2}", breakdown.gross_profit),
            estimated_gas: format!("{GAS_ESTIMATE:.2}"),
            net_profit: format!("{:.2}", breakdown.net_profit),
        })
    }
}
