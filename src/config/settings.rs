//! Bot configuration settings and environment variable handling

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::env;

use crate::types::PriceScenario;

// Evaluator constants. The profitability threshold here is intentionally a
// separate value from the configurable `BotSettings.min_profit_threshold`
// consulted at trade-execution time.
pub const VENUE_A_TRADING_FEE: Decimal = dec!(0.003); // 0.3%
pub const VENUE_B_TRADING_FEE: Decimal = dec!(0.003); // 0.3%
pub const NOTIONAL_TRADE_AMOUNT: Decimal = dec!(400);
pub const GAS_ESTIMATE: Decimal = dec!(0.37);
pub const MIN_NET_PROFIT_PCT: Decimal = dec!(1.0);

// Price simulation constants
pub const BASE_PRICE_A: Decimal = dec!(0.7412);
pub const BASE_PRICE_B: Decimal = dec!(0.7398);
pub const PRICE_JITTER_FRACTION: f64 = 0.005; // ±0.5% per venue per tick
pub const PRICE_SCALE: u32 = 4;

// Monitoring constants
pub const DEFAULT_REFRESH_INTERVAL_SECS: u32 = 5;

/// Fixed price pairs for the demo/testing scenarios. Held as configuration
/// data so a scenario can be re-tuned without touching the simulation loop.
pub fn scenario_prices(scenario: PriceScenario) -> (Decimal, Decimal) {
    match scenario {
        PriceScenario::HighProfit => (dec!(0.7450), dec!(0.7380)),
        PriceScenario::LowProfit => (dec!(0.7420), dec!(0.7410)),
        PriceScenario::NoProfit => (dec!(0.7412), dec!(0.7412)),
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub pair_label: String,
    pub venue_a_name: String,
    pub venue_b_name: String,
    pub telegram_api_base: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            pair_label: env::var("PAIR_LABEL")
                .unwrap_or_else(|_| "USDT/XSGD".to_string()),
            venue_a_name: env::var("VENUE_A_NAME")
                .unwrap_or_else(|_| "Uniswap".to_string()),
            venue_b_name: env::var("VENUE_B_NAME")
                .unwrap_or_else(|_| "SushiSwap".to_string()),
            telegram_api_base: env::var("TELEGRAM_API_BASE")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
        }
    }
}
