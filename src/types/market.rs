//! Market price types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The most recent simulated quote from each venue. A single "current"
/// instance is overwritten on every tick; history is not kept here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePair {
    pub price_a: Decimal,
    pub price_b: Decimal,
    pub observed_at: DateTime<Utc>,
}

/// Named price scenarios used to drive the simulation into a known state
/// for demos and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceScenario {
    HighProfit,
    LowProfit,
    NoProfit,
}

impl PriceScenario {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "high_profit" => Some(Self::HighProfit),
            "low_profit" => Some(Self::LowProfit),
            "no_profit" => Some(Self::NoProfit),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::HighProfit => "high_profit",
            Self::LowProfit => "low_profit",
            Self::NoProfit => "no_profit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_names_round_trip() {
        for scenario in [
            PriceScenario::HighProfit,
            PriceScenario::LowProfit,
            PriceScenario::NoProfit,
        ] {
            assert_eq!(PriceScenario::from_name(scenario.name()), Some(scenario));
        }
        assert_eq!(PriceScenario::from_name("moon"), None);
    }
}
