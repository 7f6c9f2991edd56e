//! Custom error types for the bot

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Invalid price input: priceA={price_a}, priceB={price_b} - prices must be positive")]
    InvalidPriceInput {
        price_a: Decimal,
        price_b: Decimal,
    },

    #[error("Invalid monitoring interval: {seconds}s - must be a positive number of seconds")]
    InvalidInterval {
        seconds: u32,
    },

    #[error("Ledger store unavailable: {context}")]
    StoreUnavailable {
        context: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("No arbitrage opportunity found")]
    NoOpportunity,
}

pub type BotResult<T> = Result<T, BotError>;
