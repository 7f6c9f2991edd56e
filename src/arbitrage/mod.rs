//! Arbitrage opportunity evaluation

pub mod calculator;

pub use calculator::*;
