//! Simulated trade execution

pub mod engine;

pub use engine::*;
