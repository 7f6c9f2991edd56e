//! Telegram notification delivery and bot commands

pub mod commands;
pub mod telegram;

pub use commands::*;
pub use telegram::*;
