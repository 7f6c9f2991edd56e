//! Core data types and structures

pub mod market;
pub mod opportunity;
pub mod settings;
pub mod transaction;
pub mod ws;

pub use market::*;
pub use opportunity::*;
pub use settings::*;
pub use transaction::*;
pub use ws::*;
