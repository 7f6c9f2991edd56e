//! Price simulation loop and real-time subscriber fan-out

pub mod price_monitor;
pub mod registry;

pub use price_monitor::*;
pub use registry::*;
