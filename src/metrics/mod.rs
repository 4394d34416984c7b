//! System metrics collection and data structures.
//!
//! This module provides the sampling half of the monitor: CPU usage per core,
//! memory and swap utilization, and disk usage for the two mount points the
//! readout displays.

pub mod collector;
pub mod data;
pub mod traits;

// Re-export commonly used items
pub use collector::SystemCollector;
pub use data::MetricsSnapshot;
pub use traits::MetricsProvider;
