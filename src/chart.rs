//! src/chart.rs
//!
//! Top-level `chart` module: configuration, sample windows, statistics and
//! the `LiveChart` state owner.

pub mod config;
pub mod series;
pub mod state;
pub mod stats;

/// Re-exports
pub use config::ChartConfig;
pub use state::LiveChart;
