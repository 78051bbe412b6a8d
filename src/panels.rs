//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod chart;
pub mod paragraph;
pub mod settings;
pub mod stats;
pub mod title;
pub mod tooltip;

pub use chart::ChartPanel;
pub use paragraph::ParagraphPanel;
pub use settings::SettingsPanel;
pub use stats::StatsPanel;
pub use title::TitlePanel;
pub use tooltip::TooltipPanel;
