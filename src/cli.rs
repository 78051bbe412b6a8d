//! src/cli.rs
//!
//! Command line options and logging setup.
//!
//! Every chart option defaults to the `ChartConfig` defaults and is clamped
//! the same way control inputs are.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use crate::chart::ChartConfig;
use crate::chart::config::{ChartType, Theme};

#[derive(Parser, Debug)]
#[command(
    name = "livechart",
    version,
    about = "Live-updating multi-series chart in the terminal"
)]
pub struct Cli {
    /// Milliseconds between data ticks
    #[arg(long, default_value_t = 500)]
    pub interval: u64,

    /// Lower bound of the value range
    #[arg(long, default_value_t = -50.0, allow_negative_numbers = true)]
    pub min: f64,

    /// Upper bound of the value range
    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
    pub max: f64,

    /// Samples kept per series
    #[arg(long, default_value_t = 50)]
    pub capacity: usize,

    #[arg(long, value_enum, default_value_t = ChartType::Line)]
    pub chart_type: ChartType,

    #[arg(long, value_enum, default_value_t = Theme::Light)]
    pub theme: Theme,

    /// Hide the background grid
    #[arg(long)]
    pub no_grid: bool,

    /// Smooth line and area strokes
    #[arg(long)]
    pub smooth: bool,

    /// Start with data updates paused
    #[arg(long)]
    pub paused: bool,

    /// Default target of the export action
    #[arg(long, default_value = "chart.png")]
    pub export_path: PathBuf,

    /// Address of the remote control server
    #[arg(long, default_value = "127.0.0.1:4000")]
    pub remote: String,

    /// Do not start the remote control server
    #[arg(long)]
    pub no_remote: bool,

    /// Log file (the terminal is taken by the UI); filter with RUST_LOG
    #[arg(long, default_value = "livechart.log")]
    pub log_file: PathBuf,

    /// Seed the sample generator for reproducible data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render one frame to this PNG file and exit without starting the UI
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl Cli {
    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            capacity: self.capacity,
            min: self.min,
            max: self.max,
            chart_type: self.chart_type,
            smoothing: self.smooth,
            show_grid: !self.no_grid,
            theme: self.theme,
            interval: Duration::from_millis(self.interval),
            playing: !self.paused,
            ..ChartConfig::default()
        }
        .sanitized()
    }
}

/// Structured logging to `path`; RUST_LOG controls verbosity (default: info).
pub fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_chart_defaults() {
        let cli = Cli::try_parse_from(["livechart"]).unwrap();
        let cfg = cli.chart_config();
        let reference = ChartConfig::default();
        assert_eq!(cfg.capacity, reference.capacity);
        assert_eq!(cfg.value_range(), reference.value_range());
        assert_eq!(cfg.interval, reference.interval);
        assert_eq!(cfg.chart_type, ChartType::Line);
        assert_eq!(cfg.theme, Theme::Light);
        assert!(cfg.show_grid && cfg.playing && !cfg.smoothing);
        assert!(!cli.no_remote);
        assert_eq!(cli.snapshot, None);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn options_are_parsed_and_clamped() {
        let cli = Cli::try_parse_from([
            "livechart",
            "--interval",
            "5",
            "--min",
            "-20",
            "--max",
            "-30",
            "--chart-type",
            "scatter",
            "--theme",
            "high-contrast",
            "--no-grid",
            "--smooth",
            "--paused",
        ])
        .unwrap();
        let cfg = cli.chart_config();
        assert_eq!(cfg.interval, Duration::from_millis(50));
        assert_eq!(cfg.min, -20.0);
        assert_eq!(cfg.max, -19.0);
        assert_eq!(cfg.chart_type, ChartType::Scatter);
        assert_eq!(cfg.theme, Theme::HighContrast);
        assert!(!cfg.show_grid && cfg.smoothing && !cfg.playing);
    }

    #[test]
    fn rejects_unknown_chart_type() {
        assert!(Cli::try_parse_from(["livechart", "--chart-type", "pie"]).is_err());
    }
}
