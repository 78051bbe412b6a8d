//! src/chart/config.rs
//!
//! Chart configuration: value range, chart type, theme, timing and surface layout.
//!
//! Centralized defaults plus the clamping applied to every control input, so
//! the renderer never sees an empty value range or a zero interval.

use std::time::Duration;

use clap::ValueEnum;

use crate::render::scene::Rgba;

/// Shortest accepted update interval.
pub const MIN_INTERVAL_MS: u64 = 50;
/// Longest accepted update interval.
pub const MAX_INTERVAL_MS: u64 = 5_000;
/// Absolute bound for the user-adjustable value range.
pub const VALUE_LIMIT: f64 = 1_000.0;
/// Sample window capacity bounds.
pub const MIN_CAPACITY: usize = 2;
pub const MAX_CAPACITY: usize = 1_000;

/// Visual encoding used for every series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChartType {
    Line,
    Bar,
    Area,
    Scatter,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [
        ChartType::Line,
        ChartType::Bar,
        ChartType::Area,
        ChartType::Scatter,
    ];

    /// Next chart type in display order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Area => "area",
            ChartType::Scatter => "scatter",
        }
    }
}

/// Color theme for grid, axes and labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    Light,
    Dark,
    HighContrast,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::HighContrast];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::HighContrast => "high-contrast",
        }
    }

    /// Color lookups used by the renderer. Themes never affect layout.
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Rgba::WHITE,
                grid: Rgba::rgb(0xdd, 0xdd, 0xdd),
                axis: Rgba::BLACK,
                text: Rgba::BLACK,
            },
            Theme::Dark => Palette {
                background: Rgba::rgb(0x1e, 0x1e, 0x1e),
                grid: Rgba::rgb(0x44, 0x44, 0x44),
                axis: Rgba::WHITE,
                text: Rgba::WHITE,
            },
            Theme::HighContrast => Palette {
                background: Rgba::BLACK,
                grid: Rgba::WHITE,
                axis: Rgba::WHITE,
                text: Rgba::WHITE,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub grid: Rgba,
    pub axis: Rgba,
    pub text: Rgba,
}

/// Distance between the surface edges and the plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 40.0,
            left: 60.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChartConfig {
    /// Samples kept per series (sliding window length).
    pub capacity: usize,

    /// Lower bound of the value range; always below `max`.
    pub min: f64,

    /// Upper bound of the value range; always above `min`.
    pub max: f64,

    pub chart_type: ChartType,
    pub smoothing: bool,
    pub show_grid: bool,
    pub theme: Theme,

    /// Time between data ticks.
    pub interval: Duration,

    /// When false, ticks are skipped but the timer keeps running.
    pub playing: bool,

    /// Logical drawing surface size in pixels.
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            min: -50.0,
            max: 50.0,
            chart_type: ChartType::Line,
            smoothing: false,
            show_grid: true,
            theme: Theme::Light,
            interval: Duration::from_millis(500),
            playing: true,
            width: 800.0,
            height: 400.0,
            margins: Margins::default(),
        }
    }
}

impl ChartConfig {
    /// Set the update interval, clamped to `[MIN_INTERVAL_MS, MAX_INTERVAL_MS]`.
    ///
    /// Returns the interval actually stored.
    pub fn set_interval_ms(&mut self, ms: u64) -> Duration {
        self.interval = Duration::from_millis(ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS));
        self.interval
    }

    /// Set the lower bound. A value at or above `max` is pulled one unit below it.
    pub fn set_min(&mut self, value: f64) -> f64 {
        let mut v = clamp_value(value, self.min);
        if v >= self.max {
            v = self.max - 1.0;
        }
        self.min = v;
        v
    }

    /// Set the upper bound. A value at or below `min` is pushed one unit above it.
    pub fn set_max(&mut self, value: f64) -> f64 {
        let mut v = clamp_value(value, self.max);
        if v <= self.min {
            v = self.min + 1.0;
        }
        self.max = v;
        v
    }

    pub fn value_range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Apply the same clamping control inputs get; used for command line values.
    pub fn sanitized(mut self) -> Self {
        self.capacity = self.capacity.clamp(MIN_CAPACITY, MAX_CAPACITY);
        let ms = u64::try_from(self.interval.as_millis()).unwrap_or(MAX_INTERVAL_MS);
        self.set_interval_ms(ms);

        let (lo, hi) = (self.min, self.max);
        // widen first so the ordered setters below accept both bounds
        self.min = -VALUE_LIMIT;
        self.max = VALUE_LIMIT;
        self.set_min(lo);
        self.set_max(hi);
        self
    }
}

/// NaN keeps the previous value; everything else is bounded by `VALUE_LIMIT`.
fn clamp_value(value: f64, previous: f64) -> f64 {
    if value.is_nan() {
        previous
    } else {
        value.clamp(-VALUE_LIMIT, VALUE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_is_clamped() {
        let mut cfg = ChartConfig::default();
        assert_eq!(cfg.set_interval_ms(0), Duration::from_millis(MIN_INTERVAL_MS));
        assert_eq!(
            cfg.set_interval_ms(60_000),
            Duration::from_millis(MAX_INTERVAL_MS)
        );
        assert_eq!(cfg.set_interval_ms(250), Duration::from_millis(250));
    }

    #[test]
    fn min_never_crosses_max() {
        let mut cfg = ChartConfig::default();
        assert_eq!(cfg.set_min(80.0), 49.0);
        assert!(cfg.min < cfg.max);
        assert_eq!(cfg.set_max(-200.0), 50.0);
        assert!(cfg.min < cfg.max);
    }

    #[test]
    fn values_are_bounded_and_nan_ignored() {
        let mut cfg = ChartConfig::default();
        assert_eq!(cfg.set_max(1e9), VALUE_LIMIT);
        assert_eq!(cfg.set_min(-1e9), -VALUE_LIMIT);
        assert_eq!(cfg.set_min(f64::NAN), -VALUE_LIMIT);
    }

    #[test]
    fn sanitized_fixes_inverted_range_and_capacity() {
        let cfg = ChartConfig {
            capacity: 0,
            min: 10.0,
            max: 10.0,
            interval: Duration::from_millis(1),
            ..ChartConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.capacity, MIN_CAPACITY);
        assert!(cfg.min < cfg.max);
        assert_eq!(cfg.interval, Duration::from_millis(MIN_INTERVAL_MS));
    }

    #[test]
    fn cycling_wraps() {
        assert_eq!(ChartType::Scatter.next(), ChartType::Line);
        assert_eq!(Theme::HighContrast.next(), Theme::Light);
        assert_eq!(Theme::HighContrast.label(), "high-contrast");
    }
}
