//! src/chart/state.rs
//!
//! The single owner of chart state: series windows, configuration, pooled
//! statistics and hover position. Controls mutate it in place; the renderer
//! only reads it.

use std::path::PathBuf;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::ChartConfig;
use super::series::{Series, generate};
use super::stats::Stats;
use crate::control::Control;
use crate::render::geometry::{PlotArea, Point};
use crate::render::scene::Rgba;

/// Series created at start: name and color.
pub const DEFAULT_SERIES: [(&str, Rgba); 3] = [
    ("Series 1", Rgba::rgb(0xff, 0x00, 0x00)),
    ("Series 2", Rgba::rgb(0x00, 0xff, 0x00)),
    ("Series 3", Rgba::rgb(0x00, 0x00, 0xff)),
];

/// Follow-up work a control asks of the event loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// The interval changed; cancel and restart the timer.
    RestartTimer(Duration),
    /// Write the current scene to this PNG file.
    Export(PathBuf),
}

/// Pointer position over the plot and the sample index beneath it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hover {
    pub index: usize,
    pub pointer: Point,
}

/// Values shown by the hover tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub index: usize,
    pub pointer: Point,
    pub entries: Vec<(String, Rgba, f64)>,
}

impl Tooltip {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        lines.push(format!("Index: {}", self.index));
        for (name, _, value) in &self.entries {
            lines.push(format!("{}: {:.2}", name, value));
        }
        lines
    }
}

pub struct LiveChart {
    pub config: ChartConfig,
    pub series: Vec<Series>,
    /// Last computed statistics; kept when the pool is empty.
    pub stats: Option<Stats>,
    pub hover: Option<Hover>,
    /// Export target used when a control does not name one.
    pub export_path: PathBuf,
    /// Ticks applied since start.
    pub ticks: u64,
    rng: StdRng,
}

impl LiveChart {
    /// Create the default series with randomly filled windows.
    pub fn new(config: ChartConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_rng(config: ChartConfig, mut rng: StdRng) -> Self {
        let range = config.value_range();
        let series = DEFAULT_SERIES
            .iter()
            .map(|&(name, color)| Series::new(name, color, config.capacity, range, &mut rng))
            .collect();
        Self::with_series(config, series, rng)
    }

    /// Build around pre-made series; capacity comes from `config`.
    pub fn with_series(config: ChartConfig, series: Vec<Series>, rng: StdRng) -> Self {
        let mut chart = Self {
            config,
            series,
            stats: None,
            hover: None,
            export_path: PathBuf::from("chart.png"),
            ticks: 0,
            rng,
        };
        chart.update_stats();
        chart
    }

    /// Chart whose initial and future samples are reproducible from `seed`.
    pub fn seeded(config: ChartConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn plot_area(&self) -> PlotArea {
        PlotArea::from_config(&self.config)
    }

    /// Timer firing: shift every window by one fresh sample unless paused.
    ///
    /// Returns whether data changed.
    pub fn tick(&mut self) -> bool {
        if !self.config.playing {
            return false;
        }
        let (lo, hi) = self.config.value_range();
        for s in &mut self.series {
            let v = generate(&mut self.rng, lo, hi);
            s.push(v);
        }
        self.ticks += 1;
        self.update_stats();
        tracing::trace!(tick = self.ticks, "series advanced");
        true
    }

    /// Regenerate every window within the current value range.
    pub fn reset(&mut self) {
        let range = self.config.value_range();
        for s in &mut self.series {
            s.refill(range, &mut self.rng);
        }
        self.update_stats();
        tracing::info!(min = range.0, max = range.1, "series reset");
    }

    /// Recompute pooled statistics; an empty pool keeps the previous values.
    pub fn update_stats(&mut self) {
        let pooled = self.series.iter().flat_map(|s| s.samples().iter().copied());
        if let Some(stats) = Stats::compute(pooled) {
            self.stats = Some(stats);
        }
    }

    /// Apply one control event.
    pub fn apply(&mut self, control: Control) -> Option<Action> {
        tracing::debug!(?control, "applying control");
        match control {
            Control::TogglePlay => self.config.playing = !self.config.playing,
            Control::Play => self.config.playing = true,
            Control::Pause => self.config.playing = false,
            Control::Reset => self.reset(),
            Control::Export(path) => {
                return Some(Action::Export(path.unwrap_or_else(|| self.export_path.clone())));
            }
            Control::SetInterval(ms) => {
                let interval = self.config.set_interval_ms(ms);
                return Some(Action::RestartTimer(interval));
            }
            Control::AdjustInterval(delta) => {
                let current = i64::try_from(self.config.interval.as_millis()).unwrap_or(i64::MAX);
                let ms = current.saturating_add(delta).max(0) as u64;
                let interval = self.config.set_interval_ms(ms);
                return Some(Action::RestartTimer(interval));
            }
            Control::SetMin(v) => {
                self.config.set_min(v);
            }
            Control::SetMax(v) => {
                self.config.set_max(v);
            }
            Control::AdjustMin(delta) => {
                self.config.set_min(self.config.min + delta);
            }
            Control::AdjustMax(delta) => {
                self.config.set_max(self.config.max + delta);
            }
            Control::SetChartType(t) => self.config.chart_type = t,
            Control::NextChartType => self.config.chart_type = self.config.chart_type.next(),
            Control::SetTheme(t) => self.config.theme = t,
            Control::NextTheme => self.config.theme = self.config.theme.next(),
            Control::SetGrid(on) => self.config.show_grid = on,
            Control::ToggleGrid => self.config.show_grid = !self.config.show_grid,
            Control::SetSmoothing(on) => self.config.smoothing = on,
            Control::ToggleSmoothing => self.config.smoothing = !self.config.smoothing,
        }
        None
    }

    /// Track the pointer; `None` (pointer left) or a point off the plot hides the tooltip.
    pub fn hover(&mut self, pointer: Option<Point>) {
        let area = self.plot_area();
        self.hover = pointer.and_then(|p| {
            area.index_at(p, self.config.capacity)
                .map(|index| Hover { index, pointer: p })
        });
    }

    /// Tooltip for the hovered index, read from the current windows.
    pub fn tooltip(&self) -> Option<Tooltip> {
        let hover = self.hover?;
        let entries = self
            .series
            .iter()
            .filter_map(|s| s.get(hover.index).map(|v| (s.name.clone(), s.color, v)))
            .collect();
        Some(Tooltip {
            index: hover.index,
            pointer: hover.pointer,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::config::{ChartType, Theme};

    fn chart() -> LiveChart {
        LiveChart::seeded(ChartConfig::default(), 11)
    }

    #[test]
    fn starts_with_full_windows_in_range() {
        let c = chart();
        assert_eq!(c.series.len(), 3);
        for s in &c.series {
            assert_eq!(s.len(), 50);
            assert!(s.samples().iter().all(|v| (-50.0..=50.0).contains(v)));
        }
        assert!(c.stats.is_some());
    }

    #[test]
    fn ticks_keep_window_length() {
        let mut c = chart();
        for _ in 0..200 {
            assert!(c.tick());
        }
        assert_eq!(c.ticks, 200);
        assert!(c.series.iter().all(|s| s.len() == 50));
    }

    #[test]
    fn tick_shifts_window_by_one() {
        let mut c = chart();
        let before: Vec<f64> = c.series[0].samples().iter().copied().collect();
        c.tick();
        let after: Vec<f64> = c.series[0].samples().iter().copied().collect();
        assert_eq!(&after[..49], &before[1..]);
    }

    #[test]
    fn paused_tick_is_skipped() {
        let mut c = chart();
        c.apply(Control::Pause);
        let before: Vec<f64> = c.series[1].samples().iter().copied().collect();
        assert!(!c.tick());
        assert_eq!(c.ticks, 0);
        assert_eq!(c.series[1].samples().iter().copied().collect::<Vec<_>>(), before);
        c.apply(Control::TogglePlay);
        assert!(c.tick());
    }

    #[test]
    fn stats_follow_pooled_order() {
        let cfg = ChartConfig {
            capacity: 3,
            ..ChartConfig::default()
        };
        let series = vec![
            Series::from_samples("a", Rgba::BLACK, 3, &[1.0, 2.0, 3.0]),
            Series::from_samples("b", Rgba::WHITE, 3, &[9.0, -4.0, 7.0]),
        ];
        let c = LiveChart::with_series(cfg, series, StdRng::seed_from_u64(0));
        let stats = c.stats.unwrap();
        assert_eq!(stats.current, 7.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.min, -4.0);
        assert!((stats.average - 18.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn empty_pool_keeps_previous_stats() {
        let mut c = chart();
        let before = c.stats;
        c.series.clear();
        c.update_stats();
        assert_eq!(c.stats, before);
    }

    #[test]
    fn interval_change_restarts_timer() {
        let mut c = chart();
        assert_eq!(
            c.apply(Control::SetInterval(10)),
            Some(Action::RestartTimer(Duration::from_millis(50)))
        );
        assert_eq!(
            c.apply(Control::AdjustInterval(150)),
            Some(Action::RestartTimer(Duration::from_millis(200)))
        );
        assert_eq!(
            c.apply(Control::AdjustInterval(-1_000)),
            Some(Action::RestartTimer(Duration::from_millis(50)))
        );
    }

    #[test]
    fn export_defaults_to_configured_path() {
        let mut c = chart();
        c.export_path = PathBuf::from("out.png");
        assert_eq!(
            c.apply(Control::Export(None)),
            Some(Action::Export(PathBuf::from("out.png")))
        );
        assert_eq!(
            c.apply(Control::Export(Some(PathBuf::from("x.png")))),
            Some(Action::Export(PathBuf::from("x.png")))
        );
    }

    #[test]
    fn range_controls_keep_order() {
        let mut c = chart();
        c.apply(Control::AdjustMin(200.0));
        assert_eq!(c.config.min, 49.0);
        c.apply(Control::SetMax(0.0));
        assert_eq!(c.config.max, 50.0);
        c.apply(Control::AdjustMax(10.0));
        assert_eq!(c.config.max, 60.0);
    }

    #[test]
    fn reset_uses_current_range() {
        let mut c = chart();
        c.apply(Control::SetMax(500.0));
        c.apply(Control::SetMin(400.0));
        c.apply(Control::Reset);
        for s in &c.series {
            assert!(s.samples().iter().all(|v| (400.0..=500.0).contains(v)));
        }
        let stats = c.stats.unwrap();
        assert!(stats.min >= 400.0);
    }

    #[test]
    fn presentation_controls_do_not_touch_data() {
        let mut c = chart();
        let before: Vec<Vec<f64>> = c
            .series
            .iter()
            .map(|s| s.samples().iter().copied().collect())
            .collect();
        for control in [
            Control::SetChartType(ChartType::Bar),
            Control::NextChartType,
            Control::SetTheme(Theme::Dark),
            Control::NextTheme,
            Control::ToggleGrid,
            Control::SetSmoothing(true),
        ] {
            assert_eq!(c.apply(control), None);
        }
        assert_eq!(c.config.chart_type, ChartType::Area);
        assert_eq!(c.config.theme, Theme::HighContrast);
        assert!(!c.config.show_grid);
        assert!(c.config.smoothing);
        let after: Vec<Vec<f64>> = c
            .series
            .iter()
            .map(|s| s.samples().iter().copied().collect())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn hover_inside_plot_shows_values() {
        let mut c = chart();
        let area = c.plot_area();
        let step = area.width / 49.0;
        let p = Point::new(area.left + step * 7.2, area.top + 5.0);
        c.hover(Some(p));
        let tip = c.tooltip().unwrap();
        assert_eq!(tip.index, 7);
        assert_eq!(tip.entries.len(), 3);
        assert_eq!(tip.entries[0].2, c.series[0].get(7).unwrap());
        let lines = tip.lines();
        assert_eq!(lines[0], "Index: 7");
        assert!(lines[1].starts_with("Series 1: "));
    }

    #[test]
    fn hover_outside_or_leave_hides() {
        let mut c = chart();
        let area = c.plot_area();
        c.hover(Some(Point::new(area.left + 1.0, area.top + 1.0)));
        assert!(c.tooltip().is_some());
        c.hover(Some(Point::new(5.0, 5.0)));
        assert!(c.tooltip().is_none());
        c.hover(Some(Point::new(area.left + 1.0, area.top + 1.0)));
        c.hover(None);
        assert!(c.tooltip().is_none());
    }
}
