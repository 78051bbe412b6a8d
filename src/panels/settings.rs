//! src/panels/settings.rs
//!
//! Settings panel: current chart configuration and play state.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::chart::LiveChart;

/// Read-only view of the configuration; paused charts get a highlighted border.
pub struct SettingsPanel<'a> {
    pub chart: &'a LiveChart,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(chart: &'a LiveChart) -> Self {
        Self { chart }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

impl crate::ui::Panel for SettingsPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let cfg = &self.chart.config;
        let state = if cfg.playing { "Playing" } else { "Paused" };

        let lines = vec![
            Line::from(vec![
                Span::styled(state, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  ticks={}", self.chart.ticks)),
            ]),
            Line::from(format!(
                "type={}  theme={}",
                cfg.chart_type.label(),
                cfg.theme.label()
            )),
            Line::from(format!(
                "grid={}  smoothing={}",
                on_off(cfg.show_grid),
                on_off(cfg.smoothing)
            )),
            Line::from(format!(
                "interval={}ms  range=[{:.0},{:.0}]",
                cfg.interval.as_millis(),
                cfg.min,
                cfg.max
            )),
        ];

        let mut block = Block::default().title("Settings").borders(Borders::ALL);
        if !cfg.playing {
            block = block.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
