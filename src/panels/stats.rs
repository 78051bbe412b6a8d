//! src/panels/stats.rs
//!
//! Stats panel: pooled statistics, trend and a per-series legend.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::chart::LiveChart;
use crate::chart::stats::Trend;

pub struct StatsPanel<'a> {
    pub chart: &'a LiveChart,
}

impl<'a> StatsPanel<'a> {
    pub fn new(chart: &'a LiveChart) -> Self {
        Self { chart }
    }
}

fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Rising => Color::Green,
        Trend::Falling => Color::Red,
        Trend::Stable => Color::Yellow,
    }
}

impl crate::ui::Panel for StatsPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let label = Style::default().fg(Color::Yellow);
        let mut lines: Vec<Line> = match self.chart.stats {
            Some(s) => vec![
                Line::from(vec![
                    Span::styled("Current: ", label),
                    Span::styled(
                        format!("{:.2}", s.current),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Max: ", label),
                    Span::raw(format!("{:.2}  ", s.max)),
                    Span::styled("Min: ", label),
                    Span::raw(format!("{:.2}", s.min)),
                ]),
                Line::from(vec![
                    Span::styled("Avg: ", label),
                    Span::raw(format!("{:.2}  ", s.average)),
                    Span::styled("Trend: ", label),
                    Span::styled(
                        s.trend.label(),
                        Style::default()
                            .fg(trend_color(s.trend))
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
            ],
            None => vec![Line::from("no data")],
        };

        lines.push(Line::from(""));
        for s in &self.chart.series {
            let last = s.samples().back().copied().unwrap_or(f64::NAN);
            lines.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(s.color.into())),
                Span::raw(format!("{}  {:.2}", s.name, last)),
            ]));
        }

        let block = Block::default().title("Stats").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
