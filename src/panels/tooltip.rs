//! src/panels/tooltip.rs
//!
//! Hover tooltip: sample index and each series' value, drawn over the chart.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::chart::state::Tooltip;

pub struct TooltipPanel<'a> {
    pub tooltip: &'a Tooltip,
}

impl<'a> TooltipPanel<'a> {
    pub fn new(tooltip: &'a Tooltip) -> Self {
        Self { tooltip }
    }

    /// Cells needed including the border.
    pub fn size(&self) -> (u16, u16) {
        let lines = self.tooltip.lines();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;
        let height = lines.len() + 2;
        (
            u16::try_from(width).unwrap_or(u16::MAX),
            u16::try_from(height).unwrap_or(u16::MAX),
        )
    }
}

impl crate::ui::Panel for TooltipPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines = self.tooltip.lines().into_iter();
        let mut text: Vec<Line> = Vec::new();
        if let Some(head) = lines.next() {
            text.push(Line::from(Span::styled(
                head,
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        for (line, (_, color, _)) in lines.zip(&self.tooltip.entries) {
            text.push(Line::from(Span::styled(
                line,
                Style::default().fg((*color).into()),
            )));
        }

        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }
}
