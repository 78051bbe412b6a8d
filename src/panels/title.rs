//! src/panels/title.rs
//!
//! Header panel: application title and play state.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct TitlePanel {
    pub title: String,
    pub playing: bool,
}

impl TitlePanel {
    pub fn new(title: &str, playing: bool) -> Self {
        Self {
            title: title.to_string(),
            playing,
        }
    }
}

impl crate::ui::Panel for TitlePanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let (state, color) = if self.playing {
            ("▶ Playing", Color::Green)
        } else {
            ("⏸ Paused", Color::Yellow)
        };
        let line = Line::from(vec![
            Span::styled(
                self.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(state, Style::default().fg(color)),
        ]);
        f.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }
}
