//! # TitleBar Component
//!
//! Top status line: current stage, position within the tour, and a
//! transient status message. Purely presentational — all three props come
//! from the container.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// e.g. "DNS Resolution"
    pub stage_title: String,
    /// e.g. "stage 3/8 · line 2/7"
    pub position: String,
    /// Transient status (e.g. "Connection established!")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(stage_title: String, position: String, status_message: String) -> Self {
        Self {
            stage_title,
            position,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                " wirewalk ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                self.stage_title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", self.position),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!("  | {}", self.status_message),
                Style::default().fg(Color::Gray),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
