//! # AddressBar Component
//!
//! The browser-chrome address bar shown on the first stage. Owns its text
//! buffer and cursor; emits [`AddressEvent::Submit`] when Enter is pressed
//! with non-empty input — the one-time transition that starts the tour.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum AddressEvent {
    /// User pressed Enter with non-empty input. Carries the normalized URL.
    Submit(String),
    ContentChanged,
}

pub struct AddressBar {
    pub buffer: String,
    /// Whether keystrokes are currently routed here (controls cursor display).
    pub focused: bool,
    /// Byte offset of the edit cursor within `buffer`.
    cursor: usize,
}

impl AddressBar {
    pub fn new(initial: Option<String>) -> Self {
        let buffer = initial.unwrap_or_default();
        let cursor = buffer.len();
        Self {
            buffer,
            focused: true,
            cursor,
        }
    }

    /// The entered text with an implied scheme: bare hostnames get
    /// `https://` prepended, matching what the address bar of a modern
    /// browser would do.
    pub fn normalized_url(&self) -> String {
        let trimmed = self.buffer.trim();
        if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        }
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }
}

impl EventHandler for AddressBar {
    type Event = AddressEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<AddressEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(AddressEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.buffer.remove(prev);
                    self.cursor = prev;
                    Some(AddressEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    // Empty submit is ignored, not an error.
                    None
                } else {
                    Some(AddressEvent::Submit(self.normalized_url()))
                }
            }
            _ => None,
        }
    }
}

impl Component for AddressBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Address ");

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [lock_area, text_area] =
            Layout::horizontal([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

        // The padlock is decoration: no real TLS happens anywhere in here.
        frame.render_widget(
            Span::styled("🔒", Style::default().fg(Color::Green)),
            lock_area,
        );

        let content: Line = if self.buffer.is_empty() && !self.focused {
            Line::from(Span::styled(
                "Type a website (e.g., google.com)",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(self.buffer.clone())
        };
        frame.render_widget(Paragraph::new(content), text_area);

        if self.focused {
            let prefix_width = self.buffer[..self.cursor].width() as u16;
            let x = text_area.x + prefix_width.min(text_area.width.saturating_sub(1));
            frame.set_cursor_position((x, text_area.y));
        }
    }
}
