//! # URL Parser Visualizer
//!
//! Breaks the submitted URL into its components and walks through them one
//! at a time. The highlighted segment in the URL line tracks the cursor, and
//! a note panel explains the selected part.
//!
//! Parsing here is deliberately naive string splitting: the point is to
//! show the anatomy of a URL, not to be an RFC 3986 parser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, Paragraph, Wrap};

use crate::core::sequencer::StepCursor;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct UrlPart {
    pub name: &'static str,
    pub value: String,
    pub note: &'static str,
}

/// Split a URL into its display parts. Absent components (no query, no
/// fragment) are simply omitted, so the cursor only visits what is there.
pub fn parse_url(url: &str) -> Vec<UrlPart> {
    let mut parts = Vec::new();
    let mut rest = url;

    if let Some(idx) = rest.find("://") {
        parts.push(UrlPart {
            name: "Protocol",
            value: rest[..idx + 3].to_string(),
            note: "How to talk to the server. https means the whole \
                   conversation is encrypted with TLS.",
        });
        rest = &rest[idx + 3..];
    }

    let fragment = rest.find('#').map(|idx| {
        let f = rest[idx..].to_string();
        rest = &rest[..idx];
        f
    });
    let query = rest.find('?').map(|idx| {
        let q = rest[idx..].to_string();
        rest = &rest[..idx];
        q
    });
    let path = rest.find('/').map(|idx| {
        let p = rest[idx..].to_string();
        rest = &rest[..idx];
        p
    });

    let (host, port) = match rest.rsplit_once(':') {
        Some((h, p))
            if !h.contains(':') && !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()) =>
        {
            (h.to_string(), Some(format!(":{p}")))
        }
        _ => (rest.to_string(), None),
    };

    if !host.is_empty() {
        parts.push(UrlPart {
            name: "Domain",
            value: host,
            note: "The human-readable server name. DNS will turn this into \
                   an IP address in the next stage.",
        });
    }
    if let Some(port) = port {
        parts.push(UrlPart {
            name: "Port",
            value: port,
            note: "Which door on the server to knock on. Omitted when it is \
                   the default (443 for https, 80 for http).",
        });
    }
    if let Some(path) = path {
        parts.push(UrlPart {
            name: "Path",
            value: path,
            note: "Which resource on that server you want, like a file path.",
        });
    }
    if let Some(query) = query {
        parts.push(UrlPart {
            name: "Query",
            value: query,
            note: "Extra key=value parameters for the server, separated by &.",
        });
    }
    if let Some(fragment) = fragment {
        parts.push(UrlPart {
            name: "Fragment",
            value: fragment,
            note: "A position within the page. Never sent to the server — \
                   the browser handles it alone.",
        });
    }
    parts
}

pub struct UrlParserState {
    url: String,
    parts: Vec<UrlPart>,
    cursor: StepCursor,
}

impl UrlParserState {
    pub fn new(url: &str) -> Self {
        let parts = parse_url(url);
        Self {
            url: url.to_string(),
            cursor: StepCursor::new(parts.len()),
            parts,
        }
    }

    /// Re-parse when the submitted URL changes; resets the cursor.
    pub fn set_url(&mut self, url: &str) {
        if url != self.url {
            self.url = url.to_string();
            self.parts = parse_url(url);
            self.cursor = StepCursor::new(self.parts.len());
        }
    }

    pub fn cursor(&self) -> &StepCursor {
        &self.cursor
    }

    /// Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::CursorDown => self.cursor.advance(),
            TuiEvent::CursorUp => self.cursor.retreat(),
            _ => false,
        }
    }
}

impl Component for UrlParserState {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" URL Anatomy ")
            .title_bottom(
                Line::from(" ↑/↓ select part ").style(Style::default().fg(Color::DarkGray)),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [url_area, list_area, note_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .areas(inner);

        // The URL itself, current part highlighted in place.
        let spans: Vec<Span> = self
            .parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let style = if i == self.cursor.step() {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Span::styled(part.value.clone(), style)
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)), url_area);

        let items: Vec<ListItem> = self
            .parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let selected = i == self.cursor.step();
                let marker = if selected { "▶ " } else { "  " };
                let name_style = if selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(format!("{:<10}", part.name), name_style),
                    Span::styled(part.value.clone(), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items), list_area);

        if let Some(part) = self.parts.get(self.cursor.step()) {
            let note = Paragraph::new(part.note)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)));
            frame.render_widget(note, note_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url_splits_into_all_parts() {
        let parts = parse_url("https://example.com:8443/search?q=rust#top");
        let names: Vec<&str> = parts.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["Protocol", "Domain", "Port", "Path", "Query", "Fragment"]
        );
        assert_eq!(parts[0].value, "https://");
        assert_eq!(parts[1].value, "example.com");
        assert_eq!(parts[2].value, ":8443");
        assert_eq!(parts[3].value, "/search");
        assert_eq!(parts[4].value, "?q=rust");
        assert_eq!(parts[5].value, "#top");
    }

    #[test]
    fn parts_reassemble_to_the_original_url() {
        let url = "https://example.com:8443/search?q=rust#top";
        let joined: String = parse_url(url).iter().map(|p| p.value.as_str()).collect();
        assert_eq!(joined, url);
    }

    #[test]
    fn bare_domain_yields_protocol_and_domain_only() {
        let parts = parse_url("https://google.com");
        let names: Vec<&str> = parts.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Protocol", "Domain"]);
    }

    #[test]
    fn ipv6_host_is_not_mistaken_for_a_port() {
        let parts = parse_url("https://::1/index");
        assert!(parts.iter().any(|p| p.name == "Domain" && p.value == "::1"));
        assert!(parts.iter().any(|p| p.name == "Path" && p.value == "/index"));
        assert!(!parts.iter().any(|p| p.name == "Port"));
    }

    #[test]
    fn cursor_walks_the_parts() {
        let mut state = UrlParserState::new("https://example.com/a?b=c");
        assert_eq!(state.cursor.total(), 4);
        assert!(state.handle_event(&TuiEvent::CursorDown));
        assert!(state.handle_event(&TuiEvent::CursorDown));
        assert_eq!(state.cursor.step(), 2);
        assert!(!state.handle_event(&TuiEvent::Tab), "unrelated events pass through");
    }

    #[test]
    fn set_url_resets_cursor_only_on_change() {
        let mut state = UrlParserState::new("https://a.com");
        state.handle_event(&TuiEvent::CursorDown);
        state.set_url("https://a.com");
        assert_eq!(state.cursor.step(), 1, "same url keeps position");
        state.set_url("https://b.com/path");
        assert_eq!(state.cursor.step(), 0);
        assert_eq!(state.cursor.total(), 3);
    }
}
