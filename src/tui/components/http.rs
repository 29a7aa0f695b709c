//! # HTTP Request Builder
//!
//! An interactive request composer: Tab cycles focus across method, path,
//! headers, body, and the send control; the focused field reacts to arrows,
//! typing, and Enter. Sending shows the raw request on the wire, then, after
//! a short simulated network delay driven by the main loop, a canned JSON
//! echo response. No real network I/O happens anywhere in here.

use std::time::{Duration, Instant};

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use serde_json::json;

use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

const METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "HEAD"];

/// Headers offered in the builder; Enter toggles each on or off.
const HEADERS: [(&str, &str); 4] = [
    ("Accept", "application/json"),
    ("User-Agent", "wirewalk/0.1"),
    ("Accept-Encoding", "gzip, br"),
    ("Cache-Control", "no-cache"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Method,
    Path,
    Headers,
    Body,
    Send,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Method,
        Focus::Path,
        Focus::Headers,
        Focus::Body,
        Focus::Send,
    ];

    fn next(&self) -> Focus {
        let idx = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(&self) -> Focus {
        let idx = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Exchange {
    /// Nothing sent yet.
    Draft,
    /// Request on the wire; response lands when the deadline passes.
    Sending { since: Instant },
    Done { response: String },
}

pub struct HttpState {
    host: String,
    method_idx: usize,
    path: String,
    enabled_headers: [bool; HEADERS.len()],
    header_idx: usize,
    body: String,
    focus: Focus,
    exchange: Exchange,
}

impl HttpState {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            method_idx: 0,
            path: "/".to_string(),
            enabled_headers: [true, true, false, false],
            header_idx: 0,
            body: String::new(),
            focus: Focus::Method,
            exchange: Exchange::Draft,
        }
    }

    pub fn set_host(&mut self, host: &str) {
        if host != self.host {
            self.host = host.to_string();
            self.exchange = Exchange::Draft;
        }
    }

    fn method(&self) -> &'static str {
        METHODS[self.method_idx]
    }

    fn has_body(&self) -> bool {
        matches!(self.method(), "POST" | "PUT")
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.exchange, Exchange::Sending { .. })
    }

    pub fn status(&self) -> Option<&str> {
        match self.exchange {
            Exchange::Sending { .. } => Some("Request in flight…"),
            Exchange::Done { .. } => Some("200 OK"),
            Exchange::Draft => None,
        }
    }

    /// Advance the simulated exchange. Called by the main loop every tick;
    /// returns true when the response just arrived and a redraw is needed.
    pub fn poll(&mut self, now: Instant, latency: Duration) -> bool {
        if let Exchange::Sending { since } = self.exchange {
            if now.duration_since(since) >= latency {
                self.exchange = Exchange::Done {
                    response: self.build_response(),
                };
                return true;
            }
        }
        false
    }

    /// The canned response: the server echoes the request back as JSON, the
    /// way httpbin does, so the user can see their own choices reflected.
    fn build_response(&self) -> String {
        let headers: serde_json::Map<String, serde_json::Value> = HEADERS
            .iter()
            .zip(self.enabled_headers)
            .filter(|(_, on)| *on)
            .map(|((name, value), _)| (name.to_string(), json!(value)))
            .collect();
        let echo = json!({
            "method": self.method(),
            "url": format!("https://{}{}", self.host, self.path),
            "headers": headers,
            "data": if self.has_body() { self.body.as_str() } else { "" },
        });
        let body = serde_json::to_string_pretty(&echo).unwrap_or_default();
        format!(
            "HTTP/1.1 200 OK\r\n\
             Date: {}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             \r\n\
             {}",
            Utc::now().to_rfc2822(),
            body.len(),
            body
        )
    }

    fn raw_request(&self) -> String {
        let mut req = format!("{} {} HTTP/1.1\r\nHost: {}\r\n", self.method(), self.path, self.host);
        for ((name, value), on) in HEADERS.iter().zip(self.enabled_headers) {
            if on {
                req.push_str(&format!("{name}: {value}\r\n"));
            }
        }
        req.push_str("\r\n");
        if self.has_body() {
            req.push_str(&self.body);
        }
        req
    }

    /// Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::Tab => {
                self.focus = self.focus.next();
                true
            }
            TuiEvent::BackTab => {
                self.focus = self.focus.prev();
                true
            }
            TuiEvent::InputChar('r') if self.focus != Focus::Path && self.focus != Focus::Body => {
                self.exchange = Exchange::Draft;
                true
            }
            _ => match self.focus {
                Focus::Method => self.handle_method(event),
                Focus::Path => self.handle_text(event, true),
                Focus::Headers => self.handle_headers(event),
                Focus::Body => self.handle_text(event, false),
                Focus::Send => self.handle_send(event),
            },
        }
    }

    // ←/→ are left alone everywhere so the global stage navigation
    // keeps working while the builder is focused.
    fn handle_method(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::CursorDown => {
                self.method_idx = (self.method_idx + 1) % METHODS.len();
                true
            }
            TuiEvent::CursorUp => {
                self.method_idx = (self.method_idx + METHODS.len() - 1) % METHODS.len();
                true
            }
            _ => false,
        }
    }

    fn handle_text(&mut self, event: &TuiEvent, is_path: bool) -> bool {
        if !is_path && !self.has_body() {
            return false;
        }
        let buffer = if is_path { &mut self.path } else { &mut self.body };
        match event {
            TuiEvent::InputChar(c) => {
                buffer.push(*c);
                true
            }
            TuiEvent::Backspace => {
                // The path keeps its leading slash.
                if !is_path || buffer.len() > 1 {
                    buffer.pop();
                }
                true
            }
            _ => false,
        }
    }

    fn handle_headers(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::CursorDown => {
                self.header_idx = (self.header_idx + 1).min(HEADERS.len() - 1);
                true
            }
            TuiEvent::CursorUp => {
                self.header_idx = self.header_idx.saturating_sub(1);
                true
            }
            TuiEvent::Submit => {
                self.enabled_headers[self.header_idx] = !self.enabled_headers[self.header_idx];
                true
            }
            _ => false,
        }
    }

    fn handle_send(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::Submit if !self.is_sending() => {
                self.exchange = Exchange::Sending {
                    since: Instant::now(),
                };
                true
            }
            _ => false,
        }
    }

    fn field_style(&self, field: Focus) -> Style {
        if self.focus == field {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }
}

impl Component for HttpState {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" HTTP Request ")
            .title_bottom(
                Line::from(" Tab next field · arrows edit · Enter toggle/send · r reset ")
                    .style(Style::default().fg(Color::DarkGray)),
            );
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let [builder_area, wire_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(inner);

        self.render_builder(frame, builder_area);
        self.render_wire(frame, wire_area);
    }
}

impl HttpState {
    fn render_builder(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Method  ", self.field_style(Focus::Method)),
                Span::styled(
                    format!(" {} ", self.method()),
                    Style::default()
                        .fg(Color::Black)
                        .bg(if self.focus == Focus::Method {
                            Color::Cyan
                        } else {
                            Color::Gray
                        })
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Path    ", self.field_style(Focus::Path)),
                Span::styled(self.path.clone(), Style::default().fg(Color::Gray)),
                Span::styled(
                    if self.focus == Focus::Path { "▏" } else { "" },
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            Line::default(),
            Line::from(Span::styled("Headers", self.field_style(Focus::Headers))),
        ];
        for (i, ((name, value), on)) in HEADERS.iter().zip(self.enabled_headers).enumerate() {
            let cursor = if self.focus == Focus::Headers && i == self.header_idx {
                "▶"
            } else {
                " "
            };
            let mark = if on { "[x]" } else { "[ ]" };
            let style = if on {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(Span::styled(
                format!("{cursor} {mark} {name}: {value}"),
                style,
            )));
        }
        lines.push(Line::default());
        if self.has_body() {
            lines.push(Line::from(vec![
                Span::styled("Body    ", self.field_style(Focus::Body)),
                Span::styled(self.body.clone(), Style::default().fg(Color::Gray)),
                Span::styled(
                    if self.focus == Focus::Body { "▏" } else { "" },
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                format!("Body    (none for {})", self.method()),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::default());
        let send_style = if self.focus == Focus::Send {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        lines.push(Line::from(Span::styled(" ▶ Send Request ", send_style)));
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_wire(&self, frame: &mut Frame, area: Rect) {
        let (title, content, color) = match &self.exchange {
            Exchange::Draft => (" on the wire ", self.raw_request(), Color::Gray),
            Exchange::Sending { .. } => (
                " on the wire ",
                format!("{}\n\n⋯ waiting for the server ⋯", self.raw_request()),
                Color::Yellow,
            ),
            Exchange::Done { response } => (" response ", response.clone(), Color::Green),
        };
        let panel = Paragraph::new(content)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(panel, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus_on(http: &mut HttpState, target: &str) {
        for _ in 0..Focus::ORDER.len() {
            let here = match http.focus {
                Focus::Method => "method",
                Focus::Path => "path",
                Focus::Headers => "headers",
                Focus::Body => "body",
                Focus::Send => "send",
            };
            if here == target {
                return;
            }
            http.handle_event(&TuiEvent::Tab);
        }
        panic!("focus {target} not reachable");
    }

    #[test]
    fn tab_cycles_focus_both_ways() {
        let mut http = HttpState::new("example.com");
        assert_eq!(http.focus, Focus::Method);
        http.handle_event(&TuiEvent::Tab);
        assert_eq!(http.focus, Focus::Path);
        http.handle_event(&TuiEvent::BackTab);
        http.handle_event(&TuiEvent::BackTab);
        assert_eq!(http.focus, Focus::Send, "BackTab wraps");
    }

    #[test]
    fn method_cycles_and_gates_body() {
        let mut http = HttpState::new("example.com");
        assert_eq!(http.method(), "GET");
        assert!(!http.has_body());
        http.handle_event(&TuiEvent::CursorDown);
        assert_eq!(http.method(), "POST");
        assert!(http.has_body());
        http.handle_event(&TuiEvent::CursorUp);
        http.handle_event(&TuiEvent::CursorUp);
        assert_eq!(http.method(), "HEAD", "cycling wraps");
    }

    #[test]
    fn path_editing_keeps_leading_slash() {
        let mut http = HttpState::new("example.com");
        focus_on(&mut http, "path");
        for c in "api".chars() {
            http.handle_event(&TuiEvent::InputChar(c));
        }
        assert_eq!(http.path, "/api");
        for _ in 0..10 {
            http.handle_event(&TuiEvent::Backspace);
        }
        assert_eq!(http.path, "/");
    }

    #[test]
    fn header_toggle_reflects_in_raw_request() {
        let mut http = HttpState::new("example.com");
        focus_on(&mut http, "headers");
        assert!(http.raw_request().contains("Accept: application/json"));
        http.handle_event(&TuiEvent::Submit);
        assert!(!http.raw_request().contains("Accept: application/json"));
        http.handle_event(&TuiEvent::CursorDown);
        http.handle_event(&TuiEvent::CursorDown);
        http.handle_event(&TuiEvent::Submit);
        assert!(http.raw_request().contains("Accept-Encoding: gzip, br"));
    }

    #[test]
    fn send_then_poll_produces_echo_response() {
        let mut http = HttpState::new("example.com");
        focus_on(&mut http, "send");
        http.handle_event(&TuiEvent::Submit);
        assert!(http.is_sending());
        let start = Instant::now();
        assert!(
            !http.poll(start, Duration::from_millis(800)),
            "response must not arrive before the deadline"
        );
        assert!(http.poll(
            start + Duration::from_millis(900),
            Duration::from_millis(800)
        ));
        match &http.exchange {
            Exchange::Done { response } => {
                assert!(response.starts_with("HTTP/1.1 200 OK"));
                assert!(response.contains("\"method\": \"GET\""));
                assert!(response.contains("https://example.com/"));
            }
            other => panic!("expected Done, got {other:?}"),
        }
        assert_eq!(http.status(), Some("200 OK"));
    }

    #[test]
    fn zero_latency_delivers_immediately() {
        let mut http = HttpState::new("example.com");
        focus_on(&mut http, "send");
        http.handle_event(&TuiEvent::Submit);
        assert!(http.poll(Instant::now(), Duration::ZERO));
        assert!(!http.is_sending());
    }

    #[test]
    fn reset_returns_to_draft() {
        let mut http = HttpState::new("example.com");
        focus_on(&mut http, "send");
        http.handle_event(&TuiEvent::Submit);
        http.poll(Instant::now(), Duration::ZERO);
        http.handle_event(&TuiEvent::InputChar('r'));
        assert_eq!(http.exchange, Exchange::Draft);
    }

    #[test]
    fn typing_r_in_path_is_text_not_reset() {
        let mut http = HttpState::new("example.com");
        focus_on(&mut http, "path");
        http.handle_event(&TuiEvent::InputChar('r'));
        assert_eq!(http.path, "/r");
    }
}
