//! # TCP Handshake Trainer
//!
//! A little ordering game: the three handshake segments are offered out of
//! order and the user has to fire them in the right sequence. A wrong pick
//! gets a nudge, three right picks establish the connection. `b` toggles a
//! socket-level code view of what the OS is doing underneath.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, Paragraph};

use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

struct Segment {
    name: &'static str,
    /// true = client → server
    from_client: bool,
    summary: &'static str,
}

/// The correct firing order.
const SEQUENCE: [Segment; 3] = [
    Segment {
        name: "SYN",
        from_client: true,
        summary: "seq=1000 · client: \"I'd like to talk, here's my starting sequence number\"",
    },
    Segment {
        name: "SYN-ACK",
        from_client: false,
        summary: "seq=3000 ack=1001 · server: \"heard you, here's mine, acknowledging yours\"",
    },
    Segment {
        name: "ACK",
        from_client: true,
        summary: "ack=3001 · client: \"acknowledged, we're connected\"",
    },
];

/// Display order of the choices, deliberately scrambled.
const CHOICES: [&str; 3] = ["ACK", "SYN", "SYN-ACK"];

const SOCKET_CODE: &str = "```c\n\
    int fd = socket(AF_INET, SOCK_STREAM, 0);\n\
    // connect() blocks while the kernel runs the\n\
    // three-way handshake for us\n\
    connect(fd, (struct sockaddr *)&addr, sizeof(addr));\n\
    ```";

pub struct TcpState {
    selected: usize,
    /// How many segments have been fired in the correct order.
    progress: usize,
    feedback: Option<String>,
    show_code: bool,
}

impl TcpState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            progress: 0,
            feedback: None,
            show_code: false,
        }
    }

    pub fn established(&self) -> bool {
        self.progress == SEQUENCE.len()
    }

    pub fn status(&self) -> Option<&str> {
        if self.established() {
            Some("Connection established!")
        } else {
            None
        }
    }

    fn pick(&mut self) {
        if self.established() {
            return;
        }
        let choice = CHOICES[self.selected];
        let expected = &SEQUENCE[self.progress];
        if choice == expected.name {
            self.progress += 1;
            self.feedback = if self.established() {
                Some("Three-way handshake complete.".to_string())
            } else {
                None
            };
        } else {
            self.feedback = Some(format!(
                "Not quite — {} isn't next. Think about who speaks first.",
                choice
            ));
        }
    }

    /// Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(CHOICES.len() - 1);
                true
            }
            TuiEvent::Submit => {
                self.pick();
                true
            }
            TuiEvent::InputChar('r') => {
                self.progress = 0;
                self.feedback = None;
                true
            }
            TuiEvent::InputChar('b') => {
                self.show_code = !self.show_code;
                true
            }
            _ => false,
        }
    }
}

impl Component for TcpState {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Three-Way Handshake ")
            .title_bottom(
                Line::from(" ↑/↓ choose · Enter send · b code · r restart ")
                    .style(Style::default().fg(Color::DarkGray)),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [wire_area, choice_area, feedback_area, code_area] = Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(CHOICES.len() as u16 + 1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        // Client/server timeline: one row per fired segment.
        let mut lines = vec![
            Line::from(vec![
                Span::styled("  Client", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("                              "),
                Span::styled("Server", Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::default(),
        ];
        for segment in SEQUENCE.iter().take(self.progress) {
            let arrow = if segment.from_client {
                format!("    ───── {} ─────▶", segment.name)
            } else {
                format!("    ◀───── {} ─────", segment.name)
            };
            lines.push(Line::from(vec![
                Span::styled(arrow, Style::default().fg(Color::Green)),
                Span::styled(
                    format!("   {}", segment.summary),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
        if !self.established() {
            lines.push(Line::from(Span::styled(
                format!("    waiting for segment {} of 3…", self.progress + 1),
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(Paragraph::new(lines), wire_area);

        let items: Vec<ListItem> = CHOICES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if i == self.selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(Span::styled(format!("  {name}  "), style)))
            })
            .collect();
        frame.render_widget(
            List::new(items).block(Block::new().title("Send next segment:")),
            choice_area,
        );

        if let Some(feedback) = &self.feedback {
            let color = if self.established() {
                Color::Green
            } else {
                Color::Yellow
            };
            frame.render_widget(
                Line::from(Span::styled(feedback.clone(), Style::default().fg(color))),
                feedback_area,
            );
        }

        if self.show_code {
            let code = markdown::render(SOCKET_CODE, Color::Gray);
            frame.render_widget(
                Paragraph::new(code).block(
                    Block::bordered()
                        .title(" under the hood ")
                        .border_style(Style::default().fg(Color::DarkGray)),
                ),
                code_area,
            );
        }
    }
}
