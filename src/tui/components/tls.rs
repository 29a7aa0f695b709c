//! # TLS Handshake Visualizer
//!
//! Steps through the four logical phases of a TLS 1.3 handshake between the
//! client and server columns. `i` opens an info overlay for the current
//! phase with three tabs (technical, developer, conceptual) cycled with
//! Tab, so the same step can be read at whatever depth the user wants.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::core::sequencer::StepCursor;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

struct TlsPhase {
    name: &'static str,
    from_client: bool,
    technical: &'static str,
    developer: &'static str,
    conceptual: &'static str,
}

const PHASES: [TlsPhase; 4] = [
    TlsPhase {
        name: "ClientHello",
        from_client: true,
        technical: "Client sends supported TLS versions, cipher suites, a \
                    32-byte random, SNI, and key-share extensions for its \
                    preferred groups (x25519, secp256r1).",
        developer: "This is where SNI lives — one IP can host many certs \
                    because the hostname travels in the clear here. Debug \
                    with `openssl s_client -connect host:443 -servername host`.",
        conceptual: "The browser opens with \"here's what languages I speak \
                    and a bit of randomness to keep things fresh\".",
    },
    TlsPhase {
        name: "ServerHello",
        from_client: false,
        technical: "Server picks the version and cipher suite, sends its own \
                    random and key share, then its X.509 certificate chain, \
                    already encrypted under the handshake keys in TLS 1.3.",
        developer: "Certificate problems surface here: expired chains, \
                    missing intermediates, hostname mismatches. The cert is \
                    proof of identity signed by a CA your OS already trusts.",
        conceptual: "The server answers \"let's use this dialect, and here's \
                    my ID card, vouched for by someone you trust\".",
    },
    TlsPhase {
        name: "Key Exchange",
        from_client: true,
        technical: "Both sides run ECDHE over the exchanged key shares and \
                    derive the session keys via HKDF. Ephemeral keys give \
                    perfect forward secrecy.",
        developer: "Nothing secret ever crosses the wire — both ends compute \
                    the same shared secret independently. Compromising the \
                    server's long-term key later can't decrypt this session.",
        conceptual: "A mathematical trick: both sides mix public ingredients \
                    with a private one and arrive at the same secret, while \
                    an eavesdropper who saw everything still can't.",
    },
    TlsPhase {
        name: "Finished",
        from_client: false,
        technical: "Each side sends a Finished message, an HMAC over the \
                    whole handshake transcript, proving key possession and \
                    that nothing was tampered with in flight.",
        developer: "After this, the socket carries only symmetric-encrypted \
                    records (AES-GCM or ChaCha20-Poly1305). TLS 1.3 got here \
                    in one round trip; 1.2 needed two.",
        conceptual: "Both sides confirm \"we heard the same conversation\" \
                    and switch to their new secret language.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoTab {
    Technical,
    Developer,
    Conceptual,
}

impl InfoTab {
    const ALL: [InfoTab; 3] = [InfoTab::Technical, InfoTab::Developer, InfoTab::Conceptual];

    fn label(&self) -> &'static str {
        match self {
            InfoTab::Technical => "Technical",
            InfoTab::Developer => "Developer",
            InfoTab::Conceptual => "Conceptual",
        }
    }

    fn next(&self) -> InfoTab {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

pub struct TlsState {
    cursor: StepCursor,
    show_info: bool,
    tab: InfoTab,
}

impl TlsState {
    pub fn new() -> Self {
        Self {
            cursor: StepCursor::new(PHASES.len()),
            show_info: false,
            tab: InfoTab::Technical,
        }
    }

    pub fn secured(&self) -> bool {
        self.cursor.at_end()
    }

    pub fn status(&self) -> Option<&str> {
        if self.secured() {
            Some("Channel secured")
        } else {
            None
        }
    }

    /// Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::CursorDown => self.cursor.advance(),
            TuiEvent::CursorUp => self.cursor.retreat(),
            TuiEvent::InputChar('i') => {
                self.show_info = !self.show_info;
                true
            }
            TuiEvent::Tab if self.show_info => {
                self.tab = self.tab.next();
                true
            }
            TuiEvent::Escape if self.show_info => {
                self.show_info = false;
                true
            }
            TuiEvent::InputChar('r') => {
                self.cursor.reset();
                true
            }
            _ => false,
        }
    }

    fn render_info_overlay(&self, frame: &mut Frame, area: Rect) {
        let phase = &PHASES[self.cursor.step()];
        let [overlay] = Layout::horizontal([Constraint::Percentage(70)])
            .flex(Flex::Center)
            .areas(area);
        let [overlay] = Layout::vertical([Constraint::Percentage(70)])
            .flex(Flex::Center)
            .areas(overlay);

        let tabs: Vec<Span> = InfoTab::ALL
            .iter()
            .flat_map(|tab| {
                let style = if *tab == self.tab {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                [
                    Span::styled(format!(" {} ", tab.label()), style),
                    Span::raw(" "),
                ]
            })
            .collect();

        let body = match self.tab {
            InfoTab::Technical => phase.technical,
            InfoTab::Developer => phase.developer,
            InfoTab::Conceptual => phase.conceptual,
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", phase.name))
            .title_bottom(
                Line::from(" Tab switch view · i/Esc close ")
                    .style(Style::default().fg(Color::DarkGray)),
            );
        let inner = block.inner(overlay);
        frame.render_widget(Clear, overlay);
        frame.render_widget(block, overlay);

        let [tab_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
        frame.render_widget(Line::from(tabs), tab_area);
        frame.render_widget(
            Paragraph::new(body)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true }),
            body_area,
        );
    }
}

impl Component for TlsState {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" TLS Handshake ")
            .title_bottom(
                Line::from(" ↓ next phase · ↑ back · i info · r restart ")
                    .style(Style::default().fg(Color::DarkGray)),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  Client 🔓", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("                            "),
                Span::styled("Server", Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::default(),
        ];
        for (i, phase) in PHASES.iter().enumerate() {
            let reached = i <= self.cursor.step();
            let current = i == self.cursor.step();
            let style = if current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if reached {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let arrow = if phase.from_client {
                format!("    ───── {} ─────▶", phase.name)
            } else {
                format!("    ◀───── {} ─────", phase.name)
            };
            lines.push(Line::from(Span::styled(arrow, style)));
        }
        lines.push(Line::default());
        if self.secured() {
            lines.push(Line::from(Span::styled(
                "  🔒 Encrypted channel established — everything from here is ciphertext.",
                Style::default().fg(Color::Green),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!(
                    "  phase {}/{}: press ↓ to continue the handshake",
                    self.cursor.step() + 1,
                    self.cursor.total()
                ),
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        if self.show_info {
            self.render_info_overlay(frame, area);
        }
    }
}
