//! # DNS Resolution Visualizer
//!
//! Animates the recursive lookup as a five-node hop diagram. ↓ advances the
//! query one hop, ↑ rewinds, Enter toggles a details panel for the current
//! hop. The domain comes from whatever URL was submitted on stage one.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Gauge, Paragraph, Wrap};

use crate::core::sequencer::StepCursor;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

struct DnsHop {
    node: &'static str,
    action: &'static str,
    detail: &'static str,
}

const HOPS: [DnsHop; 5] = [
    DnsHop {
        node: "Browser",
        action: "checks its own DNS cache",
        detail: "Browsers keep a short-lived cache of recent lookups. A hit \
                 here skips the network entirely. Chrome caps entries at \
                 about a minute regardless of the record's TTL.",
    },
    DnsHop {
        node: "OS Resolver",
        action: "checks the system cache and hosts file",
        detail: "The operating system's stub resolver consults its own cache \
                 and /etc/hosts before asking anyone else. Static hosts-file \
                 entries win over everything.",
    },
    DnsHop {
        node: "Recursive Resolver",
        action: "starts the recursive query",
        detail: "Usually run by your ISP or a public service like 1.1.1.1 or \
                 8.8.8.8. It does the legwork of walking the DNS hierarchy \
                 and caches answers for their TTL.",
    },
    DnsHop {
        node: "Root Server",
        action: "refers to the .com TLD servers",
        detail: "Thirteen root server identities (a-m.root-servers.net), \
                 each an anycast cluster of hundreds of machines. They don't \
                 know the answer, only who handles the TLD.",
    },
    DnsHop {
        node: "TLD + Authoritative",
        action: "returns the A record with the IP",
        detail: "The TLD server points at the domain's authoritative \
                 nameservers, which hold the actual records. The answer \
                 travels back down, cached at every hop along the way.",
    },
];

pub struct DnsState {
    domain: String,
    cursor: StepCursor,
    show_details: bool,
}

impl DnsState {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            cursor: StepCursor::new(HOPS.len()),
            show_details: false,
        }
    }

    pub fn set_domain(&mut self, domain: &str) {
        if domain != self.domain {
            self.domain = domain.to_string();
            self.cursor.reset();
        }
    }

    pub fn resolved(&self) -> bool {
        self.cursor.at_end()
    }

    /// Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::CursorDown => self.cursor.advance(),
            TuiEvent::CursorUp => self.cursor.retreat(),
            TuiEvent::Submit => {
                self.show_details = !self.show_details;
                true
            }
            TuiEvent::InputChar('r') => {
                self.cursor.reset();
                self.show_details = false;
                true
            }
            _ => false,
        }
    }
}

impl Component for DnsState {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!(" Resolving {} ", self.domain);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title)
            .title_bottom(
                Line::from(" ↓ next hop · ↑ back · Enter details · r restart ")
                    .style(Style::default().fg(Color::DarkGray)),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [diagram_area, gauge_area, detail_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        // One node per slot, arrows between reached nodes.
        let mut spans: Vec<Span> = Vec::new();
        for (i, hop) in HOPS.iter().enumerate() {
            let reached = i <= self.cursor.step();
            let current = i == self.cursor.step();
            let style = if current {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if reached {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if i > 0 {
                let arrow_style = if reached {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled(" ──▶ ", arrow_style));
            }
            spans.push(Span::styled(format!("[{}]", hop.node), style));
        }
        let hop = &HOPS[self.cursor.step()];
        let diagram = vec![
            Line::default(),
            Line::from(spans).centered(),
            Line::from(Span::styled(
                format!("{} {}", hop.node, hop.action),
                Style::default().fg(Color::Gray),
            ))
            .centered(),
        ];
        frame.render_widget(Paragraph::new(diagram), diagram_area);

        let label = if self.resolved() {
            format!("{} → 142.250.80.46", self.domain)
        } else {
            format!("hop {}/{}", self.cursor.step() + 1, self.cursor.total())
        };
        let gauge = Gauge::default()
            .ratio(self.cursor.ratio())
            .label(label)
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray));
        frame.render_widget(gauge, gauge_area);

        if self.show_details {
            let detail = Paragraph::new(hop.detail)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .block(
                    Block::bordered()
                        .title(format!(" {} ", hop.node))
                        .border_style(Style::default().fg(Color::DarkGray)),
                );
            frame.render_widget(detail, detail_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn walks_all_five_hops() {
        let mut dns = DnsState::new("google.com");
        assert!(!dns.resolved());
        let mut moved = 0;
        while dns.handle_event(&TuiEvent::CursorDown) {
            moved += 1;
        }
        assert_eq!(moved, 4);
        assert!(dns.resolved());
    }

    #[test]
    fn restart_rewinds_and_hides_details() {
        let mut dns = DnsState::new("google.com");
        dns.handle_event(&TuiEvent::CursorDown);
        dns.handle_event(&TuiEvent::Submit);
        assert!(dns.show_details);
        dns.handle_event(&TuiEvent::InputChar('r'));
        assert_eq!(dns.cursor.step(), 0);
        assert!(!dns.show_details);
    }

    #[test]
    fn new_domain_resets_progress() {
        let mut dns = DnsState::new("google.com");
        dns.handle_event(&TuiEvent::CursorDown);
        dns.set_domain("example.com");
        assert_eq!(dns.cursor.step(), 0);
        dns.set_domain("example.com");
        dns.handle_event(&TuiEvent::CursorDown);
        dns.set_domain("example.com");
        assert_eq!(dns.cursor.step(), 1, "same domain keeps progress");
    }

    #[test]
    fn renders_diagram_and_domain() {
        let mut dns = DnsState::new("example.com");
        dns.handle_event(&TuiEvent::Submit);
        let backend = TestBackend::new(120, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| dns.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Resolving example.com"));
        assert!(text.contains("[Browser]"));
        assert!(text.contains("[Root Server]"));
        assert!(text.contains("DNS cache") || text.contains("short-lived cache"));
    }
}
