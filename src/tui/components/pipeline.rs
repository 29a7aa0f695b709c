//! # Pipeline Visualizer
//!
//! Shared engine for the two stage visualizers that are "a sequence of
//! processing steps": server processing and browser rendering. Each step
//! carries a detail paragraph, an optional metric line, and an optional
//! code snippet; the content arrays live in `server.rs` and `rendering.rs`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Gauge, Paragraph, Wrap};

use crate::core::sequencer::StepCursor;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

pub struct PipelineStep {
    pub name: &'static str,
    pub detail: &'static str,
    /// e.g. "~2ms · p99 40ms" — shown dimmed next to the step name.
    pub metric: Option<&'static str>,
    /// Fenced markdown code block shown when the code view is toggled.
    pub snippet: Option<&'static str>,
}

pub struct PipelineState {
    title: &'static str,
    done_message: &'static str,
    steps: &'static [PipelineStep],
    cursor: StepCursor,
    show_code: bool,
}

impl PipelineState {
    pub fn new(
        title: &'static str,
        done_message: &'static str,
        steps: &'static [PipelineStep],
    ) -> Self {
        Self {
            title,
            done_message,
            steps,
            cursor: StepCursor::new(steps.len()),
            show_code: false,
        }
    }

    pub fn cursor(&self) -> &StepCursor {
        &self.cursor
    }

    pub fn complete(&self) -> bool {
        self.cursor.at_end()
    }

    pub fn status(&self) -> Option<&str> {
        if self.complete() {
            Some(self.done_message)
        } else {
            None
        }
    }

    /// Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::CursorDown => self.cursor.advance(),
            TuiEvent::CursorUp => self.cursor.retreat(),
            TuiEvent::InputChar('b') => {
                self.show_code = !self.show_code;
                true
            }
            TuiEvent::InputChar('r') => {
                self.cursor.reset();
                true
            }
            _ => false,
        }
    }
}

impl Component for PipelineState {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", self.title))
            .title_bottom(
                Line::from(" ↓ next step · ↑ back · b code · r restart ")
                    .style(Style::default().fg(Color::DarkGray)),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [list_area, gauge_area, detail_area] = Layout::vertical([
            Constraint::Length(self.steps.len() as u16 + 1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let mut lines = Vec::with_capacity(self.steps.len());
        for (i, step) in self.steps.iter().enumerate() {
            let reached = i <= self.cursor.step();
            let current = i == self.cursor.step();
            let marker = if current {
                "▶"
            } else if reached {
                "✓"
            } else {
                "·"
            };
            let name_style = if current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if reached {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut spans = vec![
                Span::styled(format!(" {marker} "), name_style),
                Span::styled(step.name, name_style),
            ];
            if let Some(metric) = step.metric {
                spans.push(Span::styled(
                    format!("  {metric}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), list_area);

        let gauge = Gauge::default()
            .ratio(self.cursor.ratio())
            .label(format!(
                "step {}/{}",
                self.cursor.step() + 1,
                self.cursor.total()
            ))
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray));
        frame.render_widget(gauge, gauge_area);

        let step = &self.steps[self.cursor.step()];
        if self.show_code && step.snippet.is_some() {
            let snippet = step.snippet.unwrap_or_default();
            frame.render_widget(
                Paragraph::new(markdown::render(snippet, Color::Gray)).block(
                    Block::bordered()
                        .title(format!(" {} ", step.name))
                        .border_style(Style::default().fg(Color::DarkGray)),
                ),
                detail_area,
            );
        } else {
            frame.render_widget(
                Paragraph::new(step.detail)
                    .style(Style::default().fg(Color::Gray))
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::bordered()
                            .title(format!(" {} ", step.name))
                            .border_style(Style::default().fg(Color::DarkGray)),
                    ),
                detail_area,
            );
        }
    }
}
