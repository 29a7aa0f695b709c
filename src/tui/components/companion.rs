//! # Companion Guide
//!
//! Floating narrator bubble drawn over the stage visualizer. Shows the
//! current dialog line rendered as markdown, plus prev/next affordances
//! that mirror what the navigation state allows. Visibility is persistent
//! state owned here; position and text are props passed in per frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::tui::markdown;

const BUBBLE_WIDTH: u16 = 46;
const MIN_BUBBLE_HEIGHT: u16 = 5;

pub struct CompanionGuide {
    pub visible: bool,
}

impl CompanionGuide {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Draw the bubble anchored to the bottom-right corner of `area`,
    /// on top of whatever is already there.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        dialog: &str,
        can_retreat: bool,
        can_advance: bool,
    ) {
        if !self.visible || area.width < BUBBLE_WIDTH / 2 || area.height < MIN_BUBBLE_HEIGHT {
            return;
        }
        let width = BUBBLE_WIDTH.min(area.width);
        // Height follows the wrapped text, borders plus one footer line.
        let inner_width = width.saturating_sub(2) as usize;
        let wrapped = textwrap::wrap(dialog, inner_width.max(1));
        let height = (wrapped.len() as u16 + 3)
            .max(MIN_BUBBLE_HEIGHT)
            .min(area.height);

        let bubble = Rect::new(
            area.x + area.width - width,
            area.y + area.height - height,
            width,
            height,
        );

        let prev = if can_retreat { "← prev" } else { "      " };
        let next = if can_advance { "next →" } else { " done " };
        let footer = Line::from(vec![
            Span::styled(prev, Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(
                next,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
        .right_aligned();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" 🦉 Guide ")
            .title_bottom(footer);

        let text = markdown::render(dialog, Color::Gray);
        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(block);

        frame.render_widget(Clear, bubble);
        frame.render_widget(paragraph, bubble);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(guide: &CompanionGuide, dialog: &str) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| guide.render(f, f.area(), dialog, true, true))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn visible_guide_shows_dialog_text() {
        let guide = CompanionGuide::new(true);
        let text = rendered(&guide, "DNS resolution follows a hierarchical process:");
        assert!(text.contains("Guide"));
        assert!(text.contains("hierarchical"));
        assert!(text.contains("next"));
    }

    #[test]
    fn hidden_guide_draws_nothing() {
        let guide = CompanionGuide::new(false);
        let text = rendered(&guide, "anything");
        assert!(!text.contains("Guide"));
        assert!(!text.contains("anything"));
    }

    #[test]
    fn toggle_flips_visibility() {
        let mut guide = CompanionGuide::new(true);
        guide.toggle();
        assert!(!guide.visible);
        guide.toggle();
        assert!(guide.visible);
    }

    #[test]
    fn tiny_area_is_skipped() {
        let guide = CompanionGuide::new(true);
        let backend = TestBackend::new(10, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        // Must not panic on degenerate sizes.
        terminal
            .draw(|f| guide.render(f, f.area(), "text", false, false))
            .unwrap();
    }
}
