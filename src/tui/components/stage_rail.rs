//! # StageRail Component
//!
//! Bottom rail: one dot + title per stage, the current one highlighted.
//! Number keys and mouse clicks on the rail map to direct stage jumps
//! (`NavState::jump_to_stage` in the container).

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::journey::Journey;

pub struct StageRail<'a> {
    journey: &'a Journey,
    current: usize,
}

impl<'a> StageRail<'a> {
    pub fn new(journey: &'a Journey, current: usize) -> Self {
        Self { journey, current }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let count = self.journey.len();
        if count == 0 || area.height == 0 {
            return;
        }
        let slots = slot_rects(area, count);
        for (index, (stage, slot)) in self.journey.stages().iter().zip(slots).enumerate() {
            let active = index == self.current;
            let (dot_style, title_style) = if active {
                (
                    Style::default().fg(Color::Cyan),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::DarkGray),
                )
            };
            let dot = if active { "●" } else { "○" };
            let lines = vec![
                Line::from(Span::styled(format!("{dot} {}", index + 1), dot_style)).centered(),
                Line::from(Span::styled(stage.title.clone(), title_style)).centered(),
            ];
            frame.render_widget(Paragraph::new(lines), slot);
        }
    }
}

/// Even horizontal split of the rail area into one slot per stage.
fn slot_rects(area: Rect, count: usize) -> Vec<Rect> {
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    Layout::horizontal(constraints).split(area).to_vec()
}

/// Hit test: which stage slot (if any) contains the clicked column/row.
pub fn hit_test_stage(column: u16, row: u16, rail_area: Rect, count: usize) -> Option<usize> {
    if count == 0
        || row < rail_area.y
        || row >= rail_area.y + rail_area.height
        || column < rail_area.x
        || column >= rail_area.x + rail_area.width
    {
        return None;
    }
    slot_rects(rail_area, count)
        .iter()
        .position(|slot| column >= slot.x && column < slot.x + slot.width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn renders_all_stage_titles() {
        let journey = content::journey();
        let backend = TestBackend::new(160, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| StageRail::new(&journey, 2).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Browser Input"));
        assert!(text.contains("DNS Resolution"));
        assert!(text.contains("Browser Rendering"));
    }

    #[test]
    fn hit_test_maps_columns_to_stages() {
        let area = Rect::new(0, 22, 160, 2);
        assert_eq!(hit_test_stage(0, 22, area, 8), Some(0));
        assert_eq!(hit_test_stage(159, 23, area, 8), Some(7));
        // Middle of the rail: 8 slots of 20 columns each.
        assert_eq!(hit_test_stage(45, 22, area, 8), Some(2));
    }

    #[test]
    fn hit_test_rejects_clicks_outside_rail() {
        let area = Rect::new(0, 22, 160, 2);
        assert_eq!(hit_test_stage(40, 10, area, 8), None);
        assert_eq!(hit_test_stage(40, 24, area, 8), None);
    }
}
