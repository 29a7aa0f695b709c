//! Top-level frame layout: title line, active stage visualizer, stage rail,
//! with the companion guide floating over the middle. All drawing flows
//! through [`draw_ui`]; the event loop in `tui::mod` owns the state.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::content;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{StageRail, TitleBar};

pub fn draw_ui(frame: &mut Frame, state: &mut TuiState) {
    let [title_area, main_area, rail_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(frame.area());

    // The rail rect is remembered for mouse hit-testing.
    state.rail_area = rail_area;

    let (stage_title, dialog, stage_id) = match state.journey.stage(state.nav.stage()) {
        Some(stage) => (
            stage.title.clone(),
            stage
                .dialogs
                .get(state.nav.dialog())
                .cloned()
                .unwrap_or_default(),
            stage.id.clone(),
        ),
        None => return,
    };

    let position = format!(
        "stage {}/{} · line {}/{}",
        state.nav.stage() + 1,
        state.journey.len(),
        state.nav.dialog() + 1,
        state
            .journey
            .stage(state.nav.stage())
            .map(|s| s.dialogs.len())
            .unwrap_or(0),
    );
    TitleBar::new(stage_title, position, state.status_message()).render(frame, title_area);

    render_stage(frame, main_area, state, &stage_id);

    state.companion.render(
        frame,
        main_area,
        &dialog,
        state.nav.can_retreat(),
        state.nav.can_advance(&state.journey),
    );

    StageRail::new(&state.journey, state.nav.stage()).render(frame, rail_area);
}

fn render_stage(frame: &mut Frame, area: Rect, state: &mut TuiState, stage_id: &str) {
    match stage_id {
        content::BROWSER_INPUT => render_browser_input(frame, area, state),
        content::URL_PARSING => state.url_parser.render(frame, area),
        content::DNS_RESOLUTION => state.dns.render(frame, area),
        content::TCP_HANDSHAKE => state.tcp.render(frame, area),
        content::TLS_HANDSHAKE => state.tls.render(frame, area),
        content::HTTP_REQUEST => state.http.render(frame, area),
        content::SERVER_PROCESSING => state.server.render(frame, area),
        content::BROWSER_RENDERING => state.rendering.render(frame, area),
        _ => {}
    }
}

/// Stage one: a mostly-empty screen with a centered address bar, the way a
/// fresh browser tab looks.
fn render_browser_input(frame: &mut Frame, area: Rect, state: &mut TuiState) {
    let [column] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(area);
    let [banner_area, bar_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
    ])
    .flex(Flex::Center)
    .areas(column);

    let banner = vec![
        Line::from(Span::styled(
            "Where does a URL go?",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(
            "Type an address and press Enter to follow it through the stack.",
            Style::default().fg(Color::Gray),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(banner), banner_area);

    state.address.render(frame, bar_area);

    let hint = Line::from(Span::styled(
        "Esc browse stages · Ctrl+C quit",
        Style::default().fg(Color::DarkGray),
    ))
    .centered();
    frame.render_widget(hint, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ResolvedConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn test_config() -> ResolvedConfig {
        ResolvedConfig {
            start_url: None,
            start_stage: 0,
            latency_ms: 0,
            show_companion: true,
        }
    }

    fn rendered(state: &mut TuiState) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn first_frame_shows_address_bar_and_rail() {
        let mut state = TuiState::new(&test_config()).unwrap();
        let text = rendered(&mut state);
        assert!(text.contains("Where does a URL go?"));
        assert!(text.contains("Browser Input"));
        assert!(text.contains("stage 1/8"));
        assert!(text.contains("TLS Handshake"), "rail lists later stages");
    }

    #[test]
    fn every_stage_renders_without_panic() {
        let mut state = TuiState::new(&test_config()).unwrap();
        for target in 0..state.journey.len() {
            state.nav.jump_to_stage(&state.journey, target).unwrap();
            let text = rendered(&mut state);
            assert!(text.contains(&format!("stage {}/8", target + 1)));
        }
    }

    #[test]
    fn rail_area_is_recorded_for_hit_testing() {
        let mut state = TuiState::new(&test_config()).unwrap();
        assert_eq!(state.rail_area, Rect::default());
        rendered(&mut state);
        assert_eq!(state.rail_area.height, 2);
        assert_eq!(state.rail_area.width, 120);
    }
}
