//! End-to-end walk of the authored journey through the public API: the
//! navigation contract over the real eight-stage content, and a
//! keyboard-driven pass through the whole TUI state machine.

use wirewalk::core::config::ResolvedConfig;
use wirewalk::core::content;
use wirewalk::core::sequencer::NavState;
use wirewalk::tui::event::TuiEvent;
use wirewalk::tui::{InputMode, TuiState};

#[test]
fn forward_walk_visits_every_dialog_exactly_once() {
    let journey = content::journey();
    let mut nav = NavState::new(&journey).expect("authored journey is valid");

    let total: usize = journey.stages().iter().map(|s| s.dialogs.len()).sum();
    let mut visited = vec![(nav.stage(), nav.dialog())];
    while nav.can_advance(&journey) {
        nav.advance(&journey);
        visited.push((nav.stage(), nav.dialog()));
    }

    assert_eq!(visited.len(), total, "one position per dialog line");
    let mut deduped = visited.clone();
    deduped.dedup();
    assert_eq!(deduped, visited, "no position repeats");
    assert_eq!(nav.stage(), journey.len() - 1);
}

#[test]
fn backward_walk_retraces_the_forward_path() {
    let journey = content::journey();
    let mut nav = NavState::new(&journey).unwrap();

    let mut forward = vec![(nav.stage(), nav.dialog())];
    while nav.can_advance(&journey) {
        nav.advance(&journey);
        forward.push((nav.stage(), nav.dialog()));
    }

    let mut backward = vec![(nav.stage(), nav.dialog())];
    while nav.can_retreat() {
        nav.retreat(&journey);
        backward.push((nav.stage(), nav.dialog()));
    }

    forward.reverse();
    assert_eq!(backward, forward, "retreat is the exact inverse of advance");
}

#[test]
fn jumping_to_any_stage_lands_on_its_first_dialog() {
    let journey = content::journey();
    let mut nav = NavState::new(&journey).unwrap();
    for target in (0..journey.len()).rev() {
        nav.jump_to_stage(&journey, target).unwrap();
        assert_eq!((nav.stage(), nav.dialog()), (target, 0));
    }
}

fn config() -> ResolvedConfig {
    ResolvedConfig {
        start_url: None,
        start_stage: 0,
        latency_ms: 0,
        show_companion: true,
    }
}

#[test]
fn keyboard_tour_from_address_bar_to_last_stage() {
    let mut state = TuiState::new(&config()).unwrap();
    assert_eq!(state.mode, InputMode::Address);

    for c in "google.com".chars() {
        state.handle_event(&TuiEvent::InputChar(c));
    }
    state.handle_event(&TuiEvent::Submit);
    assert_eq!(state.nav.stage(), 1, "submit starts the tour at URL parsing");

    // Page forward until the journey refuses to move.
    let mut presses = 0;
    while state.nav.can_advance(&state.journey) {
        state.handle_event(&TuiEvent::CursorRight);
        presses += 1;
        assert!(presses < 200, "tour must terminate");
    }
    assert_eq!(state.nav.stage(), state.journey.len() - 1);

    // Terminal position: one more press changes nothing.
    let end = (state.nav.stage(), state.nav.dialog());
    state.handle_event(&TuiEvent::CursorRight);
    assert_eq!((state.nav.stage(), state.nav.dialog()), end);

    state.handle_event(&TuiEvent::InputChar('q'));
    assert!(state.should_quit());
}

#[test]
fn retreating_from_stage_two_lands_on_last_intro_line() {
    let mut state = TuiState::new(&config()).unwrap();
    state.handle_event(&TuiEvent::Escape);
    state.handle_event(&TuiEvent::InputChar('2'));
    assert_eq!((state.nav.stage(), state.nav.dialog()), (1, 0));

    state.handle_event(&TuiEvent::CursorLeft);
    let intro_dialogs = state.journey.stage(0).unwrap().dialogs.len();
    assert_eq!(
        (state.nav.stage(), state.nav.dialog()),
        (0, intro_dialogs - 1),
        "boundary retreat lands on the previous stage's last line"
    );
}
