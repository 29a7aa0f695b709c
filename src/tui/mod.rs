//! # Terminal UI
//!
//! Owns the terminal, the event loop, and the application state. Input is
//! modal: on the first stage keystrokes go to the address bar (`Address`
//! mode); everywhere else they drive the tour (`Tour` mode). The active
//! stage visualizer gets first refusal on every event, so its keys win over
//! the global bindings while it has something to do with them.

pub mod component;
pub mod components;
pub mod event;
pub mod markdown;
pub mod ui;

use std::fmt;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::core::config::ResolvedConfig;
use crate::core::content;
use crate::core::journey::{Journey, JourneyError};
use crate::core::sequencer::NavState;
use crate::tui::component::EventHandler;
use crate::tui::components::rendering::rendering_pipeline;
use crate::tui::components::server::server_pipeline;
use crate::tui::components::stage_rail::hit_test_stage;
use crate::tui::components::{
    AddressBar, AddressEvent, CompanionGuide, DnsState, HttpState, PipelineState, TcpState,
    TlsState, UrlParserState,
};
use crate::tui::event::TuiEvent;

/// Poll timeout while the simulated HTTP exchange is animating.
const ANIMATION_TICK: Duration = Duration::from_millis(80);
/// Poll timeout when idle.
const IDLE_TICK: Duration = Duration::from_millis(500);

const FALLBACK_URL: &str = "https://example.com";

#[derive(Debug)]
pub enum TuiError {
    Io(io::Error),
    Journey(JourneyError),
}

impl fmt::Display for TuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuiError::Io(e) => write!(f, "terminal I/O error: {e}"),
            TuiError::Journey(e) => write!(f, "journey error: {e}"),
        }
    }
}

impl std::error::Error for TuiError {}

impl From<io::Error> for TuiError {
    fn from(e: io::Error) -> Self {
        TuiError::Io(e)
    }
}

impl From<JourneyError> for TuiError {
    fn from(e: JourneyError) -> Self {
        TuiError::Journey(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keystrokes edit the address bar (first stage only).
    Address,
    /// Keystrokes navigate the tour and drive the stage visualizers.
    Tour,
}

pub struct TuiState {
    pub journey: Journey,
    pub nav: NavState,
    pub mode: InputMode,
    pub address: AddressBar,
    pub companion: CompanionGuide,
    pub url_parser: UrlParserState,
    pub dns: DnsState,
    pub tcp: TcpState,
    pub tls: TlsState,
    pub http: HttpState,
    pub server: PipelineState,
    pub rendering: PipelineState,
    latency: Duration,
    /// Where the stage rail was last drawn, for mouse hit-testing.
    pub rail_area: Rect,
    pub needs_redraw: bool,
    should_quit: bool,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Result<Self, JourneyError> {
        let journey = content::journey();
        let mut nav = NavState::new(&journey)?;

        if config.start_stage > 0 {
            if nav.jump_to_stage(&journey, config.start_stage).is_err() {
                warn!(
                    "start_stage {} out of range (journey has {} stages), starting at 0",
                    config.start_stage,
                    journey.len()
                );
            }
        }
        let mode = if nav.stage() == 0 {
            InputMode::Address
        } else {
            InputMode::Tour
        };

        let address = AddressBar::new(config.start_url.clone());
        let initial_url = if config.start_url.is_some() {
            address.normalized_url()
        } else {
            FALLBACK_URL.to_string()
        };
        let host = host_of(&initial_url);

        let mut state = Self {
            nav,
            mode,
            url_parser: UrlParserState::new(&initial_url),
            dns: DnsState::new(&host),
            tcp: TcpState::new(),
            tls: TlsState::new(),
            http: HttpState::new(&host),
            server: server_pipeline(),
            rendering: rendering_pipeline(),
            companion: CompanionGuide::new(config.show_companion),
            address,
            journey,
            latency: Duration::from_millis(config.latency_ms),
            rail_area: Rect::default(),
            needs_redraw: true,
            should_quit: false,
        };
        state.sync_address_focus();
        Ok(state)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the main loop should redraw on a short cadence.
    pub fn animating(&self) -> bool {
        self.http.is_sending()
    }

    /// Transient message for the title bar, sourced from whichever stage
    /// visualizer is active.
    pub fn status_message(&self) -> String {
        let id = self
            .journey
            .stage(self.nav.stage())
            .map(|s| s.id.as_str())
            .unwrap_or_default();
        let status = match id {
            content::DNS_RESOLUTION if self.dns.resolved() => Some("Resolved to an IP"),
            content::TCP_HANDSHAKE => self.tcp.status(),
            content::TLS_HANDSHAKE => self.tls.status(),
            content::HTTP_REQUEST => self.http.status(),
            content::SERVER_PROCESSING => self.server.status(),
            content::BROWSER_RENDERING => self.rendering.status(),
            _ => None,
        };
        status.unwrap_or_default().to_string()
    }

    /// Advance time-driven pieces; called every loop iteration.
    pub fn tick(&mut self) {
        if self.http.poll(Instant::now(), self.latency) {
            self.needs_redraw = true;
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) {
        match event {
            TuiEvent::ForceQuit => {
                self.should_quit = true;
                return;
            }
            TuiEvent::Resize => {
                self.needs_redraw = true;
                return;
            }
            TuiEvent::MouseClick(column, row) => {
                if let Some(target) =
                    hit_test_stage(*column, *row, self.rail_area, self.journey.len())
                {
                    self.jump(target);
                }
                return;
            }
            _ => {}
        }

        if self.nav.stage() == 0 && self.mode == InputMode::Address {
            self.handle_address_event(event);
        } else {
            self.handle_tour_event(event);
        }
        self.sync_address_focus();
    }

    fn handle_address_event(&mut self, event: &TuiEvent) {
        if *event == TuiEvent::Escape {
            self.mode = InputMode::Tour;
            self.needs_redraw = true;
            return;
        }
        match self.address.handle_event(event) {
            Some(AddressEvent::Submit(url)) => self.submit_url(&url),
            Some(AddressEvent::ContentChanged) => self.needs_redraw = true,
            None => {}
        }
    }

    fn handle_tour_event(&mut self, event: &TuiEvent) {
        // The active visualizer gets first refusal.
        if self.dispatch_to_visualizer(event) {
            self.needs_redraw = true;
            return;
        }

        match event {
            TuiEvent::InputChar('q') if self.nav.stage() != 0 => self.should_quit = true,
            TuiEvent::CursorRight | TuiEvent::InputChar('n') | TuiEvent::Submit => {
                self.nav.advance(&self.journey);
                self.needs_redraw = true;
            }
            TuiEvent::CursorLeft | TuiEvent::InputChar('p') => {
                self.nav.retreat(&self.journey);
                self.needs_redraw = true;
            }
            TuiEvent::InputChar('c') => {
                self.companion.toggle();
                self.needs_redraw = true;
            }
            TuiEvent::InputChar(c) if c.is_ascii_digit() && *c != '0' => {
                self.jump(*c as usize - '1' as usize);
            }
            // On the first stage, typing anything else drops back into the
            // address bar, like clicking a browser's URL field.
            TuiEvent::InputChar(_) if self.nav.stage() == 0 => {
                self.mode = InputMode::Address;
                self.sync_address_focus();
                self.handle_address_event(event);
            }
            _ => {}
        }
    }

    /// Route an event to the visualizer for the current stage. Stage one has
    /// no visualizer; its address bar is handled by the modal dispatch.
    fn dispatch_to_visualizer(&mut self, event: &TuiEvent) -> bool {
        let id = self
            .journey
            .stage(self.nav.stage())
            .map(|s| s.id.as_str())
            .unwrap_or_default();
        match id {
            content::URL_PARSING => self.url_parser.handle_event(event),
            content::DNS_RESOLUTION => self.dns.handle_event(event),
            content::TCP_HANDSHAKE => self.tcp.handle_event(event),
            content::TLS_HANDSHAKE => self.tls.handle_event(event),
            content::HTTP_REQUEST => self.http.handle_event(event),
            content::SERVER_PROCESSING => self.server.handle_event(event),
            content::BROWSER_RENDERING => self.rendering.handle_event(event),
            _ => false,
        }
    }

    fn jump(&mut self, target: usize) {
        match self.nav.jump_to_stage(&self.journey, target) {
            Ok(()) => {
                self.mode = InputMode::Tour;
                self.sync_address_focus();
                self.needs_redraw = true;
            }
            Err(e) => debug!("Ignoring jump: {e}"),
        }
    }

    /// The submitted URL fans out to every visualizer that shows part of it,
    /// then the tour moves to URL parsing.
    fn submit_url(&mut self, url: &str) {
        info!("URL submitted: {url}");
        let host = host_of(url);
        self.url_parser.set_url(url);
        self.dns.set_domain(&host);
        self.http.set_host(&host);
        self.jump(1);
    }

    fn sync_address_focus(&mut self) {
        self.address.focused = self.nav.stage() == 0 && self.mode == InputMode::Address;
    }
}

/// Display host of a URL: scheme, path, query, fragment, and port stripped.
fn host_of(url: &str) -> String {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    let rest = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    match rest.rsplit_once(':') {
        Some((host, port))
            if !host.contains(':') && !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) =>
        {
            host.to_string()
        }
        _ => rest.to_string(),
    }
}

/// RAII guard for terminal modes: raw mode, alternate screen, and mouse
/// capture are restored on drop even when the loop exits via `?`.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Run the TUI until the user quits.
pub fn run(config: &ResolvedConfig) -> Result<(), TuiError> {
    let mut state = TuiState::new(config)?;

    let _guard = TerminalModeGuard::enable()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    info!("TUI started");

    while !state.should_quit() {
        if state.needs_redraw {
            terminal.draw(|frame| ui::draw_ui(frame, &mut state))?;
            state.needs_redraw = false;
        }
        let timeout = if state.animating() {
            ANIMATION_TICK
        } else {
            IDLE_TICK
        };
        if let Some(event) = event::poll_event_timeout(timeout) {
            state.handle_event(&event);
        }
        state.tick();
    }
    info!("TUI exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ResolvedConfig {
        ResolvedConfig {
            start_url: None,
            start_stage: 0,
            latency_ms: 0,
            show_companion: true,
        }
    }

    fn state() -> TuiState {
        TuiState::new(&test_config()).unwrap()
    }

    fn type_str(state: &mut TuiState, s: &str) {
        for c in s.chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn starts_in_address_mode_on_stage_zero() {
        let state = state();
        assert_eq!(state.nav.stage(), 0);
        assert_eq!(state.mode, InputMode::Address);
        assert!(state.address.focused);
    }

    #[test]
    fn submitting_a_url_starts_the_tour() {
        let mut state = state();
        type_str(&mut state, "google.com");
        state.handle_event(&TuiEvent::Submit);
        assert_eq!(state.nav.stage(), 1);
        assert_eq!(state.mode, InputMode::Tour);
        assert!(!state.address.focused);
    }

    #[test]
    fn empty_submit_stays_on_stage_zero() {
        let mut state = state();
        state.handle_event(&TuiEvent::Submit);
        assert_eq!(state.nav.stage(), 0);
        assert_eq!(state.mode, InputMode::Address);
    }

    #[test]
    fn escape_then_typing_returns_to_address_mode() {
        let mut state = state();
        state.handle_event(&TuiEvent::Escape);
        assert_eq!(state.mode, InputMode::Tour);
        state.handle_event(&TuiEvent::InputChar('g'));
        assert_eq!(state.mode, InputMode::Address);
        assert!(state.address.buffer.ends_with('g'));
    }

    #[test]
    fn q_quits_only_outside_stage_zero() {
        let mut state = state();
        state.handle_event(&TuiEvent::Escape);
        state.handle_event(&TuiEvent::InputChar('q'));
        // On stage 0 'q' re-entered address mode instead of quitting.
        assert!(!state.should_quit());
        assert_eq!(state.address.buffer, "q");

        let mut state = state2_at(3);
        state.handle_event(&TuiEvent::InputChar('q'));
        assert!(state.should_quit());
    }

    fn state2_at(stage: usize) -> TuiState {
        let mut s = state();
        s.handle_event(&TuiEvent::Escape);
        s.handle_event(&TuiEvent::InputChar(char::from_digit(stage as u32 + 1, 10).unwrap()));
        assert_eq!(s.nav.stage(), stage);
        s
    }

    #[test]
    fn digit_keys_jump_between_stages() {
        let mut state = state2_at(4);
        assert_eq!(state.nav.stage(), 4);
        // '9' is out of range for an 8-stage journey and is ignored.
        state.handle_event(&TuiEvent::InputChar('9'));
        assert_eq!(state.nav.stage(), 4);
    }

    #[test]
    fn arrows_and_enter_walk_the_dialogs() {
        let mut state = state2_at(2);
        let dialog = state.nav.dialog();
        state.handle_event(&TuiEvent::CursorRight);
        assert_eq!(state.nav.dialog(), dialog + 1);
        state.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(state.nav.dialog(), dialog);
    }

    #[test]
    fn visualizer_consumes_keys_before_global_bindings() {
        // On the DNS stage, ↓ moves the hop cursor, not the dialog.
        let mut state = state2_at(2);
        let dialog = state.nav.dialog();
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.nav.dialog(), dialog);
        assert!(!state.dns.resolved());
    }

    #[test]
    fn companion_toggle() {
        let mut state = state2_at(1);
        assert!(state.companion.visible);
        state.handle_event(&TuiEvent::InputChar('c'));
        assert!(!state.companion.visible);
    }

    #[test]
    fn mouse_click_on_rail_jumps() {
        let mut state = state2_at(1);
        state.rail_area = Rect::new(0, 28, 160, 2);
        state.handle_event(&TuiEvent::MouseClick(150, 28));
        assert_eq!(state.nav.stage(), 7);
        // Clicks outside the rail do nothing.
        state.handle_event(&TuiEvent::MouseClick(150, 5));
        assert_eq!(state.nav.stage(), 7);
    }

    #[test]
    fn submitted_url_reaches_the_visualizers() {
        let mut state = state();
        type_str(&mut state, "example.org/docs?page=2");
        state.handle_event(&TuiEvent::Submit);
        assert_eq!(state.status_message(), "");
        // DNS title carries the new domain after fan-out.
        assert_eq!(host_of("https://example.org/docs?page=2"), "example.org");
    }

    #[test]
    fn start_stage_config_skips_the_address_bar() {
        let config = ResolvedConfig {
            start_url: Some("example.com".to_string()),
            start_stage: 3,
            latency_ms: 0,
            show_companion: false,
        };
        let state = TuiState::new(&config).unwrap();
        assert_eq!(state.nav.stage(), 3);
        assert_eq!(state.mode, InputMode::Tour);
        assert!(!state.companion.visible);
    }

    #[test]
    fn out_of_range_start_stage_falls_back_to_zero() {
        let config = ResolvedConfig {
            start_url: None,
            start_stage: 42,
            latency_ms: 0,
            show_companion: true,
        };
        let state = TuiState::new(&config).unwrap();
        assert_eq!(state.nav.stage(), 0);
        assert_eq!(state.mode, InputMode::Address);
    }

    #[test]
    fn host_of_strips_scheme_path_and_port() {
        assert_eq!(host_of("https://example.com/a?b#c"), "example.com");
        assert_eq!(host_of("http://example.com:8080/x"), "example.com");
        assert_eq!(host_of("example.com"), "example.com");
    }
}
