//! # Core Tour Logic
//!
//! Wirewalk's domain logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Journey (content)    │
//!                    │  • NavState (cursor)    │
//!                    │  • StepCursor (inner)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                        ┌────────────┐
//!                        │    TUI     │
//!                        │  Adapter   │
//!                        │ (ratatui)  │
//!                        └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`journey`]: `Stage`/`Journey` content model and error taxonomy
//! - [`sequencer`]: the two-level navigation state machine and `StepCursor`
//! - [`content`]: the statically authored eight-stage tour
//! - [`config`]: `~/.wirewalk/config.toml` loading and resolution

pub mod config;
pub mod content;
pub mod journey;
pub mod sequencer;
