//! # wirewalk
//!
//! An interactive terminal walkthrough of what happens when you type a URL:
//! eight stages from the address bar to pixels on screen, each with its own
//! visualizer and a companion guide narrating along the way.
//!
//! - [`core`] — pure navigation state, journey content, and configuration.
//!   No terminal, no I/O (config file loading aside).
//! - [`tui`] — ratatui rendering, crossterm input, and the event loop.

pub mod core;
pub mod tui;
