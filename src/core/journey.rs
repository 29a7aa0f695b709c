//! # Journey Content Model
//!
//! A `Journey` is an ordered list of `Stage`s; each stage owns an ordered
//! list of companion dialog lines (markdown strings). Both are immutable
//! after construction — the tour content is authored once at startup and the
//! navigation state in [`crate::core::sequencer`] only ever holds indices
//! into it.

use std::fmt;

/// One stop on the tour: an identifier, a display title, and the companion
/// dialog lines shown for it.
#[derive(Debug, Clone)]
pub struct Stage {
    pub id: String,
    pub title: String,
    pub dialogs: Vec<String>,
}

impl Stage {
    pub fn new(id: &str, title: &str, dialogs: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            dialogs: dialogs.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// The full ordered tour. Construction does not validate — validation
/// happens when a `NavState` is initialized over it, so malformed content
/// fails loudly at startup rather than mid-tour.
#[derive(Debug, Clone)]
pub struct Journey {
    stages: Vec<Stage>,
}

impl Journey {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

/// Caller-input errors for journey navigation.
///
/// Both variants are configuration/programming errors, not runtime failures:
/// content is statically authored, and the UI only offers in-range jump
/// targets. `advance`/`retreat` never fail — boundary conditions are no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyError {
    /// The journey is empty, or a stage has zero dialog lines.
    InvalidJourney(String),
    /// A stage jump target outside `[0, journey.len())`.
    IndexOutOfRange { target: usize, len: usize },
}

impl fmt::Display for JourneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JourneyError::InvalidJourney(reason) => write!(f, "invalid journey: {reason}"),
            JourneyError::IndexOutOfRange { target, len } => {
                write!(f, "stage index {target} out of range (journey has {len} stages)")
            }
        }
    }
}

impl std::error::Error for JourneyError {}
