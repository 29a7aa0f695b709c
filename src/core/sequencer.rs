//! # Step Sequencing
//!
//! The navigation core of the tour: a cursor over a two-level ordered
//! structure (stage → dialog-within-stage). `NavState` is the only mutable
//! entity in the core; it is created at startup, mutated exclusively by the
//! operations below, and dropped when the TUI exits. No I/O, no timers, no
//! randomness; every operation is a pure function of the state and the
//! immutable [`Journey`].
//!
//! ```text
//! stage 0: [d0]          advance: dialog++, else stage++/dialog=0, else no-op
//! stage 1: [d0 d1 d2]    retreat: dialog--, else stage--/dialog=last, else no-op
//! stage 2: [d0 d1]       jump(n): (n, 0) unconditionally
//! ```
//!
//! Retreating across a stage boundary lands on the *last* dialog of the
//! previous stage — a tour reads like a book you can flip backward through,
//! so `retreat(advance(s))` is an identity even when a boundary was crossed.

use crate::core::journey::{Journey, JourneyError};

/// Cursor position within a journey. Both indices are always in bounds for
/// the journey the state was initialized over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    stage: usize,
    dialog: usize,
}

impl NavState {
    /// Initialize at `(0, 0)`.
    ///
    /// Fails with [`JourneyError::InvalidJourney`] if the journey is empty
    /// or any stage has no dialog lines. The surrounding application treats
    /// this as a fatal configuration error: content is statically authored
    /// and should never be malformed at run time.
    pub fn new(journey: &Journey) -> Result<Self, JourneyError> {
        if journey.is_empty() {
            return Err(JourneyError::InvalidJourney(
                "journey has no stages".to_string(),
            ));
        }
        for stage in journey.stages() {
            if stage.dialogs.is_empty() {
                return Err(JourneyError::InvalidJourney(format!(
                    "stage '{}' has no dialog lines",
                    stage.id
                )));
            }
        }
        Ok(Self { stage: 0, dialog: 0 })
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn dialog(&self) -> usize {
        self.dialog
    }

    /// True unless positioned on the last dialog of the last stage.
    pub fn can_advance(&self, journey: &Journey) -> bool {
        let dialogs = self.dialog_count(journey);
        self.dialog + 1 < dialogs || self.stage + 1 < journey.len()
    }

    /// True unless positioned at `(0, 0)`.
    pub fn can_retreat(&self) -> bool {
        self.dialog > 0 || self.stage > 0
    }

    /// Move forward one dialog line, rolling over to the next stage at the
    /// end of the current one. A no-op at the very end of the journey;
    /// callers check [`NavState::can_advance`] to distinguish "finished"
    /// from movement; the terminal position is not an error.
    pub fn advance(&mut self, journey: &Journey) {
        let dialogs = self.dialog_count(journey);
        if self.dialog + 1 < dialogs {
            self.dialog += 1;
        } else if self.stage + 1 < journey.len() {
            self.stage += 1;
            self.dialog = 0;
        }
    }

    /// Move back one dialog line. Crossing a stage boundary lands on the
    /// last dialog of the previous stage. A no-op at `(0, 0)`.
    pub fn retreat(&mut self, journey: &Journey) {
        if self.dialog > 0 {
            self.dialog -= 1;
        } else if self.stage > 0 {
            self.stage -= 1;
            self.dialog = self.dialog_count(journey).saturating_sub(1);
        }
    }

    /// Jump directly to a stage, resetting the dialog cursor to its first
    /// line — even when `target` is the current stage. Rejects out-of-range
    /// targets without mutating the state.
    pub fn jump_to_stage(&mut self, journey: &Journey, target: usize) -> Result<(), JourneyError> {
        if target >= journey.len() {
            return Err(JourneyError::IndexOutOfRange {
                target,
                len: journey.len(),
            });
        }
        self.stage = target;
        self.dialog = 0;
        Ok(())
    }

    fn dialog_count(&self, journey: &Journey) -> usize {
        journey
            .stage(self.stage)
            .map(|s| s.dialogs.len())
            .unwrap_or(0)
    }
}

/// Single-level cursor over a fixed-size sequence, the shape every
/// sub-visualizer (DNS hops, pipeline steps, URL parts) instantiates over
/// its own content array. Structurally the inner half of [`NavState`], but
/// each instance is independent and never shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCursor {
    step: usize,
    total: usize,
}

impl StepCursor {
    /// `total` is the length of the content array; a cursor over an empty
    /// sequence pins to step 0 and never moves.
    pub fn new(total: usize) -> Self {
        Self { step: 0, total }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn at_start(&self) -> bool {
        self.step == 0
    }

    pub fn at_end(&self) -> bool {
        self.total == 0 || self.step + 1 == self.total
    }

    /// Returns true if the cursor moved.
    pub fn advance(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.step += 1;
        true
    }

    /// Returns true if the cursor moved.
    pub fn retreat(&mut self) -> bool {
        if self.at_start() {
            return false;
        }
        self.step -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    /// Completion in `[0.0, 1.0]` for progress gauges.
    pub fn ratio(&self) -> f64 {
        if self.total <= 1 {
            return 1.0;
        }
        self.step as f64 / (self.total - 1) as f64
    }
}
