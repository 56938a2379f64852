//! # Edge detection module
//!
//! Turns held buttons into single "pressed this cycle" events.
//!
//! The detector owns one bit of memory per button, the [`EdgeSnapshot`], holding the state of
//! each button as committed at the end of the previous cycle. Queries never modify the snapshot
//! so that every query within a cycle sees the same previous state.
//!
//! # Invariant
//!
//! `commit` must be called exactly once per cycle, after all `rising_edge` queries for that cycle.
//! Skipping the commit or committing twice desynchronises the detector from the input.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::gamepad::{ButtonId, ButtonState};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The "was pressed last cycle" state of every button. All false before the first cycle.
pub type EdgeSnapshot = ButtonState;

/// Rising edge detector.
#[derive(Debug, Default, Clone)]
pub struct EdgeDetector {
    snapshot: EdgeSnapshot,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if and only if the button is pressed now and was not pressed in the
    /// committed snapshot.
    pub fn rising_edge(&self, id: ButtonId, current: bool) -> bool {
        current && !self.snapshot.is_pressed(id)
    }

    /// All buttons with a rising edge in the given state, in `ButtonId::ALL` order.
    pub fn rising_edges(&self, current: &ButtonState) -> Vec<ButtonId> {
        current
            .iter_pressed()
            .filter(|id| self.rising_edge(*id, true))
            .collect()
    }

    /// Store the given state as the snapshot for the next cycle.
    pub fn commit(&mut self, current: &ButtonState) {
        self.snapshot = *current;
    }

    /// The currently committed snapshot.
    pub fn snapshot(&self) -> &EdgeSnapshot {
        &self.snapshot
    }
}
