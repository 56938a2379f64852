//! Control loop module
//!
//! The per-cycle orchestrator. Each cycle the loop takes one gamepad sample and:
//!
//! - detects rising button edges against the previous cycle's snapshot,
//! - commits the snapshot for the next cycle,
//! - dispatches the edges to the bounded actuators,
//! - computes the drivetrain wheel commands,
//! - emits the demands for every actuator and motor.
//!
//! The loop is either running or stopped. While stopped it emits a stop to all motors, holds the
//! servo positions, and dispatches nothing.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use state::*;

use crate::act_ctrl::ActCtrlError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Operating mode of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Mode {
    Running,
    Stopped,
}

/// Possible errors that can occur during ControlLoop operation.
#[derive(Debug, thiserror::Error)]
pub enum CtrlLoopError {
    #[error("ActCtrl error: {0}")]
    ActCtrl(#[from] ActCtrlError),

    #[error("Could not load parameters: {0}")]
    ParamLoad(#[from] util::params::LoadError),
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Stopped
    }
}
