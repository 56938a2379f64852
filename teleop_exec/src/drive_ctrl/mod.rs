//! Drive control module
//!
//! Converts the operator's analog axes into commands for the three motor holonomic drivetrain:
//! a left and right drive wheel plus an omni wheel at the back.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_holonomic;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::gamepad::AxisState;
use serde::Serialize;

// Internal
pub use calc_holonomic::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of drive motors.
pub const NUM_DRV_MOTORS: usize = 3;

/// Default deadband applied to each analog axis.
pub const DEFAULT_DEADBAND: f64 = 0.05;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Demanded motion of the platform, each component nominally in [-1.0, 1.0].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DriveInputs {
    /// Positive forwards.
    pub forward: f64,

    /// Sideways demand, carried entirely by the back wheel.
    pub strafe: f64,

    /// Positive rotation drives the right wheel forwards and the left wheel backwards.
    pub rotation: f64,
}

/// Per-wheel motor commands, each in [-1.0, 1.0].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct WheelCommands {
    pub left: f64,
    pub right: f64,
    pub back: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveInputs {
    /// Inputs for a drivetrain without strafing, the strafe component is fixed at zero.
    pub fn two_axis(forward: f64, rotation: f64) -> Self {
        Self {
            forward,
            strafe: 0.0,
            rotation,
        }
    }

    /// Map the gamepad sticks onto the drive inputs.
    ///
    /// The left stick translates (pushing it away from the operator reads as a negative `left_y`
    /// so it is inverted), the right stick's X axis rotates.
    pub fn from_axes(axes: &AxisState) -> Self {
        Self {
            forward: -axes.left_y,
            strafe: axes.left_x,
            rotation: axes.right_x,
        }
    }
}

impl WheelCommands {
    /// All motors stopped.
    pub fn stop() -> Self {
        Self::default()
    }

    pub fn as_array(&self) -> [f64; NUM_DRV_MOTORS] {
        [self.left, self.right, self.back]
    }
}
