//! Actuator control module
//!
//! Each manipulator servo (arm, gripper, gripper tilt, extender) is modelled as a
//! [`BoundedActuator`], a normalised position in [0.0, 1.0] that can be nudged by a fixed
//! increment or sent to a named preset. Requests beyond the range are clamped, never rejected.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod actuator;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::mech::ActId;

// Internal
pub use actuator::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of bounded actuators controlled by this module.
pub const NUM_ACTS: usize = 4;

/// Lowest normalised actuator position.
pub const POS_MIN: f64 = 0.0;

/// Highest normalised actuator position.
pub const POS_MAX: f64 = 1.0;

/// Positions this close to a limit or preset count as being at it, so that accumulated nudges
/// (ten 0.1 steps sum to 0.9999999999999999) still satisfy the limit queries.
pub const POS_TOLERANCE: f64 = 1e-9;

/// Gripper positions below this are reported as open.
pub const GRIPPER_OPEN_THRESHOLD: f64 = 0.5;

/// Preset names. Every actuator has `min` and `max`, the others are declared in the parameters.
pub const PRESET_MIN: &str = "min";
pub const PRESET_MAX: &str = "max";
pub const PRESET_MIDDLE: &str = "middle";
pub const PRESET_OPEN: &str = "open";
pub const PRESET_CLOSED: &str = "closed";
pub const PRESET_UP: &str = "up";
pub const PRESET_DOWN: &str = "down";
pub const PRESET_RETRACTED: &str = "retracted";
pub const PRESET_EXTENDED: &str = "extended";

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during ActCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum ActCtrlError {
    #[error("{0:?} has no preset named \"{1}\"")]
    InvalidPreset(ActId, String),

    #[error("Invalid parameters for {0:?}: {1}")]
    InvalidParams(ActId, String),

    #[error("{0:?} is not a bounded actuator")]
    NotABoundedActuator(ActId),

    #[error("ActCtrl has not been initialised")]
    NotInitialised,

    #[error("Could not load the ActCtrl parameters: {0}")]
    ParamLoad(#[from] util::params::LoadError),
}

/// Outcome of a successful actuator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActResult {
    /// The actuator reached the requested position.
    Moved,

    /// The request was outside [0.0, 1.0] and the position saturated at the limit.
    Clamped,
}

/// An operation which can be applied to a bounded actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActOp {
    NudgeUp,
    NudgeDown,
    GotoPreset(&'static str),
}
