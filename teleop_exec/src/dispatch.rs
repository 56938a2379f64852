//! # Button dispatch module
//!
//! Static mapping from a rising-edge button to the actuator operation it triggers.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::{gamepad::ButtonId, mech::ActId};

use crate::act_ctrl::{ActOp, PRESET_EXTENDED, PRESET_RETRACTED};

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

/// The dispatch table. Each row fires once per rising edge of its button, independently of the
/// other rows.
pub static DISPATCH_TABLE: [(ButtonId, ActId, ActOp); 10] = [
    (ButtonId::LeftBumper, ActId::Arm, ActOp::NudgeDown),
    (ButtonId::RightBumper, ActId::Arm, ActOp::NudgeUp),
    (ButtonId::X, ActId::Gripper, ActOp::NudgeDown),
    (ButtonId::Y, ActId::Gripper, ActOp::NudgeUp),
    (ButtonId::LeftStickButton, ActId::GripperTilt, ActOp::NudgeDown),
    (ButtonId::RightStickButton, ActId::GripperTilt, ActOp::NudgeUp),
    (ButtonId::Start, ActId::Extender, ActOp::NudgeUp),
    (ButtonId::Back, ActId::Extender, ActOp::NudgeDown),
    (ButtonId::A, ActId::Extender, ActOp::GotoPreset(PRESET_EXTENDED)),
    (ButtonId::B, ActId::Extender, ActOp::GotoPreset(PRESET_RETRACTED)),
];

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the operations triggered by the given rising edges.
///
/// Every row of the table is evaluated exactly once, so all simultaneous edges fire.
pub fn dispatch(edges: &[ButtonId]) -> Vec<(ActId, ActOp)> {
    DISPATCH_TABLE
        .iter()
        .filter(|(button, _, _)| edges.contains(button))
        .map(|(_, act, op)| (*act, *op))
        .collect()
}
