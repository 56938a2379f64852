//! Parameters structure for ActCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::mech::ActId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for a single bounded actuator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorParams {
    /// Position of the actuator at system start.
    ///
    /// Units: normalised, [0.0, 1.0]
    pub initial_pos: f64,

    /// Amount by which a single nudge moves the actuator.
    ///
    /// Units: normalised, > 0.0
    pub increment: f64,

    /// Named fixed positions. `min` and `max` are always available and need not be listed.
    #[serde(default)]
    pub presets: BTreeMap<String, f64>,
}

/// Parameters for Actuator control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub arm: ActuatorParams,
    pub gripper: ActuatorParams,
    pub gripper_tilt: ActuatorParams,
    pub extender: ActuatorParams,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Get the parameters for the given actuator, or `None` if it is not a bounded actuator.
    pub fn get(&self, id: ActId) -> Option<&ActuatorParams> {
        match id {
            ActId::Arm => Some(&self.arm),
            ActId::Gripper => Some(&self.gripper),
            ActId::GripperTilt => Some(&self.gripper_tilt),
            ActId::Extender => Some(&self.extender),
            _ => None,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Params {
            arm: ActuatorParams {
                initial_pos: 0.5,
                increment: 0.05,
                presets: presets(&[(PRESET_MIDDLE, 0.5)]),
            },
            gripper: ActuatorParams {
                initial_pos: 0.0,
                increment: 0.10,
                presets: presets(&[(PRESET_OPEN, 0.0), (PRESET_CLOSED, 1.0)]),
            },
            gripper_tilt: ActuatorParams {
                initial_pos: 0.5,
                increment: 0.05,
                presets: presets(&[(PRESET_UP, 0.0), (PRESET_MIDDLE, 0.5), (PRESET_DOWN, 1.0)]),
            },
            extender: ActuatorParams {
                initial_pos: 0.0,
                increment: 0.10,
                presets: presets(&[
                    (PRESET_RETRACTED, 0.0),
                    (PRESET_EXTENDED, 1.0),
                    (PRESET_MIDDLE, 0.5),
                ]),
            },
        }
    }
}

fn presets(table: &[(&str, f64)]) -> BTreeMap<String, f64> {
    table
        .iter()
        .map(|(name, pos)| (name.to_string(), *pos))
        .collect()
}
