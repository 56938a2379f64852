//! # Mechanisms Equipment Demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const SERVO_IDS: [ActId; 4] = [
    ActId::Arm,
    ActId::Gripper,
    ActId::GripperTilt,
    ActId::Extender,
];

const DRIVE_IDS: [ActId; 3] = [ActId::DrvLeft, ActId::DrvRight, ActId::DrvBack];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands that are sent to the actuator and motor drivers every cycle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MechDems {
    /// The demanded normalised position of a position servo, in [0.0, 1.0].
    pub pos_norm: HashMap<ActId, f64>,

    /// The demanded normalised speed of a drive motor, in [-1.0, 1.0].
    pub speed_norm: HashMap<ActId, f64>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// IDs of all actuators on the platform
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum ActId {
    Arm,
    Gripper,
    GripperTilt,
    Extender,
    DrvLeft,
    DrvRight,
    DrvBack,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl ActId {
    /// IDs of the position-controlled manipulator servos.
    pub fn servo_ids() -> &'static [ActId; 4] {
        &SERVO_IDS
    }

    /// IDs of the drivetrain motors.
    pub fn drive_ids() -> &'static [ActId; 3] {
        &DRIVE_IDS
    }
}

impl MechDems {
    /// Demands which stop all drive motors while holding the given servo positions.
    pub fn stop(pos_norm: HashMap<ActId, f64>) -> Self {
        Self {
            pos_norm,
            ..Self::default()
        }
    }

    /// Returns true if every drive motor demand is zero.
    pub fn is_stopped(&self) -> bool {
        self.speed_norm.values().all(|s| *s == 0.0)
    }
}

impl Default for MechDems {
    fn default() -> Self {
        let mut speed_norm = HashMap::new();

        for id in DRIVE_IDS.iter() {
            speed_norm.insert(*id, 0.0);
        }

        Self {
            pos_norm: HashMap::new(),
            speed_norm,
        }
    }
}
