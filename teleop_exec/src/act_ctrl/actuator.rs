//! Bounded actuator model

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::mech::ActId;
use serde::Serialize;
use std::collections::BTreeMap;
use util::maths::clamp;

// Internal
use super::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A clamped scalar position shared by all manipulator servos.
///
/// The position is the only state: every boolean query (open, fully extended, ...) is computed
/// from it at read time.
#[derive(Debug, Clone, Serialize)]
pub struct BoundedActuator {
    id: ActId,

    /// Current demanded position, always within [POS_MIN, POS_MAX].
    position: f64,

    increment: f64,

    presets: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl BoundedActuator {
    /// Create a new actuator from its parameters.
    ///
    /// The parameters are validated here so that presets never need clamping later.
    pub fn new(id: ActId, params: &ActuatorParams) -> Result<Self, ActCtrlError> {
        let in_range = |v: f64| (POS_MIN..=POS_MAX).contains(&v);

        if !in_range(params.initial_pos) {
            return Err(ActCtrlError::InvalidParams(
                id,
                format!("initial position {} is outside [0, 1]", params.initial_pos),
            ));
        }

        if !(params.increment > 0.0 && params.increment.is_finite()) {
            return Err(ActCtrlError::InvalidParams(
                id,
                format!("increment must be positive, found {}", params.increment),
            ));
        }

        let mut presets = BTreeMap::new();
        presets.insert(PRESET_MIN.to_string(), POS_MIN);
        presets.insert(PRESET_MAX.to_string(), POS_MAX);

        for (name, pos) in params.presets.iter() {
            if name.is_empty() {
                return Err(ActCtrlError::InvalidParams(
                    id,
                    String::from("preset names must not be empty"),
                ));
            }
            if !in_range(*pos) {
                return Err(ActCtrlError::InvalidParams(
                    id,
                    format!("preset \"{}\" at {} is outside [0, 1]", name, pos),
                ));
            }
            presets.insert(name.clone(), *pos);
        }

        Ok(Self {
            id,
            position: params.initial_pos,
            increment: params.increment,
            presets,
        })
    }

    /// The actuator this model drives.
    pub fn id(&self) -> ActId {
        self.id
    }

    /// Current position, in [0.0, 1.0].
    pub fn current(&self) -> f64 {
        self.position
    }

    /// Position of the named preset, if it exists.
    pub fn preset(&self, name: &str) -> Option<f64> {
        self.presets.get(name).copied()
    }

    /// Move up by one increment, saturating at `POS_MAX`.
    ///
    /// At the ceiling this is a fixed point which returns `ActResult::Clamped`.
    pub fn nudge_up(&mut self) -> ActResult {
        self.set_clamped(self.position + self.increment)
    }

    /// Move down by one increment, saturating at `POS_MIN`.
    pub fn nudge_down(&mut self) -> ActResult {
        self.set_clamped(self.position - self.increment)
    }

    /// Jump to the named preset regardless of the current position.
    pub fn goto_preset(&mut self, name: &str) -> Result<ActResult, ActCtrlError> {
        match self.presets.get(name) {
            Some(pos) => {
                self.position = *pos;
                Ok(ActResult::Moved)
            }
            None => Err(ActCtrlError::InvalidPreset(self.id, name.to_string())),
        }
    }

    /// Apply an operation to the actuator.
    pub fn apply(&mut self, op: ActOp) -> Result<ActResult, ActCtrlError> {
        match op {
            ActOp::NudgeUp => Ok(self.nudge_up()),
            ActOp::NudgeDown => Ok(self.nudge_down()),
            ActOp::GotoPreset(name) => self.goto_preset(name),
        }
    }

    /// True when within `POS_TOLERANCE` of the lower limit.
    pub fn is_at_min(&self) -> bool {
        self.position <= POS_MIN + POS_TOLERANCE
    }

    /// True when within `POS_TOLERANCE` of the upper limit.
    pub fn is_at_max(&self) -> bool {
        self.position >= POS_MAX - POS_TOLERANCE
    }

    /// Gripper query: open while below the half-way point.
    pub fn is_open(&self) -> bool {
        self.position < GRIPPER_OPEN_THRESHOLD
    }

    /// Extender query: at or below the retracted preset (`min` if not declared).
    pub fn is_fully_retracted(&self) -> bool {
        let limit = self.preset(PRESET_RETRACTED).unwrap_or(POS_MIN);
        self.position <= limit + POS_TOLERANCE
    }

    /// Extender query: at or above the extended preset (`max` if not declared).
    pub fn is_fully_extended(&self) -> bool {
        let limit = self.preset(PRESET_EXTENDED).unwrap_or(POS_MAX);
        self.position >= limit - POS_TOLERANCE
    }

    fn set_clamped(&mut self, target: f64) -> ActResult {
        let pos = clamp(&target, &POS_MIN, &POS_MAX);
        self.position = pos;

        if pos == target {
            ActResult::Moved
        } else {
            ActResult::Clamped
        }
    }
}
