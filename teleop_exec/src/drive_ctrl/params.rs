//! Parameters structure for DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::DEFAULT_DEADBAND;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Drive control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Any axis with an absolute value below this is treated as exactly zero.
    ///
    /// Units: normalised
    pub deadband: f64,

    /// Square each axis (preserving sign) after the deadband, giving finer control near the
    /// centre of the sticks while still allowing full output.
    pub square_inputs: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            deadband: DEFAULT_DEADBAND,
            square_inputs: false,
        }
    }
}
