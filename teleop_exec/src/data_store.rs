//! # Data Store

use comms_if::eqpt::{gamepad::GamepadSample, mech::MechDems};
use log::{info, warn};

use crate::ctrl_loop;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of consecutive cycle overruns which is reported as an error.
pub const MAX_CONSEC_CYCLE_OVERRUNS: u64 = 50;

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Gives the reason the platform has been put into safe mode
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SafeModeCause {
    DisableTc,
    DriverError,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
///
/// Safe mode and the control loop mode are kept in step: entering safe mode stops the control
/// loop, leaving it starts the loop running.
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    // Safe mode variables
    /// Determines if the platform is in safe mode.
    pub safe: bool,

    /// Gives the reason for the platform being in safe mode.
    pub safe_cause: Option<SafeModeCause>,

    // Input
    /// The held gamepad sample, replaced whenever a new sample arrives.
    pub gamepad: GamepadSample,

    // Control loop
    pub ctrl_loop: ctrl_loop::ControlLoop,
    pub ctrl_loop_output: MechDems,
    pub ctrl_loop_status_rpt: ctrl_loop::StatusReport,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    /// Number of consecutive driver errors
    pub num_consec_driver_errors: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl Default for DataStore {
    /// The store starts in safe mode, so nothing moves until enabled.
    fn default() -> Self {
        Self {
            num_cycles: 0,
            safe: true,
            safe_cause: Some(SafeModeCause::DisableTc),
            gamepad: GamepadSample::default(),
            ctrl_loop: ctrl_loop::ControlLoop::default(),
            ctrl_loop_output: MechDems::default(),
            ctrl_loop_status_rpt: ctrl_loop::StatusReport::default(),
            num_consec_cycle_overruns: 0,
            num_consec_driver_errors: 0,
        }
    }
}

impl DataStore {
    /// Create a new store around an already initialised control loop.
    pub fn new(ctrl_loop: ctrl_loop::ControlLoop) -> Self {
        Self {
            ctrl_loop,
            ..Self::default()
        }
    }

    /// Puts the platform into safe mode with the given cause.
    pub fn make_safe(&mut self, cause: SafeModeCause) {
        if !self.safe {
            warn!("Make safe requested, cause: {:?}", cause);
            self.safe = true;
            self.safe_cause = Some(cause);
        }

        self.ctrl_loop_output = self.ctrl_loop.disable();
    }

    /// Attempts to disable the safe mode by clearing the given cause.
    ///
    /// Returns `Ok(())` if this cause was cleared and safe mode was disabled, or `Err(())`
    /// otherwise. To remove safe mode the provided cause must match the initial reason for safe
    /// mode being enabled.
    ///
    /// If safe mode was not enabled `Ok(())` is returned
    pub fn make_unsafe(&mut self, cause: SafeModeCause) -> Result<(), ()> {
        if !self.safe {
            return Ok(());
        }

        match self.safe_cause {
            Some(root_cause) if cause != root_cause => Err(()),
            _ => {
                self.safe = false;
                self.safe_cause = None;
                info!("Make unsafe requested, root cause match, safe mode disabled");
                self.ctrl_loop.enable();
                Ok(())
            }
        }
    }

    /// Perform actions required at the start of a cycle.
    pub fn cycle_start(&mut self) {
        self.ctrl_loop_status_rpt = ctrl_loop::StatusReport::default();
    }

    /// Record a cycle which completed within its period.
    pub fn cycle_on_time(&mut self) {
        self.num_consec_cycle_overruns = 0;
    }

    /// Record a cycle overrun.
    ///
    /// Returns true when the number of consecutive overruns reaches `MAX_CONSEC_CYCLE_OVERRUNS`,
    /// once per run of overruns.
    pub fn cycle_overran(&mut self) -> bool {
        self.num_consec_cycle_overruns += 1;
        self.num_consec_cycle_overruns == MAX_CONSEC_CYCLE_OVERRUNS
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }
}
