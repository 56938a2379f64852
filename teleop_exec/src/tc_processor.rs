//! # Telecommand processor module
//!
//! The telecommand processor handles various TCs coming from any source.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace, warn};

// Internal
use comms_if::tc::Tc;
use crate::data_store::{DataStore, SafeModeCause};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore to send commands to different modules.
pub fn exec(ds: &mut DataStore, tc: &Tc) {

    // Handle different Tcs
    match tc {
        Tc::Enable => {
            debug!("Recieved Enable command");
            if ds.make_unsafe(SafeModeCause::DisableTc).is_err() {
                warn!(
                    "Enable rejected, safe mode was entered for a different cause ({:?})",
                    ds.safe_cause
                );
            }
        },
        Tc::Disable => {
            debug!("Recieved Disable command");
            ds.make_safe(SafeModeCause::DisableTc);
        },
        Tc::Gamepad(s) => {
            trace!("Recieved gamepad sample: {:?}", s);
            ds.gamepad = *s;
        }
    }

}
