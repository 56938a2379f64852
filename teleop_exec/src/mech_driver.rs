//! # Mechanisms Driver
//!
//! Abstraction over whatever sits between the control loop and the physical actuators.
//!
//! The executable uses [`LogDriver`], which checks and logs the demands and keeps the last set
//! sent, in place of the hardware.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::mech::{ActId, MechDems};
use log::{debug, trace};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for sending demands to the actuators.
pub trait MechDriver {
    /// Send a full set of demands to the actuators.
    ///
    /// Demands which are missing or out of range are rejected and nothing is sent.
    fn send_demands(&mut self, dems: &MechDems) -> Result<(), MechDriverError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Driver which logs the demands instead of actuating anything.
#[derive(Default)]
pub struct LogDriver {
    last_dems: Option<MechDems>,

    num_sent: u64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MechDriverError {
    #[error("No demand was given for {0:?}")]
    MissingDemand(ActId),

    #[error("Demand of {1} for {0:?} is outside the valid range")]
    DemandOutOfRange(ActId, f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MechDriver for LogDriver {
    fn send_demands(&mut self, dems: &MechDems) -> Result<(), MechDriverError> {
        validate(dems)?;

        // Only log at debug level when the demands actually change
        if self.last_dems.as_ref() != Some(dems) {
            debug!("Demands changed: {:?}", dems);
        }
        else {
            trace!("Demands: {:?}", dems);
        }

        self.last_dems = Some(dems.clone());
        self.num_sent += 1;

        Ok(())
    }
}

impl LogDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last demands that were accepted by the driver.
    pub fn last_dems(&self) -> Option<&MechDems> {
        self.last_dems.as_ref()
    }

    /// Number of demand sets accepted so far.
    pub fn num_sent(&self) -> u64 {
        self.num_sent
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Check every actuator has a demand within its range.
///
/// Servo positions must be in `[0, 1]` and drive speeds in `[-1, 1]`.
fn validate(dems: &MechDems) -> Result<(), MechDriverError> {
    for id in ActId::servo_ids().iter() {
        match dems.pos_norm.get(id) {
            Some(p) if (0.0..=1.0).contains(p) => (),
            Some(p) => return Err(MechDriverError::DemandOutOfRange(*id, *p)),
            None => return Err(MechDriverError::MissingDemand(*id)),
        }
    }

    for id in ActId::drive_ids().iter() {
        match dems.speed_norm.get(id) {
            Some(s) if (-1.0..=1.0).contains(s) => (),
            Some(s) => return Err(MechDriverError::DemandOutOfRange(*id, *s)),
            None => return Err(MechDriverError::MissingDemand(*id)),
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn servo_positions(p: f64) -> HashMap<ActId, f64> {
        ActId::servo_ids().iter().map(|id| (*id, p)).collect()
    }

    #[test]
    fn test_log_driver() {
        let mut driver = LogDriver::new();
        assert!(driver.last_dems().is_none());

        let dems = MechDems::stop(servo_positions(0.5));
        driver.send_demands(&dems).unwrap();
        driver.send_demands(&dems).unwrap();

        assert_eq!(driver.last_dems(), Some(&dems));
        assert_eq!(driver.num_sent(), 2);
    }

    #[test]
    fn test_rejects_bad_demands() {
        let mut driver = LogDriver::new();

        // No servo positions
        assert_eq!(
            driver.send_demands(&MechDems::default()),
            Err(MechDriverError::MissingDemand(ActId::Arm))
        );

        let mut dems = MechDems::stop(servo_positions(0.5));
        dems.speed_norm.insert(ActId::DrvBack, 1.5);
        assert_eq!(
            driver.send_demands(&dems),
            Err(MechDriverError::DemandOutOfRange(ActId::DrvBack, 1.5))
        );

        let dems = MechDems::stop(servo_positions(-0.1));
        assert!(driver.send_demands(&dems).is_err());

        assert!(driver.last_dems().is_none());
        assert_eq!(driver.num_sent(), 0);
    }
}
