//! Implementations for the ActCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::mech::ActId;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashMap;

// Internal
use super::*;
use util::{module::State, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Actuator control module state
#[derive(Default)]
pub struct ActCtrl {
    pub(crate) report: StatusReport,

    acts: HashMap<ActId, BoundedActuator>,
}

/// Input data to Actuator Control.
#[derive(Default, Debug)]
pub struct InputData {
    /// The operations to apply on this cycle, in order.
    pub ops: Vec<(ActId, ActOp)>,
}

/// Status report for ActCtrl processing.
///
/// Arrays are indexed in the order of `ActId::servo_ids()`.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// An operation on this actuator saturated at a limit.
    pub pos_limited: [bool; NUM_ACTS],

    /// An operation on this actuator was rejected (unknown preset).
    pub op_rejected: [bool; NUM_ACTS],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for ActCtrl {
    type InitData = &'static str;
    type InitError = ActCtrlError;

    type InputData = InputData;
    type OutputData = HashMap<ActId, f64>;
    type StatusReport = StatusReport;
    type ProcError = ActCtrlError;

    /// Initialise the ActCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        let params: Params = util::params::load(init_data)?;

        *self = Self::new(params)?;

        Ok(())
    }

    /// Apply this cycle's operations and output the position of every actuator.
    ///
    /// A rejected operation does not stop the others from being applied, it is warned about and
    /// flagged in the status report.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        if self.acts.is_empty() {
            return Err(ActCtrlError::NotInitialised);
        }

        // Clear the status report
        self.report = StatusReport::default();

        for (id, op) in input_data.ops.iter() {
            match self.apply(*id, *op) {
                Ok(_) => (),
                Err(e) => warn!("ActCtrl operation {:?} rejected: {}", op, e)
            }
        }

        Ok((self.positions(), self.report))
    }
}

impl ActCtrl {
    /// Create a new ActCtrl with all actuators at their initial positions.
    pub fn new(params: Params) -> Result<Self, ActCtrlError> {
        let mut acts = HashMap::new();

        for id in ActId::servo_ids().iter() {
            let act_params = params.get(*id)
                .ok_or(ActCtrlError::NotABoundedActuator(*id))?;

            let act = BoundedActuator::new(*id, act_params)?;
            info!("{:?} initialised to position {:.2}", id, act.current());

            acts.insert(*id, act);
        }

        Ok(Self {
            report: StatusReport::default(),
            acts,
        })
    }

    /// Apply a single operation to an actuator, updating the status report.
    pub fn apply(&mut self, id: ActId, op: ActOp) -> Result<ActResult, ActCtrlError> {
        let idx = servo_index(id).ok_or(ActCtrlError::NotABoundedActuator(id))?;
        let act = self.acts.get_mut(&id).ok_or(ActCtrlError::NotInitialised)?;

        let before = act.current();

        match act.apply(op) {
            Ok(r) => {
                if r == ActResult::Clamped {
                    self.report.pos_limited[idx] = true;
                    debug!("{:?} {:?} saturated at {:.2}", id, op, act.current());
                }
                else {
                    info!("{:?} {:?}: {:.2} -> {:.2}", id, op, before, act.current());
                }
                Ok(r)
            },
            Err(e) => {
                self.report.op_rejected[idx] = true;
                Err(e)
            }
        }
    }

    /// Get an actuator by ID.
    pub fn get(&self, id: ActId) -> Option<&BoundedActuator> {
        self.acts.get(&id)
    }

    /// The current position of every actuator.
    pub fn positions(&self) -> HashMap<ActId, f64> {
        self.acts
            .iter()
            .map(|(id, act)| (*id, act.current()))
            .collect()
    }
}

/// Index of a bounded actuator in the status report arrays.
fn servo_index(id: ActId) -> Option<usize> {
    ActId::servo_ids().iter().position(|s| *s == id)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_initial_positions() {
        let ac = ActCtrl::new(Params::default()).unwrap();
        let pos = ac.positions();

        assert_eq!(pos.len(), NUM_ACTS);
        assert_eq!(pos[&ActId::Arm], 0.5);
        assert_eq!(pos[&ActId::Gripper], 0.0);
        assert_eq!(pos[&ActId::GripperTilt], 0.5);
        assert_eq!(pos[&ActId::Extender], 0.0);
    }

    #[test]
    fn test_proc_reports() {
        let mut ac = ActCtrl::new(Params::default()).unwrap();

        let input = InputData {
            ops: vec![
                (ActId::Gripper, ActOp::NudgeDown),
                (ActId::Arm, ActOp::GotoPreset("nowhere")),
                (ActId::Extender, ActOp::NudgeUp),
            ],
        };

        let (pos, report) = ac.proc(&input).unwrap();

        assert_eq!(pos[&ActId::Gripper], 0.0);
        assert_eq!(pos[&ActId::Arm], 0.5);
        assert_eq!(pos[&ActId::Extender], 0.1);
        assert_eq!(report.pos_limited, [false, true, false, false]);
        assert_eq!(report.op_rejected, [true, false, false, false]);

        // The report is cleared on the next cycle
        let (_, report) = ac.proc(&InputData::default()).unwrap();
        assert_eq!(report.pos_limited, [false; NUM_ACTS]);
    }

    #[test]
    fn test_uninitialised() {
        let mut ac = ActCtrl::default();
        assert!(matches!(
            ac.proc(&InputData::default()),
            Err(ActCtrlError::NotInitialised)
        ));
        assert!(matches!(
            ActCtrl::new(Params::default()).unwrap().apply(ActId::DrvLeft, ActOp::NudgeUp),
            Err(ActCtrlError::NotABoundedActuator(ActId::DrvLeft))
        ));
    }
}
