//! Implementations for the ControlLoop state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::{
    gamepad::{ButtonId, GamepadSample},
    mech::{ActId, MechDems},
};
use log::{debug, info, trace};
use serde::Serialize;

// Internal
use super::*;
use crate::{
    act_ctrl::{self, ActCtrl},
    dispatch::dispatch,
    drive_ctrl::{self, DriveCtrl, DriveInputs, WheelCommands},
    edge_detect::EdgeDetector,
};
use util::{module::State, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Control loop state
#[derive(Default)]
pub struct ControlLoop {
    mode: Mode,

    edge_detector: EdgeDetector,

    act_ctrl: ActCtrl,

    drive_ctrl: DriveCtrl,

    num_cycles: u64,
}

/// Data required to initialise the control loop.
pub struct InitData {
    /// Path to the ActCtrl parameter file
    pub act_ctrl_params: &'static str,

    /// Path to the DriveCtrl parameter file
    pub drive_ctrl_params: &'static str,
}

/// Status report for one cycle of the control loop.
#[derive(Clone, Default, Serialize, Debug)]
pub struct StatusReport {
    /// Mode the cycle was executed in.
    pub mode: Mode,

    /// Buttons with a rising edge on this cycle. Always empty while stopped.
    pub edges: Vec<ButtonId>,

    pub act_ctrl: act_ctrl::StatusReport,

    pub drive_ctrl: drive_ctrl::StatusReport,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for ControlLoop {
    type InitData = InitData;
    type InitError = CtrlLoopError;

    type InputData = GamepadSample;
    type OutputData = MechDems;
    type StatusReport = StatusReport;
    type ProcError = CtrlLoopError;

    /// Initialise the control loop and its modules, starting in the stopped mode.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        *self = Self::default();

        self.act_ctrl.init(init_data.act_ctrl_params, session)?;
        info!("ActCtrl init complete");

        self.drive_ctrl.init(init_data.drive_ctrl_params, session)?;
        info!("DriveCtrl init complete");

        Ok(())
    }

    /// Run one cycle of the control loop on the given sample.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        self.num_cycles += 1;

        let mut report = StatusReport {
            mode: self.mode,
            ..StatusReport::default()
        };

        let output = match self.mode {
            Mode::Running => {
                // All edge queries for this cycle are made against the same snapshot, which is
                // then committed exactly once.
                let edges = self.edge_detector.rising_edges(&input_data.buttons);
                self.edge_detector.commit(&input_data.buttons);

                if !edges.is_empty() {
                    debug!("Rising edges: {:?}", edges);
                }

                let (pos_norm, act_rpt) = self.act_ctrl.proc(&act_ctrl::InputData {
                    ops: dispatch(&edges),
                })?;

                let (wheels, drv_rpt) = match self.drive_ctrl.proc(&drive_ctrl::InputData {
                    inputs: DriveInputs::from_axes(&input_data.axes),
                }) {
                    Ok(r) => r,
                    Err(e) => match e {},
                };

                report.edges = edges;
                report.act_ctrl = act_rpt;
                report.drive_ctrl = drv_rpt;

                build_dems(pos_norm, wheels)
            },
            Mode::Stopped => {
                // Keep the snapshot following the input so that a button held through enabling
                // doesn't fire.
                self.edge_detector.commit(&input_data.buttons);

                self.stop_dems()
            }
        };

        trace!("ControlLoop output: {:?}", output);

        Ok((output, report))
    }
}

impl ControlLoop {
    /// Create a new control loop from parameters, starting in the stopped mode.
    pub fn new(
        act_params: act_ctrl::Params,
        drive_params: drive_ctrl::Params
    ) -> Result<Self, CtrlLoopError> {
        Ok(Self {
            mode: Mode::Stopped,
            edge_detector: EdgeDetector::new(),
            act_ctrl: ActCtrl::new(act_params)?,
            drive_ctrl: DriveCtrl::new(drive_params),
            num_cycles: 0,
        })
    }

    /// Enter the running mode.
    pub fn enable(&mut self) {
        if self.mode != Mode::Running {
            info!("Control loop running");
            self.mode = Mode::Running;
        }
    }

    /// Enter the stopped mode, returning the stop demands.
    ///
    /// Repeating this is harmless. Servo positions and the edge snapshot are left untouched.
    pub fn disable(&mut self) -> MechDems {
        if self.mode != Mode::Stopped {
            info!("Control loop stopped");
            self.mode = Mode::Stopped;
        }

        self.stop_dems()
    }

    /// Demands stopping all motors and holding all servos at their current position.
    pub fn stop_dems(&mut self) -> MechDems {
        let wheels = self.drive_ctrl.make_safe();
        build_dems(self.act_ctrl.positions(), wheels)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn act_ctrl(&self) -> &ActCtrl {
        &self.act_ctrl
    }

    pub fn edge_detector(&self) -> &EdgeDetector {
        &self.edge_detector
    }

    /// Number of cycles processed since initialisation.
    pub fn num_cycles(&self) -> u64 {
        self.num_cycles
    }
}

/// Assemble the demands for every actuator and motor.
fn build_dems(
    pos_norm: std::collections::HashMap<ActId, f64>,
    wheels: WheelCommands
) -> MechDems {
    let mut dems = MechDems::stop(pos_norm);

    dems.speed_norm.insert(ActId::DrvLeft, wheels.left);
    dems.speed_norm.insert(ActId::DrvRight, wheels.right);
    dems.speed_norm.insert(ActId::DrvBack, wheels.back);

    dems
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::gamepad::{AxisState, ButtonState};

    fn new_loop() -> ControlLoop {
        ControlLoop::new(act_ctrl::Params::default(), drive_ctrl::Params::default()).unwrap()
    }

    fn sample(buttons: &[ButtonId], axes: AxisState) -> GamepadSample {
        GamepadSample {
            buttons: ButtonState::with_pressed(buttons),
            axes,
        }
    }

    #[test]
    fn test_starts_stopped() {
        let mut cl = new_loop();
        assert_eq!(cl.mode(), Mode::Stopped);

        let axes = AxisState { left_y: -1.0, ..AxisState::default() };
        let (dems, rpt) = cl.proc(&sample(&[ButtonId::Start], axes)).unwrap();

        assert!(dems.is_stopped());
        assert!(rpt.edges.is_empty());
        assert_eq!(dems.pos_norm[&ActId::Extender], 0.0);
        assert_eq!(dems.pos_norm[&ActId::Arm], 0.5);
    }

    #[test]
    fn test_running_cycle() {
        let mut cl = new_loop();
        cl.enable();

        let axes = AxisState { left_y: -1.0, right_x: 1.0, ..AxisState::default() };
        let (dems, rpt) = cl
            .proc(&sample(&[ButtonId::RightBumper, ButtonId::Y], axes))
            .unwrap();

        assert_eq!(rpt.mode, Mode::Running);
        assert_eq!(rpt.edges, vec![ButtonId::Y, ButtonId::RightBumper]);
        assert!((dems.pos_norm[&ActId::Arm] - 0.55).abs() < 1e-12);
        assert_eq!(dems.pos_norm[&ActId::Gripper], 0.1);
        assert_eq!(dems.speed_norm[&ActId::DrvLeft], 0.0);
        assert_eq!(dems.speed_norm[&ActId::DrvRight], 1.0);
        assert_eq!(dems.speed_norm[&ActId::DrvBack], 0.0);
        assert!(rpt.drive_ctrl.normalised);
    }

    #[test]
    fn test_disable_holds_positions() {
        let mut cl = new_loop();
        cl.enable();

        let axes = AxisState { left_y: -0.8, ..AxisState::default() };
        let (dems, _) = cl.proc(&sample(&[ButtonId::A], axes)).unwrap();
        assert_eq!(dems.pos_norm[&ActId::Extender], 1.0);
        assert!(!dems.is_stopped());

        let stop = cl.disable();
        assert!(stop.is_stopped());
        assert_eq!(stop.pos_norm[&ActId::Extender], 1.0);

        // Idempotent
        assert_eq!(cl.disable(), stop);
        assert_eq!(cl.mode(), Mode::Stopped);

        // No dispatch while stopped
        let (dems, _) = cl.proc(&sample(&[ButtonId::B], axes)).unwrap();
        assert!(dems.is_stopped());
        assert_eq!(dems.pos_norm[&ActId::Extender], 1.0);
    }

    #[test]
    fn test_held_button_across_enable() {
        let mut cl = new_loop();

        // Start is pressed while stopped and held through enabling
        cl.proc(&sample(&[ButtonId::Start], AxisState::default())).unwrap();
        cl.enable();
        let (dems, rpt) = cl
            .proc(&sample(&[ButtonId::Start], AxisState::default()))
            .unwrap();

        assert!(rpt.edges.is_empty());
        assert_eq!(dems.pos_norm[&ActId::Extender], 0.0);
        assert_eq!(cl.num_cycles(), 2);
    }
}
