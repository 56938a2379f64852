//! Implementations for the DriveCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::*;
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive control module state.
///
/// The kinematics are stateless, this only holds the parameters and the last output.
#[derive(Default)]
pub struct DriveCtrl {
    pub(crate) params: Params,

    pub(crate) output: WheelCommands,
}

/// Input data to Drive Control.
#[derive(Default, Debug, Clone, Copy)]
pub struct InputData {
    pub inputs: DriveInputs,
}

/// Status report for DriveCtrl processing.
#[derive(Clone, Copy, Serialize, Debug)]
pub struct StatusReport {
    /// True if the raw wheel commands exceeded unity and were scaled down.
    pub normalised: bool,

    /// The factor the raw commands were divided by.
    pub norm_factor: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for StatusReport {
    fn default() -> Self {
        Self {
            normalised: false,
            norm_factor: 1.0,
        }
    }
}

impl State for DriveCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = InputData;
    type OutputData = WheelCommands;
    type StatusReport = StatusReport;
    type ProcError = std::convert::Infallible;

    /// Initialise the DriveCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        self.params = params::load(init_data)?;
        self.output = WheelCommands::stop();

        Ok(())
    }

    /// Perform cyclic processing of Drive Control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let (output, norm_factor) = calc_wheel_cmds(&input_data.inputs, &self.params);

        let report = StatusReport {
            normalised: norm_factor > 1.0,
            norm_factor,
        };

        trace!("DriveCtrl output: {:?} (norm factor {:.3})", output, norm_factor);

        self.output = output;

        Ok((output, report))
    }
}

impl DriveCtrl {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            output: WheelCommands::stop(),
        }
    }

    /// Function called when stopping.
    ///
    /// Must result in no motion of the drivetrain, and is harmless to repeat.
    pub fn make_safe(&mut self) -> WheelCommands {
        self.output = WheelCommands::stop();
        self.output
    }

    /// The last commands produced.
    pub fn output(&self) -> WheelCommands {
        self.output
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_proc_and_stop() {
        let mut dc = DriveCtrl::new(Params::default());

        let (out, rpt) = match dc.proc(&InputData {
            inputs: DriveInputs::two_axis(1.0, 1.0),
        }) {
            Ok(r) => r,
            Err(e) => match e {},
        };

        assert_eq!(out, WheelCommands { left: 0.0, right: 1.0, back: 0.0 });
        assert!(rpt.normalised);
        assert_eq!(rpt.norm_factor, 2.0);
        assert_eq!(dc.output(), out);

        assert_eq!(dc.make_safe(), WheelCommands::stop());
        assert_eq!(dc.make_safe(), WheelCommands::stop());
        assert_eq!(dc.output(), WheelCommands::stop());
    }
}
