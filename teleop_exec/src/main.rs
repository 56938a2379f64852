//! Main teleoperation executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Telecommand processing and handling (mode changes and gamepad samples)
//!         - Control loop processing:
//!             - Button edge detection and dispatch
//!             - Actuator control processing
//!             - Drive control processing
//!         - Mechanisms driver execution
//!
//! # Modules
//!
//! All modules (e.g. `act_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use teleop_lib::{
    ctrl_loop,
    data_store::{DataStore, SafeModeCause},
    mech_driver::{LogDriver, MechDriver},
    tc_processor,
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, error, info, trace, warn};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.02;

/// Targets which log every cycle, and the most verbose level they are logged at.
const LIMITED_LOG_TARGETS: [(&str, LevelFilter); 2] = [
    ("teleop_lib::mech_driver", LevelFilter::Debug),
    ("teleop_lib::ctrl_loop", LevelFilter::Debug),
];

/// Limit of the number of times the driver can reject demands consecutively before safe mode will
/// be engaged.
const MAX_DRIVER_ERROR_LIMIT: u64 = 5;

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Command line options for the executable.
#[derive(Debug, StructOpt)]
#[structopt(name = "teleop_exec", about = "Teleoperated platform control loop")]
struct Opt {
    /// Path to the TC script to run
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Minimum level of messages to log, one of `info`, `debug` or `trace`
    #[structopt(short, long, default_value = "debug")]
    log_level: LevelFilter,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    let opt = Opt::from_args();

    // Initialise session
    let session = Session::new(
        "teleop_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opt.log_level, &LIMITED_LOG_TARGETS, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Teleoperation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opt);

    // ---- INITIALISE TC SOURCE ----

    info!("Loading script from {:?}", &opt.script);

    let mut script = ScriptInterpreter::new(&opt.script)
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} TCs\n",
        script.get_duration(),
        script.get_num_tcs()
    );

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut cl = ctrl_loop::ControlLoop::default();
    cl.init(
        ctrl_loop::InitData {
            act_ctrl_params: "act_ctrl.toml",
            drive_ctrl_params: "drive_ctrl.toml",
        },
        &session
    ).wrap_err("Failed to initialise the ControlLoop")?;

    let mut ds = DataStore::new(cl);

    let mut driver = LogDriver::new();

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        ds.cycle_start();

        // ---- TELECOMMAND PROCESSING ----

        match script.get_pending_tcs() {
            PendingTcs::None => (),
            PendingTcs::Some(tc_vec) => {
                for tc in tc_vec.iter() {
                    tc_processor::exec(&mut ds, tc);
                }
            },
            // Exit if end of script reached
            PendingTcs::EndOfScript => {
                info!("End of TC script reached, stopping");
                break
            }
        }

        // ---- CONTROL LOOP PROCESSING ----

        match ds.ctrl_loop.proc(&ds.gamepad) {
            Ok((o, r)) => {
                ds.ctrl_loop_output = o;
                ds.ctrl_loop_status_rpt = r;
            },
            Err(e) => {
                // Leave the previous output in place, since the loop didn't change anything
                warn!("Error during ControlLoop processing: {}", e)
            }
        };

        trace!("ControlLoop status: {:?}", ds.ctrl_loop_status_rpt);

        // ---- DRIVER ----

        match driver.send_demands(&ds.ctrl_loop_output) {
            Ok(()) => {
                ds.num_consec_driver_errors = 0;
            },
            Err(e) => {
                warn!("Driver rejected demands: {}", e);
                ds.num_consec_driver_errors += 1;

                // If over the limit print error and enter safe mode
                if ds.num_consec_driver_errors > MAX_DRIVER_ERROR_LIMIT {
                    if !ds.safe {
                        error!(
                            "Maximum number of driver errors ({}) has been exceeded",
                            MAX_DRIVER_ERROR_LIMIT
                        );
                    }
                    ds.make_safe(SafeModeCause::DriverError);
                }
            }
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S)
            .checked_sub(cycle_dur)
        {
            Some(d) => {
                ds.cycle_on_time();
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
                );
                if ds.cycle_overran() {
                    error!(
                        "{} consecutive cycle overruns, the cycle period can't be met",
                        ds.num_consec_cycle_overruns
                    );
                }
            }
        }

        ds.cycle_end();
    }

    // ---- SHUTDOWN ----

    // Leave everything stopped
    ds.make_safe(SafeModeCause::DisableTc);
    driver.send_demands(&ds.ctrl_loop_output)
        .wrap_err("Failed to send the final stop demands")?;

    info!("End of execution after {} cycles", ds.num_cycles);

    Ok(())
}
