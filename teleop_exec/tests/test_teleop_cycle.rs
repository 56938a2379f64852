//! # Teleoperation cycle tests
//!
//! Runs scripted TCs through the data store, control loop and driver, the same way the
//! executable does, but on a simulated clock.

use comms_if::eqpt::{
    gamepad::{ButtonId, ButtonState, GamepadSample},
    mech::{ActId, MechDems},
};
use teleop_lib::{
    act_ctrl,
    ctrl_loop::{ControlLoop, Mode},
    data_store::DataStore,
    drive_ctrl,
    mech_driver::{LogDriver, MechDriver},
    tc_processor,
};
use util::{
    module::State,
    script_interpreter::{PendingTcs, ScriptInterpreter},
};

const CYCLE_PERIOD_S: f64 = 0.02;

/// Run the script to completion, returning the demands sent on every cycle.
fn run_script(script: &str) -> (DataStore, Vec<MechDems>) {
    let mut si = ScriptInterpreter::from_script_str(script).unwrap();

    let cl = ControlLoop::new(act_ctrl::Params::default(), drive_ctrl::Params::default())
        .unwrap();
    let mut ds = DataStore::new(cl);
    let mut driver = LogDriver::new();
    let mut sent = Vec::new();

    loop {
        ds.cycle_start();

        let time_s = (ds.num_cycles as f64) * CYCLE_PERIOD_S;
        match si.get_pending_tcs_at(time_s) {
            PendingTcs::None => (),
            PendingTcs::Some(tcs) => {
                for tc in tcs.iter() {
                    tc_processor::exec(&mut ds, tc);
                }
            }
            PendingTcs::EndOfScript => break,
        }

        let (o, r) = ds.ctrl_loop.proc(&ds.gamepad).unwrap();
        ds.ctrl_loop_output = o;
        ds.ctrl_loop_status_rpt = r;

        driver.send_demands(&ds.ctrl_loop_output).unwrap();
        sent.push(ds.ctrl_loop_output.clone());

        ds.cycle_end();
    }

    assert_eq!(driver.num_sent() as usize, sent.len());

    (ds, sent)
}

#[test]
fn test_extender_presses() {
    // Start held for several cycles, released, then A pressed
    let (ds, sent) = run_script(
        r#"
        0.000: {"type": "ENABLE"};
        0.010: {"type": "GAMEPAD", "payload": {"buttons": ["Start"]}};
        0.110: {"type": "GAMEPAD", "payload": {}};
        0.150: {"type": "GAMEPAD", "payload": {"buttons": ["A"]}};
        0.250: {"type": "GAMEPAD", "payload": {}};
        "#,
    );

    let extender: Vec<f64> = sent.iter().map(|d| d.pos_norm[&ActId::Extender]).collect();

    // One press gives exactly one increment no matter how long it's held
    assert!(extender.iter().any(|p| (p - 0.1).abs() < 1e-12));
    assert!(extender.iter().all(|p| *p <= 0.1 + 1e-12 || *p == 1.0));
    assert_eq!(*extender.last().unwrap(), 1.0);

    let ext = ds.ctrl_loop.act_ctrl().get(ActId::Extender).unwrap();
    assert!(ext.is_fully_extended());
}

#[test]
fn test_drive_and_stop() {
    let (ds, sent) = run_script(
        r#"
        0.000: {"type": "ENABLE"};
        0.010: {"type": "GAMEPAD", "payload": {"axes": {"left_y": -1.0, "right_x": 1.0}}};
        0.090: {"type": "DISABLE"};
        0.150: {"type": "GAMEPAD", "payload": {"buttons": ["LeftBumper"], "axes": {"left_y": -1.0}}};
        "#,
    );

    // Normalised forward and rotation
    assert!(sent.iter().any(|d| {
        d.speed_norm[&ActId::DrvLeft] == 0.0
            && d.speed_norm[&ActId::DrvRight] == 1.0
            && d.speed_norm[&ActId::DrvBack] == 0.0
    }));

    // Every wheel demand stays in range
    for d in sent.iter() {
        for id in ActId::drive_ids().iter() {
            assert!(d.speed_norm[id].abs() <= 1.0);
        }
    }

    // Stopped at the end, even though the stick is still held, and the arm press was ignored
    let last = sent.last().unwrap();
    assert!(last.is_stopped());
    assert_eq!(last.pos_norm[&ActId::Arm], 0.5);
    assert_eq!(ds.ctrl_loop.mode(), Mode::Stopped);
    assert!(ds.safe);
}

#[test]
fn test_extreme_axes() {
    let (ds, sent) = run_script(
        r#"
        0.000: {"type": "ENABLE"};
        0.010: {"type": "GAMEPAD", "payload": {"axes": {"left_y": -1.7e308, "right_x": -1.7e308}}};
        0.090: {"type": "GAMEPAD", "payload": {}};
        "#,
    );

    // Every demand was accepted by the driver, and the loop was never made safe
    assert!(sent.iter().any(|d| {
        d.speed_norm[&ActId::DrvLeft] == 1.0
            && d.speed_norm[&ActId::DrvRight] == 0.0
            && d.speed_norm[&ActId::DrvBack] == 0.0
    }));
    assert!(!ds.safe);
    assert_eq!(ds.ctrl_loop.mode(), Mode::Running);
}

#[test]
fn test_held_through_enable() {
    // B is pressed while stopped and held while enabling
    let (ds, sent) = run_script(
        r#"
        0.000: {"type": "ENABLE"};
        0.010: {"type": "GAMEPAD", "payload": {"buttons": ["A"]}};
        0.050: {"type": "DISABLE"};
        0.070: {"type": "GAMEPAD", "payload": {"buttons": ["B"]}};
        0.110: {"type": "ENABLE"};
        0.190: {"type": "GAMEPAD", "payload": {}};
        "#,
    );

    // The extender stays extended as B never had a rising edge while running
    for d in sent.iter().skip(2) {
        assert_eq!(d.pos_norm[&ActId::Extender], 1.0);
    }
    assert_eq!(ds.ctrl_loop.mode(), Mode::Running);
}

#[test]
fn test_simultaneous_presses() {
    let mut cl = ControlLoop::new(act_ctrl::Params::default(), drive_ctrl::Params::default())
        .unwrap();
    cl.enable();

    let sample = GamepadSample {
        buttons: ButtonState::with_pressed(&ButtonId::ALL),
        ..GamepadSample::default()
    };
    let (dems, rpt) = cl.proc(&sample).unwrap();

    // Every row fires once, opposing nudges cancel and the extender ends on the last preset row
    assert_eq!(rpt.edges.len(), ButtonId::ALL.len());
    assert!((dems.pos_norm[&ActId::Arm] - 0.5).abs() < 1e-12);
    assert!((dems.pos_norm[&ActId::GripperTilt] - 0.5).abs() < 1e-12);
    assert_eq!(dems.pos_norm[&ActId::Extender], 0.0);
    assert_eq!(cl.edge_detector().snapshot(), &sample.buttons);
}
