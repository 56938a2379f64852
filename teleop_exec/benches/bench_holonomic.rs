//! # Control Loop Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use comms_if::eqpt::gamepad::{AxisState, ButtonId, ButtonState, GamepadSample};
use teleop_lib::{
    act_ctrl,
    ctrl_loop::ControlLoop,
    drive_ctrl::{self, calc_wheel_cmds, DriveInputs},
};
use util::module::State;

fn holonomic_benchmark(c: &mut Criterion) {
    let params = drive_ctrl::Params::default();

    // Inputs sweeping the deadband, the unit range and beyond it
    let inputs: Vec<DriveInputs> = (0..100)
        .map(|i| {
            let t = (i as f64) * 0.1;
            DriveInputs {
                forward: 1.2 * t.sin(),
                strafe: 0.8 * t.cos(),
                rotation: 0.04 * t,
            }
        })
        .collect();

    c.bench_function("calc_wheel_cmds", |b| {
        b.iter(|| {
            for i in inputs.iter() {
                black_box(calc_wheel_cmds(black_box(i), &params));
            }
        })
    });
}

fn ctrl_loop_benchmark(c: &mut Criterion) {
    let mut cl = ControlLoop::new(act_ctrl::Params::default(), drive_ctrl::Params::default())
        .unwrap();
    cl.enable();

    // Alternate pressing and releasing so that every other cycle dispatches
    let pressed = GamepadSample {
        buttons: ButtonState::with_pressed(&[ButtonId::Start, ButtonId::RightBumper, ButtonId::Y]),
        axes: AxisState { left_x: 0.3, left_y: -0.9, right_x: 0.5, ..AxisState::default() },
    };
    let released = GamepadSample {
        buttons: ButtonState::default(),
        ..pressed
    };

    c.bench_function("ctrl_loop_proc", |b| {
        b.iter(|| {
            black_box(cl.proc(&pressed).unwrap());
            black_box(cl.proc(&released).unwrap());
        })
    });
}

criterion_group!(benches, holonomic_benchmark, ctrl_loop_benchmark);
criterion_main!(benches);
