//! Holonomic drive kinematics calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use util::maths::{clamp, max_abs, signed_square};

// Internal
use super::*;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Apply a symmetric deadband to a single axis.
///
/// Values with an absolute value below `width` become exactly zero, others pass through
/// unchanged. Non-finite values are treated as zero.
pub fn deadband(value: f64, width: f64) -> f64 {
    if !value.is_finite() || value.abs() < width {
        0.0
    }
    else {
        value
    }
}

/// Calculate the wheel commands for the given inputs.
///
/// Steps:
///     1. Deadband each input independently, limit it to `[-1, 1]` (then square it if enabled).
///     2. `left = forward - rotation`, `right = forward + rotation`, `back = strafe`.
///     3. If any wheel exceeds unity divide all three by the largest magnitude, so that the
///        commanded direction is preserved.
///
/// Returns the commands and the factor they were divided by (1.0 if no normalisation occured).
pub fn calc_wheel_cmds(inputs: &DriveInputs, params: &Params) -> (WheelCommands, f64) {
    let shape = |v: f64| {
        // Limiting here keeps the sums below finite, so normalisation can't produce NaN
        let v = clamp(&deadband(v, params.deadband), &-1.0, &1.0);
        if params.square_inputs {
            signed_square(v)
        }
        else {
            v
        }
    };

    let forward = shape(inputs.forward);
    let strafe = shape(inputs.strafe);
    let rotation = shape(inputs.rotation);

    let mut cmds = WheelCommands {
        left: forward - rotation,
        right: forward + rotation,
        back: strafe,
    };

    let max_mag = max_abs(&cmds.as_array());

    if max_mag > 1.0 {
        cmds.left /= max_mag;
        cmds.right /= max_mag;
        cmds.back /= max_mag;
        (cmds, max_mag)
    }
    else {
        (cmds, 1.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn calc(forward: f64, strafe: f64, rotation: f64) -> WheelCommands {
        calc_wheel_cmds(
            &DriveInputs { forward, strafe, rotation },
            &Params::default()
        ).0
    }

    #[test]
    fn test_straight_forward() {
        let c = calc(1.0, 0.0, 0.0);
        assert_eq!(c, WheelCommands { left: 1.0, right: 1.0, back: 0.0 });
    }

    #[test]
    fn test_normalisation() {
        let (c, factor) = calc_wheel_cmds(
            &DriveInputs::two_axis(1.0, 1.0),
            &Params::default()
        );
        assert_eq!(factor, 2.0);
        assert_eq!(c, WheelCommands { left: 0.0, right: 1.0, back: 0.0 });

        // Ratio between the wheels is kept
        let c = calc(1.0, 0.5, 0.5);
        assert_eq!(c.right, 1.0);
        assert!((c.left - 1.0 / 3.0).abs() < 1e-12);
        assert!((c.back - 1.0 / 3.0).abs() < 1e-12);

        // Out of range inputs are still bounded
        let c = calc(-4.0, 3.0, 0.0);
        for v in c.as_array().iter() {
            assert!(v.abs() <= 1.0);
        }
        assert_eq!(c, WheelCommands { left: -1.0, right: -1.0, back: 1.0 });

        // Extreme inputs are limited before they are combined
        let (c, factor) = calc_wheel_cmds(
            &DriveInputs { forward: std::f64::MAX, strafe: 0.0, rotation: -std::f64::MAX },
            &Params::default()
        );
        assert_eq!(c, WheelCommands { left: 1.0, right: 0.0, back: 0.0 });
        assert_eq!(factor, 2.0);

        let c = calc(-std::f64::MAX, std::f64::MAX, std::f64::MAX);
        for v in c.as_array().iter() {
            assert!(v.is_finite());
            assert!(v.abs() <= 1.0);
        }
        assert_eq!(c, WheelCommands { left: -1.0, right: 0.0, back: 0.5 });
    }

    #[test]
    fn test_deadband() {
        assert_eq!(deadband(0.049, DEFAULT_DEADBAND), 0.0);
        assert_eq!(deadband(-0.049, DEFAULT_DEADBAND), 0.0);
        assert_eq!(deadband(0.05, DEFAULT_DEADBAND), 0.05);
        assert_eq!(deadband(-0.7, DEFAULT_DEADBAND), -0.7);
        assert_eq!(deadband(std::f64::NAN, DEFAULT_DEADBAND), 0.0);

        // Idempotent
        for v in [-0.3, -0.04, 0.0, 0.01, 0.049, 0.05, 0.9].iter() {
            let once = deadband(*v, DEFAULT_DEADBAND);
            assert_eq!(deadband(once, DEFAULT_DEADBAND), once);
        }

        // Applied before the kinematics
        let c = calc(0.04, -0.03, 0.02);
        assert_eq!(c, WheelCommands::stop());
        let c = calc(0.5, 0.0, 0.04);
        assert_eq!(c, WheelCommands { left: 0.5, right: 0.5, back: 0.0 });
    }

    #[test]
    fn test_square_inputs() {
        let params = Params { square_inputs: true, ..Params::default() };

        let (c, _) = calc_wheel_cmds(&DriveInputs::two_axis(-0.5, 0.0), &params);
        assert_eq!(c, WheelCommands { left: -0.25, right: -0.25, back: 0.0 });

        let (c, _) = calc_wheel_cmds(&DriveInputs::two_axis(0.04, 0.0), &params);
        assert_eq!(c, WheelCommands::stop());
    }
}
