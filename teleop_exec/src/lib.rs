//! # Teleoperation library.
//!
//! This library allows the executable, tests and benchmarks to access the control loop and the
//! modules it is built from.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Actuator control module - bounded position actuators with nudges and named presets
pub mod act_ctrl;

/// Control loop - the per-cycle orchestrator tying input to actuator and drive demands
pub mod ctrl_loop;

/// Global data store for the executable
pub mod data_store;

/// Button dispatch - maps rising button edges to actuator operations
pub mod dispatch;

/// Drive control module - holonomic kinematics for the three wheel drivetrain
pub mod drive_ctrl;

/// Edge detection - turns held buttons into single press events
pub mod edge_detect;

/// Mechanisms driver - sends the demands on to the actuators
pub mod mech_driver;

/// Telecommand processor - applies TCs to the data store
pub mod tc_processor;
