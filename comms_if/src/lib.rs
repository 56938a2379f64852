//! # Communications interface crate.
//!
//! Provides all common interface types shared between the control software, the input device and
//! the actuator drivers.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Telecommand definitions
pub mod tc;

/// Data definitions for equipment (gamepad input, mechanisms output)
pub mod eqpt;
