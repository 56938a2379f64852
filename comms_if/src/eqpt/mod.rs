//! # Equipment Interface
//!
//! This module defines the interface structures which are exchanged with equipment, i.e. the input
//! device and the actuator drivers.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod gamepad;
pub mod mech;
