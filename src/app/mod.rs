//! Application core — pure domain orchestration, zero I/O.
//!
//! The rover's control loop lives here.  All interaction with hardware
//! happens through the **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
