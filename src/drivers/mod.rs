//! Actuator drivers and supervision.

pub mod motion;
pub mod watchdog;
