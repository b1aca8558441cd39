//! Rover firmware library.
//!
//! Exposes the navigation core, the port traits and the hardware adapters
//! for the firmware binary and for host-side integration testing.  All
//! ESP-IDF-specific code is guarded by `#[cfg(feature = "espidf")]` within
//! each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod nav;
pub mod pins;
pub mod sensors;
