//! Sensor drivers.  The rover has exactly one: the forward sonar.

pub mod ultrasonic;

pub use ultrasonic::DistanceSensor;
