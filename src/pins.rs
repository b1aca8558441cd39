//! GPIO / peripheral pin assignments for the rover main board (ESP32-S3).
//!
//! Single source of truth: the firmware entry point builds every pin
//! driver from these numbers.

// ---------------------------------------------------------------------------
// L298N — left motor pair (channel A)
// ---------------------------------------------------------------------------

/// LEDC PWM output to ENA.
pub const LEFT_EN_GPIO: i32 = 5;
pub const LEFT_IN1_GPIO: i32 = 6;
pub const LEFT_IN2_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// L298N — right motor pair (channel B)
// ---------------------------------------------------------------------------

/// LEDC PWM output to ENB.
pub const RIGHT_EN_GPIO: i32 = 9;
pub const RIGHT_IN3_GPIO: i32 = 10;
pub const RIGHT_IN4_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// HC-SR04 ultrasonic rangefinder
// ---------------------------------------------------------------------------

pub const SONAR_TRIG_GPIO: i32 = 2;
/// 5 V echo through a resistive divider to 3.3 V.
pub const SONAR_ECHO_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC frequency for the H-bridge enables.  The L298N is happiest well
/// below 20 kHz.
pub const MOTOR_PWM_FREQ_HZ: u32 = 1_000;
