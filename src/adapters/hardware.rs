//! Hardware adapter — bundles the rover's peripherals behind the port traits.
//!
//! Owns the sonar, the H-bridge and the clock, and forwards each port to
//! the right one.  Passing this single value as `&mut impl RoverHardware`
//! keeps the port boundary explicit without a double mutable borrow.

use crate::app::ports::{ClockPort, MotorPort, RangingPort, Side, Sign};
use crate::nav::Timestamp;

pub struct HardwareAdapter<S, M, C> {
    sonar: S,
    motors: M,
    clock: C,
}

impl<S, M, C> HardwareAdapter<S, M, C>
where
    S: RangingPort,
    M: MotorPort,
    C: ClockPort,
{
    pub fn new(sonar: S, motors: M, clock: C) -> Self {
        Self { sonar, motors, clock }
    }

    /// Both channels off.  Used at boot before the first cycle.
    pub fn all_stop(&mut self) {
        self.motors.set_motor(Side::Left, Sign::Stop, 0);
        self.motors.set_motor(Side::Right, Sign::Stop, 0);
    }
}

// ── RangingPort ───────────────────────────────────────────────

impl<S: RangingPort, M, C> RangingPort for HardwareAdapter<S, M, C> {
    fn trigger_pulse(&mut self) {
        self.sonar.trigger_pulse();
    }

    fn read_echo_duration(&mut self, timeout_ms: u32) -> Option<u32> {
        self.sonar.read_echo_duration(timeout_ms)
    }
}

// ── MotorPort ─────────────────────────────────────────────────

impl<S, M: MotorPort, C> MotorPort for HardwareAdapter<S, M, C> {
    fn set_motor(&mut self, side: Side, sign: Sign, magnitude: u8) {
        self.motors.set_motor(side, sign, magnitude);
    }
}

// ── ClockPort ─────────────────────────────────────────────────

impl<S, M, C: ClockPort> ClockPort for HardwareAdapter<S, M, C> {
    fn sleep_ms(&mut self, ms: u32) {
        self.clock.sleep_ms(ms);
    }

    fn now_ms(&self) -> Timestamp {
        self.clock.now_ms()
    }
}
