//! Differential-drive motion primitives.
//!
//! Two independent channels, each with a rotation sense and a PWM
//! magnitude.  Turns are pivots: both sides run at the same speed in
//! opposite senses.  There is no reverse move; the rover
//! spins in place instead.
//!
//! Every composite move is open-loop: set outputs, block for the
//! duration, stop.

use log::debug;

use crate::app::ports::{ClockPort, MotorPort, Side, Sign};
use crate::config::RobotConfig;

/// Full-scale PWM magnitude of the H-bridge enable pins.
pub const MAX_SPEED: u8 = 255;

/// Commanded output of the drive, as last written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveState {
    Stopped,
    Running {
        left: (Sign, u8),
        right: (Sign, u8),
    },
}

pub struct MotionActuator {
    forward_speed: u8,
    turn_speed: u8,
    state: DriveState,
}

impl MotionActuator {
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            forward_speed: config.forward_speed,
            turn_speed: config.turn_speed,
            state: DriveState::Stopped,
        }
    }

    /// Write both channels.  Magnitudes are clamped to [`MAX_SPEED`]; a
    /// `Stop` sign always writes zero.
    pub fn drive(
        &mut self,
        hw: &mut impl MotorPort,
        left_sign: Sign,
        left_speed: u8,
        right_sign: Sign,
        right_speed: u8,
    ) {
        let left = channel(left_sign, left_speed);
        let right = channel(right_sign, right_speed);

        hw.set_motor(Side::Left, left.0, left.1);
        hw.set_motor(Side::Right, right.0, right.1);

        self.state = if left.1 == 0 && right.1 == 0 {
            DriveState::Stopped
        } else {
            DriveState::Running { left, right }
        };
    }

    pub fn stop(&mut self, hw: &mut impl MotorPort) {
        self.drive(hw, Sign::Stop, 0, Sign::Stop, 0);
    }

    pub fn move_forward(&mut self, hw: &mut (impl MotorPort + ClockPort), duration_ms: u32) {
        debug!("motion: forward {} ms", duration_ms);
        let speed = self.forward_speed;
        self.timed(hw, (Sign::Forward, speed), (Sign::Forward, speed), duration_ms);
    }

    /// Counter-clockwise pivot: left side back, right side forward.
    pub fn pivot_left(&mut self, hw: &mut (impl MotorPort + ClockPort), duration_ms: u32) {
        debug!("motion: pivot left {} ms", duration_ms);
        let speed = self.turn_speed;
        self.timed(hw, (Sign::Backward, speed), (Sign::Forward, speed), duration_ms);
    }

    /// Clockwise pivot: left side forward, right side back.
    pub fn pivot_right(&mut self, hw: &mut (impl MotorPort + ClockPort), duration_ms: u32) {
        debug!("motion: pivot right {} ms", duration_ms);
        let speed = self.turn_speed;
        self.timed(hw, (Sign::Forward, speed), (Sign::Backward, speed), duration_ms);
    }

    /// Spin in place.  Same sense as a left pivot, only longer.
    pub fn spin(&mut self, hw: &mut (impl MotorPort + ClockPort), duration_ms: u32) {
        debug!("motion: spin {} ms", duration_ms);
        let speed = self.turn_speed;
        self.timed(hw, (Sign::Backward, speed), (Sign::Forward, speed), duration_ms);
    }

    pub fn state(&self) -> DriveState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, DriveState::Stopped)
    }

    fn timed(
        &mut self,
        hw: &mut (impl MotorPort + ClockPort),
        left: (Sign, u8),
        right: (Sign, u8),
        duration_ms: u32,
    ) {
        self.drive(hw, left.0, left.1, right.0, right.1);
        hw.sleep_ms(duration_ms);
        self.stop(hw);
    }
}

fn channel(sign: Sign, speed: u8) -> (Sign, u8) {
    match sign {
        Sign::Stop => (Sign::Stop, 0),
        _ if speed == 0 => (Sign::Stop, 0),
        _ => (sign, speed.min(MAX_SPEED)),
    }
}
