//! L298N dual H-bridge over embedded-hal pins.
//!
//! Each channel has two direction inputs and one PWM enable:
//!
//! | Sign     | IN_a | IN_b | EN duty      |
//! |----------|------|------|--------------|
//! | Forward  | HIGH | LOW  | magnitude    |
//! | Backward | LOW  | HIGH | magnitude    |
//! | Stop     | LOW  | LOW  | 0            |
//!
//! Magnitude is on a 0–255 scale and mapped onto the PWM peripheral's own
//! duty range.  A failed write is logged and the channel's duty is dropped
//! to zero on a best-effort basis.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{MotorPort, Side, Sign};
use crate::drivers::motion::MAX_SPEED;
use crate::error::{ActuatorError, Error};

pub struct Channel<P, E> {
    in_a: P,
    in_b: P,
    enable: E,
}

impl<P: OutputPin, E: SetDutyCycle> Channel<P, E> {
    pub fn new(in_a: P, in_b: P, enable: E) -> Self {
        Self { in_a, in_b, enable }
    }

    /// Direction pins first, so a stop coasts the motor even when the
    /// enable write then fails.
    fn apply(&mut self, sign: Sign, magnitude: u8) -> Result<(), ActuatorError> {
        let (a, b, duty) = match sign {
            Sign::Forward => (true, false, magnitude),
            Sign::Backward => (false, true, magnitude),
            Sign::Stop => (false, false, 0),
        };
        self.in_a.set_state(a.into()).map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.in_b.set_state(b.into()).map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.set_duty(duty)
    }

    fn set_duty(&mut self, magnitude: u8) -> Result<(), ActuatorError> {
        self.enable
            .set_duty_cycle_fraction(u16::from(magnitude), u16::from(MAX_SPEED))
            .map_err(|_| ActuatorError::PwmWriteFailed)
    }
}

pub struct L298n<P, E> {
    left: Channel<P, E>,
    right: Channel<P, E>,
}

impl<P: OutputPin, E: SetDutyCycle> L298n<P, E> {
    /// `left` is IN1/IN2/ENA, `right` is IN3/IN4/ENB.
    pub fn new(left: Channel<P, E>, right: Channel<P, E>) -> Self {
        Self { left, right }
    }
}

impl<P: OutputPin, E: SetDutyCycle> MotorPort for L298n<P, E> {
    fn set_motor(&mut self, side: Side, sign: Sign, magnitude: u8) {
        let channel = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        if let Err(e) = channel.apply(sign, magnitude) {
            warn!("motor {:?}: {}", side, Error::from(e));
            if let Err(e) = channel.set_duty(0) {
                warn!("motor {:?}: cannot release enable: {}", side, Error::from(e));
            }
        }
    }
}
