//! HC-SR04 ultrasonic rangefinder over embedded-hal pins.
//!
//! Trigger: hold low 2 µs, high for the configured width (≥ 10 µs), low.
//! Echo: the module raises the echo line for the round-trip time.  Both
//! edges must arrive before one shared deadline, so a stuck line can never
//! hold the control loop longer than the timeout.
//!
//! Pin failures are logged and reported as "no echo".

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::adapters::time::MicrosSource;
use crate::app::ports::RangingPort;
use crate::error::{Error, SensorError};

pub struct Hcsr04<Trig, Echo, D, T> {
    trig: Trig,
    echo: Echo,
    delay: D,
    clock: T,
    pulse_us: u32,
}

impl<Trig, Echo, D, T> Hcsr04<Trig, Echo, D, T>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    T: MicrosSource,
{
    pub fn new(trig: Trig, echo: Echo, delay: D, clock: T, pulse_us: u32) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
            pulse_us,
        }
    }

    fn pulse(&mut self) -> Result<(), SensorError> {
        self.trig.set_low().map_err(|_| SensorError::GpioWriteFailed)?;
        self.delay.delay_us(2);
        self.trig.set_high().map_err(|_| SensorError::GpioWriteFailed)?;
        self.delay.delay_us(self.pulse_us);
        self.trig.set_low().map_err(|_| SensorError::GpioWriteFailed)
    }

    fn echo_width(&mut self, timeout_ms: u32) -> Result<Option<u32>, SensorError> {
        let deadline = self.clock.now_us() + u64::from(timeout_ms) * 1000;

        let Some(rise) = self.wait_for_level(true, deadline)? else {
            return Ok(None);
        };
        let Some(fall) = self.wait_for_level(false, deadline)? else {
            return Ok(None);
        };
        Ok(Some((fall - rise) as u32))
    }

    /// Busy-poll the echo line until it reads `high`, or `None` at the
    /// deadline.
    fn wait_for_level(&mut self, high: bool, deadline_us: u64) -> Result<Option<u64>, SensorError> {
        loop {
            let now = self.clock.now_us();
            let level = self.echo.is_high().map_err(|_| SensorError::GpioReadFailed)?;
            if level == high {
                return Ok(Some(now));
            }
            if now >= deadline_us {
                return Ok(None);
            }
        }
    }
}

impl<Trig, Echo, D, T> RangingPort for Hcsr04<Trig, Echo, D, T>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    T: MicrosSource,
{
    fn trigger_pulse(&mut self) {
        if let Err(e) = self.pulse() {
            warn!("sonar: {}", Error::from(e));
        }
    }

    fn read_echo_duration(&mut self, timeout_ms: u32) -> Option<u32> {
        self.echo_width(timeout_ms).unwrap_or_else(|e| {
            warn!("sonar: {}", Error::from(e));
            None
        })
    }
}
