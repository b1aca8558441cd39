//! HC-SR04 style ultrasonic rangefinder.
//!
//! Converts a raw echo width into a [`DistanceSample`].  A missing echo or a
//! distance outside the plausible window becomes [`DistanceSample::Far`]:
//! the rover treats a confused sensor as "nothing in the way" and keeps
//! moving rather than blocking itself forever.

use log::debug;

use crate::app::ports::RangingPort;
use crate::config::{ECHO_US_PER_CM, RobotConfig};
use crate::nav::DistanceSample;

pub struct DistanceSensor {
    echo_timeout_ms: u32,
    min_range_cm: u16,
    max_range_cm: u16,
}

impl DistanceSensor {
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            echo_timeout_ms: config.echo_timeout_ms,
            min_range_cm: config.min_range_cm,
            max_range_cm: config.max_range_cm,
        }
    }

    /// Take one reading.  Blocks for at most the echo timeout plus the
    /// trigger pulse.
    pub fn measure(&self, port: &mut impl RangingPort) -> DistanceSample {
        port.trigger_pulse();

        let Some(echo_us) = port.read_echo_duration(self.echo_timeout_ms) else {
            debug!("sonar: no echo within {} ms", self.echo_timeout_ms);
            return DistanceSample::Far;
        };

        self.classify(echo_us)
    }

    /// Map an echo width to a sample, applying the plausible-range window.
    pub fn classify(&self, echo_us: u32) -> DistanceSample {
        let cm = echo_us / ECHO_US_PER_CM;
        if cm < u32::from(self.min_range_cm) || cm > u32::from(self.max_range_cm) {
            debug!("sonar: {} cm outside plausible range", cm);
            return DistanceSample::Far;
        }
        DistanceSample::Cm(cm as u16)
    }
}
