//! Three-heading scan with a single fixed sonar.
//!
//! The body itself turns to point the sonar.  The sweep is a static step
//! table so that the zero-net-rotation law can be checked without any
//! hardware:
//!
//! ```text
//!   settle → F → ◀¼ → settle → L → ▶½ → settle → R → ◀¼ → settle
//! ```
//!
//! Pivot times are open-loop multiples of one calibrated quarter turn.

use log::debug;

use crate::app::ports::RoverHardware;
use crate::config::RobotConfig;
use crate::drivers::motion::MotionActuator;
use crate::sensors::DistanceSensor;

use super::{Heading, ScanSnapshot};

/// One step of the sweep.  Pivot counts are in calibrated quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    /// Stop the drive and let the chassis come to rest.
    Settle,
    Measure(Heading),
    PivotLeft(u8),
    PivotRight(u8),
}

impl ScanStep {
    /// Signed rotation of this step in quarter turns, counter-clockwise
    /// positive.
    pub const fn rotation(self) -> i32 {
        match self {
            Self::PivotLeft(q) => q as i32,
            Self::PivotRight(q) => -(q as i32),
            Self::Settle | Self::Measure(_) => 0,
        }
    }
}

pub const SCAN_SEQUENCE: [ScanStep; 10] = [
    ScanStep::Settle,
    ScanStep::Measure(Heading::Front),
    ScanStep::PivotLeft(1),
    ScanStep::Settle,
    ScanStep::Measure(Heading::Left),
    ScanStep::PivotRight(2),
    ScanStep::Settle,
    ScanStep::Measure(Heading::Right),
    ScanStep::PivotLeft(1),
    ScanStep::Settle,
];

/// Sum of the signed pivots in `steps`.
pub fn net_quarter_turns(steps: &[ScanStep]) -> i32 {
    steps.iter().map(|s| s.rotation()).sum()
}

pub struct ScanProtocol {
    sensor: DistanceSensor,
    quarter_turn_ms: u32,
    settle_ms: u32,
}

impl ScanProtocol {
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            sensor: DistanceSensor::new(config),
            quarter_turn_ms: config.quarter_turn_ms,
            settle_ms: config.settle_ms,
        }
    }

    /// Sample all three headings.  The rover ends facing where it started.
    pub fn scan(&self, motion: &mut MotionActuator, hw: &mut impl RoverHardware) -> ScanSnapshot {
        let mut snapshot = ScanSnapshot::default();

        for step in SCAN_SEQUENCE {
            match step {
                ScanStep::Settle => {
                    motion.stop(hw);
                    hw.sleep_ms(self.settle_ms);
                }
                ScanStep::Measure(heading) => {
                    let sample = self.sensor.measure(hw);
                    debug!("scan: {:?} = {}", heading, sample);
                    snapshot.set(heading, sample);
                }
                ScanStep::PivotLeft(q) => motion.pivot_left(hw, self.pivot_ms(q)),
                ScanStep::PivotRight(q) => motion.pivot_right(hw, self.pivot_ms(q)),
            }
        }

        snapshot
    }

    fn pivot_ms(&self, quarter_turns: u8) -> u32 {
        self.quarter_turn_ms.saturating_mul(u32::from(quarter_turns))
    }
}
