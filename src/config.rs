//! Rover tuning parameters
//!
//! Every threshold, duration and speed the controller uses.  Behaviour is
//! fixed at flash time: the defaults below are the compiled-in values and
//! there is no runtime override path.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Readings at or below this distance close a heading.
pub const OBSTACLE_THRESHOLD_CM: u16 = 20;
/// How long a heading stays distrusted after it last read closed.
pub const BLOCK_DURATION_MS: u32 = 10_000;

pub const FORWARD_SPEED: u8 = 180;
pub const TURN_SPEED: u8 = 160;

/// Pivot time for ~90° at `TURN_SPEED`.  Calibrate per chassis.
pub const QUARTER_TURN_MS: u32 = 400;
/// Pause after stopping so motion does not disturb the echo.
pub const SETTLE_MS: u32 = 100;
/// Forward drive time per decision.
pub const MOVE_STEP_MS: u32 = 300;
/// Motors held stopped after power-up before the first scan.
pub const BOOT_SETTLE_MS: u32 = 1_000;

/// HC-SR04 echo wait.  Covers the 400 cm rated range (23.2 ms round trip).
pub const ECHO_TIMEOUT_MS: u32 = 30;
pub const MIN_RANGE_CM: u16 = 2;
pub const MAX_RANGE_CM: u16 = 400;
/// Minimum trigger width from the HC-SR04 datasheet.
pub const TRIGGER_PULSE_US: u32 = 10;

/// Round-trip echo time per centimetre of range.
pub const ECHO_US_PER_CM: u32 = 58;

/// What the rover does when no heading is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoverySpin {
    /// Spin 360° in place and rescan from the same orientation.
    FullTurn,
    /// Spin 180° in place and rescan facing the way it came.
    HalfTurn,
}

impl RecoverySpin {
    /// Length of the spin in calibrated quarter turns.
    pub const fn quarter_turns(self) -> u32 {
        match self {
            Self::FullTurn => 4,
            Self::HalfTurn => 2,
        }
    }
}

/// Core rover configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotConfig {
    // --- Perception ---
    pub obstacle_threshold_cm: u16,
    pub echo_timeout_ms: u32,
    pub min_range_cm: u16,
    pub max_range_cm: u16,
    pub trigger_pulse_us: u32,

    // --- Direction memory ---
    pub block_duration_ms: u32,

    // --- Motion ---
    /// Forward PWM magnitude (0-255)
    pub forward_speed: u8,
    /// Pivot PWM magnitude (0-255)
    pub turn_speed: u8,
    pub quarter_turn_ms: u32,
    pub settle_ms: u32,
    pub move_step_ms: u32,
    pub recovery_spin: RecoverySpin,
    pub boot_settle_ms: u32,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            obstacle_threshold_cm: OBSTACLE_THRESHOLD_CM,
            echo_timeout_ms: ECHO_TIMEOUT_MS,
            min_range_cm: MIN_RANGE_CM,
            max_range_cm: MAX_RANGE_CM,
            trigger_pulse_us: TRIGGER_PULSE_US,

            block_duration_ms: BLOCK_DURATION_MS,

            forward_speed: FORWARD_SPEED,
            turn_speed: TURN_SPEED,
            quarter_turn_ms: QUARTER_TURN_MS,
            settle_ms: SETTLE_MS,
            move_step_ms: MOVE_STEP_MS,
            recovery_spin: RecoverySpin::FullTurn,
            boot_settle_ms: BOOT_SETTLE_MS,
        }
    }
}

impl RobotConfig {
    /// Pivot time for the left-to-right sweep of a scan.
    pub fn half_turn_ms(&self) -> u32 {
        self.quarter_turn_ms.saturating_mul(2)
    }

    /// Duration of the recovery spin when every heading is unavailable.
    pub fn spin_ms(&self) -> u32 {
        self.quarter_turn_ms
            .saturating_mul(self.recovery_spin.quarter_turns())
    }

    /// Upper bound on one decide-and-act cycle, used to size the watchdog.
    /// Saturates at `u32::MAX`; `validate()` rejects calibrations that get
    /// there.
    pub fn worst_case_cycle_ms(&self) -> u32 {
        self.checked_cycle_ms().unwrap_or(u32::MAX)
    }

    fn checked_cycle_ms(&self) -> Option<u32> {
        let scan = 4u32
            .checked_mul(self.settle_ms)?
            .checked_add(4u32.checked_mul(self.quarter_turn_ms)?)?
            .checked_add(3u32.checked_mul(self.echo_timeout_ms.checked_add(1)?)?)?;
        let turn_and_step = self.quarter_turn_ms.checked_add(self.move_step_ms)?;
        let spin = self
            .quarter_turn_ms
            .checked_mul(self.recovery_spin.quarter_turns())?;
        scan.checked_add(turn_and_step.max(spin))
    }

    /// Reject calibrations the controller cannot run on.
    pub fn validate(&self) -> Result<()> {
        if self.obstacle_threshold_cm == 0 {
            return Err(Error::Config("obstacle_threshold_cm must be non-zero"));
        }
        if self.min_range_cm >= self.max_range_cm {
            return Err(Error::Config("min_range_cm must be below max_range_cm"));
        }
        if self.obstacle_threshold_cm >= self.max_range_cm {
            return Err(Error::Config("obstacle_threshold_cm must be below max_range_cm"));
        }
        if self.echo_timeout_ms.saturating_mul(1000) < u32::from(self.max_range_cm) * ECHO_US_PER_CM {
            return Err(Error::Config("echo_timeout_ms too short for max_range_cm"));
        }
        if self.trigger_pulse_us < TRIGGER_PULSE_US {
            return Err(Error::Config("trigger_pulse_us below 10 us"));
        }
        if self.block_duration_ms == 0 {
            return Err(Error::Config("block_duration_ms must be non-zero"));
        }
        if self.forward_speed == 0 || self.turn_speed == 0 {
            return Err(Error::Config("motor speeds must be non-zero"));
        }
        if self.quarter_turn_ms == 0 {
            return Err(Error::Config("quarter_turn_ms must be non-zero"));
        }
        if self.checked_cycle_ms().is_none() {
            return Err(Error::Config("calibration overflows cycle budget"));
        }
        Ok(())
    }
}
