//! Navigation core: direction memory, scan protocol and decision engine.
//!
//! ```text
//!  DecisionEngine ──▶ ScanProtocol ──▶ MotionActuator + DistanceSensor
//!        │                                       │
//!        │◀──────────── ScanSnapshot ◀───────────┘
//!        ▼
//!  DirectionMemory ──▶ Availability ──▶ Action ──▶ MotionActuator
//! ```
//!
//! Everything here is hardware-agnostic.  Hardware is reached only through
//! the port traits in [`crate::app::ports`].

pub mod decision;
pub mod memory;
pub mod scan;

use core::fmt;

use serde::Serialize;

/// Milliseconds since boot from the monotonic clock.
pub type Timestamp = u64;

// ---------------------------------------------------------------------------
// Heading
// ---------------------------------------------------------------------------

/// A direction the sonar can look, relative to the body at scan start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Heading {
    Front = 0,
    Left = 1,
    Right = 2,
}

impl Heading {
    pub const COUNT: usize = 3;

    /// Evaluation order: front, then left, then right.
    pub const ALL: [Heading; Self::COUNT] = [Self::Front, Self::Left, Self::Right];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Front => "F",
            Self::Left => "L",
            Self::Right => "R",
        }
    }
}

// ---------------------------------------------------------------------------
// Distance samples
// ---------------------------------------------------------------------------

/// One rangefinder reading.
///
/// `Far` stands for "no echo" or "implausible echo".  It is never a fault
/// and always counts as open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DistanceSample {
    Cm(u16),
    Far,
}

impl DistanceSample {
    /// True when the reading leaves room to move: strictly beyond the
    /// threshold, or `Far`.
    pub fn is_open(self, threshold_cm: u16) -> bool {
        match self {
            Self::Cm(cm) => cm > threshold_cm,
            Self::Far => true,
        }
    }
}

impl fmt::Display for DistanceSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cm(cm) => write!(f, "{cm}cm"),
            Self::Far => write!(f, "far"),
        }
    }
}

/// Distances for the three headings from one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanSnapshot {
    pub front: DistanceSample,
    pub left: DistanceSample,
    pub right: DistanceSample,
}

impl ScanSnapshot {
    pub fn new(front: DistanceSample, left: DistanceSample, right: DistanceSample) -> Self {
        Self { front, left, right }
    }

    pub fn get(&self, heading: Heading) -> DistanceSample {
        match heading {
            Heading::Front => self.front,
            Heading::Left => self.left,
            Heading::Right => self.right,
        }
    }

    pub(crate) fn set(&mut self, heading: Heading, sample: DistanceSample) {
        match heading {
            Heading::Front => self.front = sample,
            Heading::Left => self.left = sample,
            Heading::Right => self.right = sample,
        }
    }
}

impl Default for ScanSnapshot {
    fn default() -> Self {
        Self::new(DistanceSample::Far, DistanceSample::Far, DistanceSample::Far)
    }
}
