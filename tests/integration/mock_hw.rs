//! Simulated rover for integration tests.
//!
//! Implements every port against a tiny world model: a virtual clock that
//! only advances on sleeps, a body orientation integrated from pivot
//! commands, and one obstacle distance per compass quarter.  Every port
//! call is recorded so tests can assert on the full command history.

use rover::app::events::AppEvent;
use rover::app::ports::{ClockPort, EventSink, MotorPort, RangingPort, Side, Sign};
use rover::config::ECHO_US_PER_CM;
use rover::nav::Timestamp;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Motor { side: Side, sign: Sign, magnitude: u8 },
    Sleep(u32),
    /// Trigger pulse, tagged with the world quarter the sonar faced.
    Trigger { facing: usize },
}

// ── World directions (quarter turns CCW from the start pose) ──

pub const NORTH: usize = 0;
pub const WEST: usize = 1;
pub const SOUTH: usize = 2;
pub const EAST: usize = 3;

// ── SimRover ──────────────────────────────────────────────────

pub struct SimRover {
    pub clock_ms: Timestamp,
    /// Accumulated pivot time, counter-clockwise positive.
    pub rotation_ms: i64,
    /// Accumulated straight-line drive time.
    pub forward_ms: u64,
    /// Obstacle distance seen facing each world quarter; `None` = no echo.
    pub world: [Option<u16>; 4],
    pub calls: Vec<Call>,
    quarter_turn_ms: u32,
    left: (Sign, u8),
    right: (Sign, u8),
    pending_echo: Option<u32>,
}

#[allow(dead_code)]
impl SimRover {
    pub fn new(quarter_turn_ms: u32, world: [Option<u16>; 4]) -> Self {
        Self {
            clock_ms: 0,
            rotation_ms: 0,
            forward_ms: 0,
            world,
            calls: Vec::new(),
            quarter_turn_ms,
            left: (Sign::Stop, 0),
            right: (Sign::Stop, 0),
            pending_echo: None,
        }
    }

    /// World quarter the body currently faces.
    pub fn facing(&self) -> usize {
        let q = i64::from(self.quarter_turn_ms);
        assert_eq!(self.rotation_ms % q, 0, "rotation not a whole quarter");
        (self.rotation_ms / q).rem_euclid(4) as usize
    }

    pub fn is_stopped(&self) -> bool {
        self.left.1 == 0 && self.right.1 == 0
    }

    pub fn trigger_facings(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Trigger { facing } => Some(*facing),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl RangingPort for SimRover {
    fn trigger_pulse(&mut self) {
        let facing = self.facing();
        self.calls.push(Call::Trigger { facing });
        self.pending_echo = self.world[facing].map(|cm| u32::from(cm) * ECHO_US_PER_CM);
    }

    fn read_echo_duration(&mut self, timeout_ms: u32) -> Option<u32> {
        let echo = self.pending_echo.take();
        if echo.is_none() {
            self.clock_ms += u64::from(timeout_ms);
        }
        echo
    }
}

impl MotorPort for SimRover {
    fn set_motor(&mut self, side: Side, sign: Sign, magnitude: u8) {
        self.calls.push(Call::Motor { side, sign, magnitude });
        match side {
            Side::Left => self.left = (sign, magnitude),
            Side::Right => self.right = (sign, magnitude),
        }
    }
}

impl ClockPort for SimRover {
    fn sleep_ms(&mut self, ms: u32) {
        self.calls.push(Call::Sleep(ms));
        self.clock_ms += u64::from(ms);

        let moving = self.left.1 > 0 && self.right.1 > 0;
        match (moving, self.left.0, self.right.0) {
            (true, Sign::Backward, Sign::Forward) => self.rotation_ms += i64::from(ms),
            (true, Sign::Forward, Sign::Backward) => self.rotation_ms -= i64::from(ms),
            (true, Sign::Forward, Sign::Forward) => self.forward_ms += u64::from(ms),
            _ => {}
        }
    }

    fn now_ms(&self) -> Timestamp {
        self.clock_ms
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
