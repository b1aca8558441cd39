//! Port traits — the hexagonal boundary between the navigation core and the
//! rover hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService / nav (domain)
//! ```
//!
//! Driven adapters (sonar, H-bridge, clock, event sinks) implement these
//! traits.  The domain consumes them via generics, so nothing above this
//! line touches a pin.  None of the methods are fallible: the shims fold
//! their own failures into "no echo" or a logged warning.

use crate::nav::Timestamp;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Ranging port (driven adapter: sonar → domain)
// ───────────────────────────────────────────────────────────────

/// Raw ultrasonic rangefinder I/O.
pub trait RangingPort {
    /// Emit one trigger pulse.
    fn trigger_pulse(&mut self);

    /// Wait for the echo and return its width in microseconds.
    ///
    /// Returns `None` if no complete echo arrives within `timeout_ms`.
    /// Must never block longer than that bound.
    fn read_echo_duration(&mut self, timeout_ms: u32) -> Option<u32>;
}

// ───────────────────────────────────────────────────────────────
// Motor port (driven adapter: domain → H-bridge)
// ───────────────────────────────────────────────────────────────

/// One side of the differential drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Rotation sense of one motor channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Forward,
    Backward,
    Stop,
}

/// Raw motor channel output.
pub trait MotorPort {
    /// Set one channel's direction and PWM magnitude (0–255).
    fn set_motor(&mut self, side: Side, sign: Sign, magnitude: u8);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Blocking delay plus the monotonic time source for direction memory.
pub trait ClockPort {
    /// Block the single control thread for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);

    /// Milliseconds since boot.  Never goes backwards.
    fn now_ms(&self) -> Timestamp;
}

/// Everything one decision cycle touches.  Blanket-implemented, so a single
/// adapter value satisfies it without a double mutable borrow.
pub trait RoverHardware: RangingPort + MotorPort + ClockPort {}

impl<T: RangingPort + MotorPort + ClockPort> RoverHardware for T {}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`AppEvent`](super::events::AppEvent)s through this
/// port.  Sinks have no influence on behaviour and may drop everything.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

/// Fan-out: every event goes to the first sink, then the second.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}
