//! Monotonic clock adapter.
//!
//! Provides the millisecond timestamps for direction memory, the blocking
//! delay used by every timed move, and the microsecond source the sonar
//! times its echo with.
//!
//! - **`espidf`**: wraps `esp_timer_get_time()` (µs, monotonic) and
//!   FreeRTOS delays.
//! - **host**: uses `std::time::Instant` and `std::thread::sleep`.

use crate::app::ports::ClockPort;
use crate::nav::Timestamp;

/// Microsecond time source for pulse timing.
pub trait MicrosSource {
    fn now_us(&self) -> u64;
}

#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    #[cfg(not(feature = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(feature = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot.
    #[cfg(feature = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        // SAFETY: esp_timer_get_time only reads the high-resolution timer.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since the clock was created.
    #[cfg(not(feature = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl MicrosSource for MonotonicClock {
    fn now_us(&self) -> u64 {
        self.uptime_us()
    }
}

impl ClockPort for MonotonicClock {
    #[cfg(feature = "espidf")]
    fn sleep_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(feature = "espidf"))]
    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }

    fn now_ms(&self) -> Timestamp {
        self.uptime_us() / 1000
    }
}
