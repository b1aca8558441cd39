//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the rover if the control loop stops completing cycles.  The
//! timeout is sized from the configured worst-case cycle so that a long
//! recovery spin never trips it.
//!
//! The main loop calls `feed()` once per cycle.

#[cfg(feature = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

/// Headroom over the worst-case cycle before the watchdog fires.
pub const CYCLE_MARGIN: u32 = 3;

/// Watchdog timeout for a given worst-case cycle length.
pub fn timeout_for_cycle(worst_case_cycle_ms: u32) -> u32 {
    worst_case_cycle_ms.saturating_mul(CYCLE_MARGIN)
}

pub struct Watchdog {
    #[cfg(feature = "espidf")]
    subscribed: bool,
    timeout_ms: u32,
}

impl Watchdog {
    /// Configure the TWDT and subscribe the calling task.
    pub fn new(worst_case_cycle_ms: u32) -> Self {
        let timeout_ms = timeout_for_cycle(worst_case_cycle_ms);

        #[cfg(feature = "espidf")]
        {
            // SAFETY: called once from the main task during boot.
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                if let Err(e) = esp!(esp_task_wdt_reconfigure(&cfg)) {
                    log::warn!("Watchdog: reconfigure returned {} (may already be configured)", e);
                }

                let subscribed = match esp!(esp_task_wdt_add(core::ptr::null_mut())) {
                    Ok(()) => {
                        info!("Watchdog: subscribed ({} ms timeout)", timeout_ms);
                        true
                    }
                    Err(e) => {
                        log::warn!("Watchdog: failed to subscribe ({})", e);
                        false
                    }
                };
                Self { subscribed, timeout_ms }
            }
        }

        #[cfg(not(feature = "espidf"))]
        {
            info!("Watchdog(sim): {} ms timeout, no-op", timeout_ms);
            Self { timeout_ms }
        }
    }

    /// Feed the watchdog.  Must be called at least once per timeout.
    pub fn feed(&self) {
        #[cfg(feature = "espidf")]
        {
            if self.subscribed {
                // SAFETY: resets the TWDT entry of the current task only.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}
