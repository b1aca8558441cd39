//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: a console log line, a JSON telemetry
//! record, or nothing at all.

use serde::Serialize;

use crate::nav::decision::{Action, Availability, Decision};
use crate::nav::{ScanSnapshot, Timestamp};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// The service is about to run its first cycle.
    Started {
        block_duration_ms: u32,
        obstacle_threshold_cm: u16,
    },

    /// One decide-and-act cycle finished.
    CycleCompleted(CycleReport),
}

/// What one cycle saw, remembered and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// 1-based cycle counter since boot.
    pub cycle: u64,
    /// Clock value the direction memory was evaluated at.
    pub now_ms: Timestamp,
    pub snapshot: ScanSnapshot,
    pub available: Availability,
    pub action: Action,
}

impl CycleReport {
    pub fn new(cycle: u64, now_ms: Timestamp, decision: &Decision) -> Self {
        Self {
            cycle,
            now_ms,
            snapshot: decision.snapshot,
            available: decision.available,
            action: decision.action,
        }
    }
}
