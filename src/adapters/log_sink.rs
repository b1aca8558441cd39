//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one line per cycle to the `log`
//! facade (UART console in production).  Lines are built in a fixed-size
//! buffer; an overlong line is truncated, never allocated.

use core::fmt::Write;

use log::info;

use crate::app::events::{AppEvent, CycleReport};
use crate::app::ports::EventSink;
use crate::nav::Heading;

pub const LINE_CAPACITY: usize = 96;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// `F=15cm L=far R=50cm | avail F=0 L=1 R=1 -> TurnThenMoveLeft`
pub fn format_cycle(report: &CycleReport) -> heapless::String<LINE_CAPACITY> {
    let mut line = heapless::String::new();
    for heading in Heading::ALL {
        let _ = write!(line, "{}={} ", heading.label(), report.snapshot.get(heading));
    }
    let _ = write!(line, "| avail");
    for heading in Heading::ALL {
        let _ = write!(
            line,
            " {}={}",
            heading.label(),
            u8::from(report.available.get(heading))
        );
    }
    let _ = write!(line, " -> {}", report.action);
    line
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                block_duration_ms,
                obstacle_threshold_cm,
            } => {
                info!(
                    "START | threshold={}cm block={}ms",
                    obstacle_threshold_cm, block_duration_ms
                );
            }
            AppEvent::CycleCompleted(report) => {
                info!("CYCLE {:>5} | {}", report.cycle, format_cycle(report));
            }
        }
    }
}
