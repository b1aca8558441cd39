//! JSON-lines telemetry sink.
//!
//! Writes every [`AppEvent`] as one JSON object per line to any
//! `std::io::Write` (the UART console on the rover, a Bluetooth serial
//! bridge, or a buffer in tests).  A host-side logger can append the lines
//! straight to a CSV or JSON log.
//!
//! ```text
//! {"event":"cycle_completed","cycle":7,"now_ms":9120,"snapshot":{"front":15,"left":null,"right":50},...}
//! ```
//!
//! Telemetry has no effect on the control loop: a failed write is logged
//! once and later failures are dropped silently until a write succeeds.

use std::io::Write;

use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

pub struct JsonLineSink<W: Write> {
    out: W,
    failing: bool,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, failing: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &AppEvent) -> Result<(), &'static str> {
        let line = serde_json::to_string(event).map_err(|_| "serialise failed")?;
        writeln!(self.out, "{line}").map_err(|_| "write failed")?;
        self.out.flush().map_err(|_| "flush failed")
    }
}

impl<W: Write> EventSink for JsonLineSink<W> {
    fn emit(&mut self, event: &AppEvent) {
        match self.write_event(event) {
            Ok(()) => self.failing = false,
            Err(reason) => {
                if !self.failing {
                    warn!("telemetry: {}", reason);
                }
                self.failing = true;
            }
        }
    }
}
