//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the decision engine (and through it the direction
//! memory) plus the cycle counter.  All I/O flows through port traits
//! injected at call sites, so the whole loop runs against mock adapters in
//! tests.
//!
//! ```text
//!  RangingPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  ClockPort   ──▶ │       AppService       │
//!  MotorPort   ◀── │ Scan · Memory · Decide │
//!                  └────────────────────────┘
//! ```

use log::info;

use crate::config::RobotConfig;
use crate::error::Result;
use crate::nav::decision::DecisionEngine;
use crate::nav::memory::DirectionMemory;

use super::events::{AppEvent, CycleReport};
use super::ports::{EventSink, RoverHardware};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    engine: DecisionEngine,
    config: RobotConfig,
    cycle_count: u64,
}

impl AppService {
    /// Construct the service.  Rejects an unusable calibration up front so
    /// the loop itself never has to fail.
    pub fn new(config: RobotConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: DecisionEngine::new(&config),
            config,
            cycle_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Hold the motors stopped for the boot settle, then announce the
    /// service.  Call once before the first cycle.
    pub fn start(&mut self, hw: &mut impl RoverHardware, sink: &mut impl EventSink) {
        self.engine.halt(hw);
        hw.sleep_ms(self.config.boot_settle_ms);

        info!(
            "AppService started (threshold={} cm, block={} ms, spin={:?})",
            self.config.obstacle_threshold_cm,
            self.config.block_duration_ms,
            self.config.recovery_spin,
        );
        sink.emit(&AppEvent::Started {
            block_duration_ms: self.config.block_duration_ms,
            obstacle_threshold_cm: self.config.obstacle_threshold_cm,
        });
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle: scan → memory → choose → act → report.
    ///
    /// `now` is sampled once, before the scan, and used for every heading.
    pub fn run_cycle(
        &mut self,
        hw: &mut impl RoverHardware,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;
        let now = hw.now_ms();

        let decision = self.engine.decide(hw, now);
        self.engine.execute(decision.action, hw);

        let report = CycleReport::new(self.cycle_count, now, &decision);
        sink.emit(&AppEvent::CycleCompleted(report));
        report
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn memory(&self) -> &DirectionMemory {
        self.engine.memory()
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }
}
