//! Decision engine: scan, classify, remember, choose, act.
//!
//! Priority is fixed and first-match: forward, then left, then right.  When
//! nothing is available the rover spins in place and tries again next
//! cycle.  A cycle always ends in exactly one action.

use core::fmt;

use log::debug;
use serde::Serialize;

use crate::app::ports::RoverHardware;
use crate::config::RobotConfig;
use crate::drivers::motion::MotionActuator;

use super::memory::DirectionMemory;
use super::scan::ScanProtocol;
use super::{Heading, ScanSnapshot, Timestamp};

/// The single motion command issued per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    MoveForward,
    TurnThenMoveLeft,
    TurnThenMoveRight,
    SpinInPlace,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Per-heading availability after direction memory has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Availability {
    pub front: bool,
    pub left: bool,
    pub right: bool,
}

impl Availability {
    pub fn get(&self, heading: Heading) -> bool {
        match heading {
            Heading::Front => self.front,
            Heading::Left => self.left,
            Heading::Right => self.right,
        }
    }

    fn set(&mut self, heading: Heading, available: bool) {
        match heading {
            Heading::Front => self.front = available,
            Heading::Left => self.left = available,
            Heading::Right => self.right = available,
        }
    }
}

const PRIORITY: [(Heading, Action); 3] = [
    (Heading::Front, Action::MoveForward),
    (Heading::Left, Action::TurnThenMoveLeft),
    (Heading::Right, Action::TurnThenMoveRight),
];

/// First available heading in priority order, or a spin.
pub fn select_action(available: &Availability) -> Action {
    PRIORITY
        .iter()
        .find(|(heading, _)| available.get(*heading))
        .map_or(Action::SpinInPlace, |(_, action)| *action)
}

/// Everything one cycle saw and chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub snapshot: ScanSnapshot,
    pub available: Availability,
    pub action: Action,
}

pub struct DecisionEngine {
    memory: DirectionMemory,
    scanner: ScanProtocol,
    motion: MotionActuator,
    threshold_cm: u16,
    quarter_turn_ms: u32,
    move_step_ms: u32,
    spin_ms: u32,
}

impl DecisionEngine {
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            memory: DirectionMemory::new(config.block_duration_ms),
            scanner: ScanProtocol::new(config),
            motion: MotionActuator::new(config),
            threshold_cm: config.obstacle_threshold_cm,
            quarter_turn_ms: config.quarter_turn_ms,
            move_step_ms: config.move_step_ms,
            spin_ms: config.spin_ms(),
        }
    }

    /// Scan and choose.  Does not move the rover beyond the scan itself;
    /// the caller carries out the chosen action with [`Self::execute`] so
    /// the decision can be reported before or after acting.
    pub fn decide(&mut self, hw: &mut impl RoverHardware, now: Timestamp) -> Decision {
        let snapshot = self.scanner.scan(&mut self.motion, hw);
        let available = self.assess(&snapshot, now);
        let action = select_action(&available);
        debug!("decide: {:?} -> {}", available, action);
        Decision {
            snapshot,
            available,
            action,
        }
    }

    /// Classify each heading and fold it through direction memory, front
    /// first, then left, then right.
    pub fn assess(&mut self, snapshot: &ScanSnapshot, now: Timestamp) -> Availability {
        let mut available = Availability::default();
        for heading in Heading::ALL {
            let is_open_now = snapshot.get(heading).is_open(self.threshold_cm);
            available.set(heading, self.memory.update_and_check(heading, is_open_now, now));
        }
        available
    }

    /// Carry out `action`.  Turns are a quarter pivot toward the chosen
    /// side followed by the usual forward step.
    pub fn execute(&mut self, action: Action, hw: &mut impl RoverHardware) {
        match action {
            Action::MoveForward => self.motion.move_forward(hw, self.move_step_ms),
            Action::TurnThenMoveLeft => {
                self.motion.pivot_left(hw, self.quarter_turn_ms);
                self.motion.move_forward(hw, self.move_step_ms);
            }
            Action::TurnThenMoveRight => {
                self.motion.pivot_right(hw, self.quarter_turn_ms);
                self.motion.move_forward(hw, self.move_step_ms);
            }
            Action::SpinInPlace => self.motion.spin(hw, self.spin_ms),
        }
    }

    /// Both channels off.
    pub fn halt(&mut self, hw: &mut impl RoverHardware) {
        self.motion.stop(hw);
    }

    pub fn memory(&self) -> &DirectionMemory {
        &self.memory
    }
}
