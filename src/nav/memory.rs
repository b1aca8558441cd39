//! Direction memory.
//!
//! Each heading carries a small two-state machine:
//!
//! ```text
//!            closed reading
//!   Open ─────────────────────▶ Blocked { until = now + block }
//!    ▲                            │  ▲
//!    │  open reading, now ≥ until │  │ closed reading (refresh)
//!    └────────────────────────────┘  │ open reading, now < until
//!                                    └─(stays blocked)
//! ```
//!
//! A heading that just cleared is not trusted again until its block window
//! has elapsed, so a passing obstacle cannot pull the rover back into the
//! same spot on the next cycle.

use log::debug;

use super::{Heading, Timestamp};

/// Memoised state of one heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Open,
    Blocked { until: Timestamp },
}

/// Owns the block state of every heading for the life of the process.
#[derive(Debug, Clone)]
pub struct DirectionMemory {
    states: [BlockState; Heading::COUNT],
    block_duration_ms: u32,
}

impl DirectionMemory {
    /// All headings start `Open`.
    pub fn new(block_duration_ms: u32) -> Self {
        Self {
            states: [BlockState::Open; Heading::COUNT],
            block_duration_ms,
        }
    }

    /// Fold a live reading into the memory and report whether `heading`
    /// may be chosen right now.
    pub fn update_and_check(&mut self, heading: Heading, is_open_now: bool, now: Timestamp) -> bool {
        let state = &mut self.states[heading.index()];

        if !is_open_now {
            let until = now.saturating_add(u64::from(self.block_duration_ms));
            if *state == BlockState::Open {
                debug!("memory: {:?} blocked until {} ms", heading, until);
            }
            *state = BlockState::Blocked { until };
            return false;
        }

        match *state {
            BlockState::Open => true,
            BlockState::Blocked { until } if now < until => false,
            BlockState::Blocked { .. } => {
                debug!("memory: {:?} released at {} ms", heading, now);
                *state = BlockState::Open;
                true
            }
        }
    }

    pub fn state(&self, heading: Heading) -> BlockState {
        self.states[heading.index()]
    }

    pub fn is_blocked(&self, heading: Heading) -> bool {
        matches!(self.state(heading), BlockState::Blocked { .. })
    }

    pub fn block_duration_ms(&self) -> u32 {
        self.block_duration_ms
    }
}
