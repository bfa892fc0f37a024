//! Tick clock with periodic boundary checks
//!
//! Controllers in the simulation only act on fixed tick windows
//! (every 25th tick for war checks, every 30th for peace checks, ...).

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Tracks the index of the tick currently being simulated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    tick: Tick,
}

impl Calendar {
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    pub fn advance(&mut self) -> Tick {
        self.tick += 1;
        self.tick
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// True when the current tick falls on an `interval` boundary
    pub fn is_every(&self, interval: u64) -> bool {
        is_boundary(self.tick, interval)
    }
}

/// True when `tick` is a positive multiple of `interval`
pub fn is_boundary(tick: Tick, interval: u64) -> bool {
    interval > 0 && tick > 0 && tick % interval == 0
}
