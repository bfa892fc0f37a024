//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter (simulation time unit)
pub type Tick = u64;

/// One of the two rival civilizations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    /// Index into per-side arrays
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Parse a side label as typed at the console ("a", "B", "civ a")
    pub fn parse(label: &str) -> Option<Side> {
        let label = label.trim().to_ascii_lowercase();
        match label.trim_start_matches("civ").trim() {
            "a" | "0" => Some(Side::A),
            "b" | "1" => Some(Side::B),
            _ => None,
        }
    }
}

/// Replace NaN/Infinity with zero and floor at zero
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
