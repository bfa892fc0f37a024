//! Civ Conflict - two rival civilizations, simulated tick by tick

pub mod conflict;
pub mod core;
