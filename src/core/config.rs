//! Simulation configuration with documented constants
//!
//! Scheduling windows, event durations and buffer sizes are collected here.
//! Growth formula constants stay next to the formulas in `conflict::systems`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Configuration for the tick orchestrator and its controllers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === RANDOMNESS ===
    /// Seed for the simulation's random source
    ///
    /// `None` seeds from entropy. The same seed and the same initial
    /// configuration always replay the same run.
    pub seed: Option<u64>,

    // === BUFFERS ===
    /// Number of history samples kept for charting
    ///
    /// Once exceeded, the oldest sample is evicted.
    pub history_capacity: usize,

    /// Blend factor applied to history samples
    ///
    /// `None` records the exact values produced each tick. `Some(s)` records
    /// `s * previous_sample + (1 - s) * current` for every numeric field.
    /// Must lie in [0, 1).
    pub history_smoothing: Option<f64>,

    /// Number of event log entries kept
    pub log_capacity: usize,

    // === SCHEDULING ===
    /// Wall-clock interval between ticks at speed 1.0 (milliseconds)
    pub tick_interval_ms: u64,

    /// Ticks between random event trigger checks
    ///
    /// A civilization without an active event rolls once on each boundary.
    pub event_check_interval: u64,

    /// Probability that an eligible civilization rolls into an event
    pub event_trigger_chance: f64,

    /// Ticks between war declaration checks while at peace
    pub war_check_interval: u64,

    /// Ticks between peace treaty checks while at war
    pub peace_check_interval: u64,

    /// Ticks between trade log entries
    pub trade_log_interval: u64,

    // === EVENT DURATIONS ===
    /// Duration of a CRISIS event (ticks)
    pub crisis_duration: u32,

    /// Duration of a BOOM event (ticks)
    pub boom_duration: u32,

    /// Duration of the RECON event started by a peace treaty (ticks)
    ///
    /// Reconstruction milestones are logged at 60, 50 and 30 remaining,
    /// so values below 60 skip the early milestones.
    pub recon_duration: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,

            history_capacity: 800,
            history_smoothing: None,
            log_capacity: 500,

            tick_interval_ms: 200,
            event_check_interval: 25,
            event_trigger_chance: 0.15,
            war_check_interval: 25,
            peace_check_interval: 30,
            trade_log_interval: 40,

            crisis_duration: 30,
            boom_duration: 40,
            recon_duration: 80,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse a config from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 || self.log_capacity == 0 {
            return Err(SimError::InvalidConfig(
                "history_capacity and log_capacity must be positive".into(),
            ));
        }

        if let Some(s) = self.history_smoothing {
            if !(0.0..1.0).contains(&s) {
                return Err(SimError::InvalidConfig(format!(
                    "history_smoothing ({}) must lie in [0, 1)",
                    s
                )));
            }
        }

        if self.event_check_interval == 0
            || self.war_check_interval == 0
            || self.peace_check_interval == 0
            || self.trade_log_interval == 0
        {
            return Err(SimError::InvalidConfig("check intervals must be positive".into()));
        }

        if !(0.0..=1.0).contains(&self.event_trigger_chance) {
            return Err(SimError::InvalidConfig(format!(
                "event_trigger_chance ({}) must lie in [0, 1]",
                self.event_trigger_chance
            )));
        }

        if self.crisis_duration == 0 || self.boom_duration == 0 || self.recon_duration == 0 {
            return Err(SimError::InvalidConfig("event durations must be positive".into()));
        }

        if self.tick_interval_ms == 0 {
            return Err(SimError::InvalidConfig("tick_interval_ms must be positive".into()));
        }

        Ok(())
    }
}
