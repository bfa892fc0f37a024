//! Simulation output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::conflict::civilization::CivilizationState;
use crate::conflict::events::{ActiveEvent, LogEntry};
use crate::conflict::history::HistorySample;
use crate::conflict::relationship::{Phase, Relationship};
use crate::conflict::world::SimulationContext;
use crate::core::error::Result;
use crate::core::rng::RandomSource;
use crate::core::types::Tick;

const SINGULARITY_DISPLAY: f64 = 1e15;

/// Complete simulation output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub final_world: WorldSnapshot,
    pub history: Vec<HistorySample>,
    pub log: Vec<LogEntry>,
    pub statistics: SimulationStats,
}

/// Serializable snapshot of the final state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub relationship: Relationship,
    pub phase: Phase,
    pub civilizations: [CivilizationState; 2],
    pub events: [Option<ActiveEvent>; 2],
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationStats {
    pub ticks_simulated: Tick,
    pub simulation_time_ms: u64,
    pub wars_declared: u32,
    pub treaties_signed: u32,
    pub crises: u32,
    pub booms: u32,
    pub singularities: u32,
    pub extinct: Option<String>,
}

impl SimulationOutput {
    pub fn new<R: RandomSource>(ctx: &SimulationContext<R>, elapsed: Duration) -> Self {
        let stats = ctx.stats();

        Self {
            final_world: WorldSnapshot {
                tick: ctx.tick(),
                relationship: ctx.relationship(),
                phase: ctx.phase(),
                civilizations: ctx.civs().clone(),
                events: ctx.events,
            },
            history: ctx.history().iter().copied().collect(),
            log: ctx.log().iter().cloned().collect(),
            statistics: SimulationStats {
                ticks_simulated: ctx.tick(),
                simulation_time_ms: elapsed.as_millis() as u64,
                wars_declared: stats.wars_declared,
                treaties_signed: stats.treaties_signed,
                crises: stats.crises,
                booms: stats.booms,
                singularities: stats.singularities,
                extinct: ctx.extinct_civilization().map(str::to_string),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let stats = &self.statistics;
        let mut out = format!(
            "Simulated {} ticks in {}ms ({})\n{} wars, {} treaties, {} crises, {} booms, {} singularities\n",
            stats.ticks_simulated,
            stats.simulation_time_ms,
            self.final_world.phase.label(),
            stats.wars_declared,
            stats.treaties_signed,
            stats.crises,
            stats.booms,
            stats.singularities,
        );

        for civ in &self.final_world.civilizations {
            out.push_str(&civ_line(civ));
            out.push('\n');
        }

        match &stats.extinct {
            Some(name) => out.push_str(&format!("{} went extinct", name)),
            None => out.push_str("Both civilizations survived"),
        }
        out
    }
}

/// One-line status of a civilization
pub fn civ_line(civ: &CivilizationState) -> String {
    format!(
        "{:<6} pop {:>8} tech {:>8} mil {:>8} res {:>8} energy {:>8} morale {:>5.1}{}{}",
        civ.name,
        format_number(civ.population),
        format_number(civ.technology),
        format_number(civ.military),
        format_number(civ.resources),
        format_number(civ.energy),
        civ.morale,
        if civ.is_singularity { " [SINGULARITY]" } else { "" },
        if civ.is_asteroid_mining { " [MINING]" } else { "" },
    )
}

/// Compact display of a non-negative quantity
///
/// `1234.0` -> `"1.2K"`, values from 10^15 up read `"SINGULARITY"`, and
/// anything non-finite or non-positive reads `"0"`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0".to_string();
    }
    if value >= SINGULARITY_DISPLAY {
        return "SINGULARITY".to_string();
    }

    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in UNITS {
        if value >= scale {
            return format!("{:.1}{}", value / scale, suffix);
        }
    }
    format!("{}", value.round())
}
