//! Civilization updater
//!
//! Pure per-tick transformation of one civilization. Reads its own previous
//! state, the opponent's previous state, the relationship and the active
//! event; returns the next state plus any log entries. Nothing here mutates
//! shared state.

use crate::conflict::civilization::{CivilizationState, InstinctFactors, PERCENT_MAX};
use crate::conflict::events::{ActiveEvent, EventKind, LogEntry, LogKind};
use crate::conflict::relationship::Relationship;
use crate::conflict::systems::instinct::calculate_instincts;
use crate::conflict::systems::warfare::{calculate_base_military, roll_combat_losses, HEAVY_LOSS_THRESHOLD};
use crate::core::calendar::is_boundary;
use crate::core::rng::RandomSource;
use crate::core::types::{non_negative, Tick};

// === SINGULARITY ===
pub const SINGULARITY_MIN_GROWTH: f64 = 220.0;
pub const SINGULARITY_GROWTH_SHARE: f64 = 0.045;
pub const SINGULARITY_TECH: f64 = 4800.0;
pub const SINGULARITY_ENERGY: f64 = 3200.0;
pub const SINGULARITY_STREAK: u32 = 70;
pub const SINGULARITY_MULTIPLIER: f64 = 4.0;

// === ASTEROID MINING ===
pub const MINING_MIN_TECH: f64 = 800.0;
pub const MINING_START_RESOURCES: f64 = 1200.0;
pub const MINING_STOP_RESOURCES: f64 = 3000.0;
pub const MINING_MIN_GAIN: f64 = 50.0;
pub const MINING_COST_FACTOR: f64 = 0.4;
const MINING_LOG_INTERVAL: u64 = 20;

// === RESOURCES ===
pub const SHORTAGE_THRESHOLD: f64 = 200.0;
const SHORTAGE_LOG_INTERVAL: u64 = 10;
const RESOURCE_SWING_FLOOR: f64 = 2000.0;
const MAX_GAIN_SHARE: f64 = 0.5;
const MAX_LOSS_SHARE: f64 = 0.7;

// === CRISIS ===
const CRISIS_RESOURCE_PENALTY: f64 = 30.0;
const CRISIS_MORALE_PENALTY: f64 = 1.0;

const COMBAT_LOG_INTERVAL: u64 = 15;

/// Per-tick deltas before they are applied to the state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GrowthDeltas {
    pub population: f64,
    pub technology: f64,
    pub resource_gain: f64,
    pub resource_cost: f64,
    pub military: f64,
    pub morale: f64,
    pub energy: f64,
    /// Flat resource loss applied on top of the net resource change
    pub resource_penalty: f64,
    /// Flat morale loss applied regardless of relationship
    pub morale_penalty: f64,
}

impl GrowthDeltas {
    /// Scale the deltas by an active event's modifiers
    pub fn with_event(mut self, kind: Option<EventKind>) -> Self {
        match kind {
            Some(EventKind::Crisis) => {
                self.population *= 0.1;
                self.technology *= 0.2;
                self.military *= 0.1;
                self.energy *= 0.1;
                self.resource_penalty += CRISIS_RESOURCE_PENALTY;
                self.morale_penalty += CRISIS_MORALE_PENALTY;
            }
            Some(EventKind::Boom) => {
                self.population *= 2.0;
                self.resource_gain *= 2.0;
                self.military *= 2.0;
                self.technology *= 1.5;
                self.energy *= 1.5;
                self.morale += 0.5;
            }
            Some(EventKind::Recon) => {
                self.population *= 1.2;
                self.resource_gain *= 1.5;
                self.technology *= 1.3;
                self.energy *= 2.2;
                self.military *= 1.3;
                self.morale += 0.7;
            }
            None => {}
        }
        self
    }

    pub fn net_resources(&self) -> f64 {
        self.resource_gain - self.resource_cost - self.resource_penalty
    }
}

/// Output of one civilization's update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult {
    pub civ: CivilizationState,
    pub logs: Vec<LogEntry>,
}

/// Growth multiplier from resources alone, capped at 2.0
pub fn pop_growth_factor(civ: &CivilizationState) -> f64 {
    non_negative(civ.resources / 800.0).min(2.0)
}

/// Raw growth/cost deltas from the previous state
pub fn base_deltas(
    civ: &CivilizationState,
    instinct: &InstinctFactors,
    relationship: Relationship,
    growth_multiplier: f64,
) -> GrowthDeltas {
    let pop_factor = pop_growth_factor(civ);
    let total_factor = growth_multiplier * pop_factor;
    let desire = instinct.development_desire;

    let (military, morale) = match relationship {
        Relationship::Peace => (
            (civ.technology * 0.05 + civ.resources * 0.005 + civ.aggressiveness * 0.05)
                * pop_factor
                * instinct.survival_instinct,
            0.2 + civ.diplomacy * 0.01,
        ),
        Relationship::War => (0.0, 0.0),
    };

    GrowthDeltas {
        population: civ.population * 0.008 * pop_factor * growth_multiplier * desire * (civ.morale / 80.0),
        technology: (0.3 + civ.energy / 500.0) * total_factor * desire,
        resource_gain: (civ.population * 0.05 + civ.technology * 0.2) * total_factor * desire,
        resource_cost: (civ.military * 0.3 + civ.population * 0.02) / instinct.survival_instinct.sqrt(),
        military,
        morale,
        energy: (civ.technology * 0.25 + civ.resources * 0.005) * desire * total_factor,
        resource_penalty: 0.0,
        morale_penalty: 0.0,
    }
}

/// Track the technology growth streak and promote to singularity
///
/// Returns (is_singularity, streak).
fn check_singularity(prev: &CivilizationState, tick: Tick, logs: &mut Vec<LogEntry>) -> (bool, u32) {
    let growth_rate = prev.technology - prev.last_tech_snapshot;
    let threshold = SINGULARITY_MIN_GROWTH.max(prev.technology * SINGULARITY_GROWTH_SHARE);

    let streak = if growth_rate > threshold {
        prev.singularity_streak.saturating_add(1)
    } else {
        prev.singularity_streak.saturating_sub(1)
    };

    if prev.is_singularity {
        return (true, streak);
    }

    let promoted = prev.technology > SINGULARITY_TECH
        && prev.energy > SINGULARITY_ENERGY
        && streak >= SINGULARITY_STREAK;

    if promoted {
        tracing::info!(civ = %prev.name, tick, "technological singularity reached");
        logs.push(LogEntry::new(
            tick,
            LogKind::Singularity,
            format!("{} has reached the technological singularity.", prev.name),
        ));
    }

    (promoted, streak)
}

/// Toggle asteroid mining and fold its yield into the deltas
fn apply_asteroid_mining(
    prev: &CivilizationState,
    deltas: &mut GrowthDeltas,
    tick: Tick,
    logs: &mut Vec<LogEntry>,
) -> bool {
    let mut active = prev.is_asteroid_mining;

    if !active && prev.technology >= MINING_MIN_TECH && prev.resources < MINING_START_RESOURCES {
        active = true;
        logs.push(LogEntry::new(
            tick,
            LogKind::AsteroidMining,
            format!("{} launches asteroid mining operations.", prev.name),
        ));
    }

    if !active {
        return false;
    }

    let tech_factor = (prev.technology - MINING_MIN_TECH).max(0.0);
    let gain = (tech_factor * 1.2 + prev.population * 0.4).max(MINING_MIN_GAIN);
    deltas.resource_gain += gain;
    deltas.resource_cost *= MINING_COST_FACTOR;

    let stop_level = MINING_STOP_RESOURCES.max(prev.population * 2.5);
    if prev.resources >= stop_level && deltas.resource_gain - deltas.resource_cost > 0.0 {
        logs.push(LogEntry::new(
            tick,
            LogKind::AsteroidMining,
            format!("{} winds down asteroid mining: stockpiles are full.", prev.name),
        ));
        return false;
    }

    if is_boundary(tick, MINING_LOG_INTERVAL) {
        logs.push(LogEntry::new(
            tick,
            LogKind::AsteroidMining,
            format!("{} mined {:.0} resources from the asteroid belt.", prev.name, gain),
        ));
    }

    true
}

/// Bound a resource swing to what the stockpile can absorb in one tick
fn capped_resource_change(current: f64, net: f64) -> f64 {
    if !net.is_finite() {
        return 0.0;
    }
    let max_gain = RESOURCE_SWING_FLOOR.max(current * MAX_GAIN_SHARE);
    let max_loss = RESOURCE_SWING_FLOOR.max(current * MAX_LOSS_SHARE);
    net.clamp(-max_loss, max_gain)
}

/// Advance one civilization by a tick
///
/// Dead civilizations stay dead: population, military and morale are zeroed
/// and no random values are drawn.
pub fn update_civilization<R: RandomSource + ?Sized>(
    prev: &CivilizationState,
    other: &CivilizationState,
    relationship: Relationship,
    event: Option<&ActiveEvent>,
    tick: Tick,
    rng: &mut R,
) -> UpdateResult {
    let mut next = prev.clone();
    let mut logs = Vec::new();

    if prev.population <= 0.0 {
        next.population = 0.0;
        next.military = 0.0;
        next.morale = 0.0;
        next.sanitize();
        next.instinct = calculate_instincts(&next);
        return UpdateResult { civ: next, logs };
    }

    // 1. Instincts
    let instinct = calculate_instincts(prev);
    next.instinct = instinct;

    // 2. Singularity
    let (is_singularity, streak) = check_singularity(prev, tick, &mut logs);
    next.is_singularity = is_singularity;
    next.singularity_streak = streak;
    next.last_tech_snapshot = prev.technology;
    let growth_multiplier = if is_singularity { SINGULARITY_MULTIPLIER } else { 1.0 };

    // 3-4. Raw deltas
    let mut deltas = base_deltas(prev, &instinct, relationship, growth_multiplier);

    // 5. Asteroid mining
    next.is_asteroid_mining = apply_asteroid_mining(prev, &mut deltas, tick, &mut logs);

    // 6. Event modifiers
    let event_kind = event.map(|e| e.kind);
    let deltas = deltas.with_event(event_kind);
    tracing::trace!(civ = %prev.name, tick, ?deltas, "growth deltas");

    // 7. Apply growth
    let mut population = non_negative(prev.population + deltas.population);
    next.technology = non_negative(prev.technology + deltas.technology);
    let mut resources = non_negative(prev.resources + capped_resource_change(prev.resources, deltas.net_resources()));

    let mut upkeep = prev.population * 0.01;
    if event_kind == Some(EventKind::Recon) {
        upkeep *= 0.5;
    }
    next.energy = non_negative(prev.energy + deltas.energy - upkeep);

    let mut morale = non_negative(prev.morale - deltas.morale_penalty);
    let mut military;

    // 8. War resolution
    let war_floor = relationship.is_war().then(|| calculate_base_military(prev));
    if let Some(floor) = war_floor {
        let losses = roll_combat_losses(prev, other, rng);
        military = (prev.military - losses.military).max(floor);
        population = non_negative(population - losses.population);
        resources = non_negative(resources - losses.resources);
        morale = non_negative(morale - losses.morale);

        if losses.military > HEAVY_LOSS_THRESHOLD && is_boundary(tick, COMBAT_LOG_INTERVAL) {
            logs.push(LogEntry::new(
                tick,
                LogKind::Combat,
                format!(
                    "{} suffers heavy losses: {:.0} military units destroyed.",
                    prev.name, losses.military
                ),
            ));
        }
    } else {
        military = non_negative(prev.military + deltas.military);
        morale = (morale + deltas.morale).min(PERCENT_MAX);
    }

    // 9. Resource shortage attrition
    next.is_starving = resources < SHORTAGE_THRESHOLD;
    if next.is_starving {
        let shortage = (SHORTAGE_THRESHOLD - resources) / SHORTAGE_THRESHOLD;
        let pop_loss_rate = 0.01 + shortage * 0.025;
        let mil_loss_rate = 0.02 + shortage * 0.05;

        population = non_negative(population - population * pop_loss_rate);
        military = non_negative(military - military * mil_loss_rate);
        morale = non_negative(morale - (1.0 + shortage * 6.0));

        if !prev.is_starving || is_boundary(tick, SHORTAGE_LOG_INTERVAL) {
            logs.push(LogEntry::new(
                tick,
                LogKind::ResourceShortage,
                format!(
                    "{} is running out of resources: starvation -{:.1}%, demobilization -{:.1}%.",
                    prev.name,
                    pop_loss_rate * 100.0,
                    mil_loss_rate * 100.0
                ),
            ));
        }
    }

    if let Some(floor) = war_floor {
        military = military.max(floor);
    }

    // 10. Final clamps
    next.population = population;
    next.resources = resources;
    next.military = military;
    next.morale = morale;
    next.sanitize();

    UpdateResult { civ: next, logs }
}
