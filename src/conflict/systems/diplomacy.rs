//! Relationship state machine
//!
//! PEACE -> WAR is rolled on war check boundaries, WAR -> PEACE on peace
//! check boundaries. Nothing is re-checked between boundaries.

use crate::conflict::civilization::CivilizationState;
use crate::conflict::events::{LogEntry, LogKind};
use crate::conflict::relationship::Relationship;
use crate::core::calendar::is_boundary;
use crate::core::config::SimulationConfig;
use crate::core::rng::RandomSource;
use crate::core::types::{Side, Tick};

const PEACE_BASE_CHANCE: f64 = 0.05;
const PEACE_RATIO_WEIGHT: f64 = 0.1;
const PEACE_CHANCE_CAP: f64 = 0.5;

/// A change of relationship made this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    WarDeclared { aggressor: Side },
    PeaceSigned,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipStep {
    pub relationship: Relationship,
    pub transition: Option<Transition>,
    pub logs: Vec<LogEntry>,
}

/// Probability of war breaking out on a war check boundary
pub fn war_chance(a: &CivilizationState, b: &CivilizationState) -> f64 {
    let aggression = (a.aggressiveness + b.aggressiveness) / 200.0 * 0.4;
    let diplomacy = (a.diplomacy + b.diplomacy) / 2.0 / 100.0 * 0.2;

    let strongest = a.military.max(b.military);
    let parity = a.military.min(b.military) / strongest;
    let parity = if parity.is_finite() { parity } else { 0.0 };

    aggression - diplomacy + 0.05 * parity
}

/// Diplomacy-driven part of the peace roll, on top of the 5% base
pub fn peace_chance(a: &CivilizationState, b: &CivilizationState) -> f64 {
    let ratio = (a.diplomacy + b.diplomacy) / (a.aggressiveness + b.aggressiveness + 1.0);
    if ratio.is_finite() {
        (ratio * PEACE_RATIO_WEIGHT).clamp(0.0, PEACE_CHANCE_CAP)
    } else {
        0.0
    }
}

/// Evaluate the relationship for this tick
///
/// Draws one value only when the current state has a check on this tick.
pub fn step_relationship<R: RandomSource + ?Sized>(
    current: Relationship,
    civs: [&CivilizationState; 2],
    tick: Tick,
    config: &SimulationConfig,
    rng: &mut R,
) -> RelationshipStep {
    let [a, b] = civs;
    let unchanged = RelationshipStep {
        relationship: current,
        transition: None,
        logs: Vec::new(),
    };

    match current {
        Relationship::Peace => {
            if !is_boundary(tick, config.war_check_interval) {
                return unchanged;
            }
            let chance = war_chance(a, b);
            if rng.next_float() >= chance {
                return unchanged;
            }

            let aggressor = if b.aggressiveness > a.aggressiveness { Side::B } else { Side::A };
            let (attacker, defender) = match aggressor {
                Side::A => (a, b),
                Side::B => (b, a),
            };
            tracing::info!(tick, aggressor = %attacker.name, chance, "war declared");

            RelationshipStep {
                relationship: Relationship::War,
                transition: Some(Transition::WarDeclared { aggressor }),
                logs: vec![LogEntry::new(
                    tick,
                    LogKind::War,
                    format!("{} declares war on {}!", attacker.name, defender.name),
                )],
            }
        }
        Relationship::War => {
            if !is_boundary(tick, config.peace_check_interval) {
                return unchanged;
            }
            let chance = PEACE_BASE_CHANCE + peace_chance(a, b);
            if rng.next_float() >= chance {
                return unchanged;
            }

            tracing::info!(tick, chance, "peace treaty signed");

            RelationshipStep {
                relationship: Relationship::Peace,
                transition: Some(Transition::PeaceSigned),
                logs: vec![LogEntry::new(
                    tick,
                    LogKind::Peace,
                    format!("{} and {} sign a peace treaty.", a.name, b.name),
                )],
            }
        }
    }
}
