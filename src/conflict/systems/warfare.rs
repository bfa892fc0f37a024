//! Combat attrition while the relationship is WAR

use crate::conflict::civilization::CivilizationState;
use crate::core::rng::RandomSource;
use crate::core::types::non_negative;

/// Smallest military any civilization keeps during war
pub const MIN_MILITARY_FLOOR: f64 = 5.0;
/// Military loss above which a combat report is logged
pub const HEAVY_LOSS_THRESHOLD: f64 = 10.0;

/// Losses one side takes in a tick of fighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatLosses {
    pub military: f64,
    pub population: f64,
    pub resources: f64,
    pub morale: f64,
}

/// Dynamic military floor: armies never fully disarm below this during war
pub fn calculate_base_military(civ: &CivilizationState) -> f64 {
    let raw = (civ.population / 100.0 + civ.resources * 0.005) * (1.0 + civ.technology / 500.0);
    non_negative(raw.round()).max(MIN_MILITARY_FLOOR)
}

/// Roll this tick's losses for `civ` fighting `enemy`
///
/// Draws two values: military loss first, then population loss.
pub fn roll_combat_losses<R: RandomSource + ?Sized>(
    civ: &CivilizationState,
    enemy: &CivilizationState,
    rng: &mut R,
) -> CombatLosses {
    let tech_difference = enemy.technology - civ.technology;
    let power_ratio = non_negative(enemy.military / (civ.military + 1.0));
    let loss_modifier = 1.0 + (power_ratio - 1.0).max(0.0) * 0.5;

    let military = non_negative(
        (rng.next_float() * 5.0 + 2.0) * loss_modifier + (tech_difference * 0.05).max(0.0),
    );
    let population = non_negative(rng.next_float() * 2.5 * loss_modifier);

    CombatLosses {
        military,
        population,
        resources: 20.0 + population * 5.0,
        morale: 1.0 + population * 0.1,
    }
}
