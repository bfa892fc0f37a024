//! Instinct factors derived from a civilization's current status

use crate::conflict::civilization::{CivilizationState, InstinctFactors};

const RESOURCE_SCALE: f64 = 5000.0;
const TECH_SCALE: f64 = 500.0;
const STATUS_BOOST: f64 = 1.5;
const BASE_WEIGHT: f64 = 0.5;

/// Survival instinct rises when resources and morale are low; development
/// desire rises with technology and resources. Both are at least 1.0.
pub fn calculate_instincts(civ: &CivilizationState) -> InstinctFactors {
    let normalized_resource = finite_ratio(civ.resources, RESOURCE_SCALE).min(1.0);
    let normalized_morale = finite_ratio(civ.morale, 100.0);
    let normalized_tech = finite_ratio(civ.technology, TECH_SCALE).min(1.0);

    let low_status_boost = (1.0 - normalized_resource * normalized_morale).max(0.0) * STATUS_BOOST;
    let high_status_boost = (normalized_tech * normalized_resource).max(0.0) * STATUS_BOOST;

    InstinctFactors {
        survival_instinct: 1.0 + (civ.base_survival_instinct / 100.0).max(0.0) * BASE_WEIGHT + low_status_boost,
        development_desire: 1.0 + (civ.base_development_desire / 100.0).max(0.0) * BASE_WEIGHT + high_status_boost,
    }
}

fn finite_ratio(value: f64, scale: f64) -> f64 {
    let ratio = value / scale;
    if ratio.is_finite() {
        ratio.max(0.0)
    } else {
        0.0
    }
}
