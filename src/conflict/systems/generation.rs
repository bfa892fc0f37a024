//! Randomized starting configurations

use crate::conflict::civilization::{CivField, CivilizationConfig};
use crate::core::rng::RandomSource;
use crate::core::types::Side;

/// Inclusive integer ranges for freshly generated civilizations
pub const INITIAL_RANGES: [(CivField, i64, i64); 10] = [
    (CivField::Population, 800, 1500),
    (CivField::Technology, 30, 80),
    (CivField::Military, 80, 150),
    (CivField::Resources, 800, 1500),
    (CivField::Energy, 80, 150),
    (CivField::Morale, 70, 95),
    (CivField::Aggressiveness, 40, 75),
    (CivField::Diplomacy, 40, 75),
    (CivField::BaseSurvivalInstinct, 40, 70),
    (CivField::BaseDevelopmentDesire, 40, 70),
];

/// Default name and colors for each side
pub fn default_identity(side: Side) -> (&'static str, &'static str, &'static str) {
    match side {
        Side::A => ("CIV A", "#88ccff", "#3399ff"),
        Side::B => ("CIV B", "#ff9999", "#ff5555"),
    }
}

/// Generate one side's configuration, drawing fields in a fixed order
pub fn generate_civilization<R: RandomSource + ?Sized>(side: Side, rng: &mut R) -> CivilizationConfig {
    let (name, primary, accent) = default_identity(side);
    let mut config = CivilizationConfig::new(name, primary, accent);
    for (field, min, max) in INITIAL_RANGES {
        config.set(field, rng.int_in_range(min, max) as f64);
    }
    config
}

/// Generate both sides, A first
pub fn generate_pair<R: RandomSource + ?Sized>(rng: &mut R) -> [CivilizationConfig; 2] {
    let a = generate_civilization(Side::A, rng);
    let b = generate_civilization(Side::B, rng);
    [a, b]
}
