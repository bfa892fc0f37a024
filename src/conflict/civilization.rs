//! Civilization records and their editable initial configuration

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::non_negative;

/// Upper bound for morale and for the policy/instinct percentages
pub const PERCENT_MAX: f64 = 100.0;

/// Dimensionless multipliers derived from a civilization's current status
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstinctFactors {
    pub survival_instinct: f64,
    pub development_desire: f64,
}

impl Default for InstinctFactors {
    fn default() -> Self {
        Self {
            survival_instinct: 1.0,
            development_desire: 1.0,
        }
    }
}

/// Editable fields of a civilization's starting configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CivField {
    Name,
    ColorPrimary,
    ColorAccent,
    Population,
    Technology,
    Military,
    Resources,
    Energy,
    Morale,
    Aggressiveness,
    Diplomacy,
    BaseSurvivalInstinct,
    BaseDevelopmentDesire,
}

impl CivField {
    pub const NUMERIC: [CivField; 10] = [
        CivField::Population,
        CivField::Technology,
        CivField::Military,
        CivField::Resources,
        CivField::Energy,
        CivField::Morale,
        CivField::Aggressiveness,
        CivField::Diplomacy,
        CivField::BaseSurvivalInstinct,
        CivField::BaseDevelopmentDesire,
    ];

    /// Accepts snake_case and camelCase spellings
    pub fn parse(key: &str) -> Option<CivField> {
        let normalized: String = key
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let field = match normalized.as_str() {
            "name" => CivField::Name,
            "color" | "colorprimary" => CivField::ColorPrimary,
            "accent" | "coloraccent" => CivField::ColorAccent,
            "population" | "pop" => CivField::Population,
            "technology" | "tech" => CivField::Technology,
            "military" | "mil" => CivField::Military,
            "resources" | "res" => CivField::Resources,
            "energy" => CivField::Energy,
            "morale" => CivField::Morale,
            "aggressiveness" | "agg" => CivField::Aggressiveness,
            "diplomacy" | "dip" => CivField::Diplomacy,
            "basesurvivalinstinct" | "survival" => CivField::BaseSurvivalInstinct,
            "basedevelopmentdesire" | "development" => CivField::BaseDevelopmentDesire,
            _ => return None,
        };
        Some(field)
    }

    pub fn label(self) -> &'static str {
        match self {
            CivField::Name => "name",
            CivField::ColorPrimary => "color_primary",
            CivField::ColorAccent => "color_accent",
            CivField::Population => "population",
            CivField::Technology => "technology",
            CivField::Military => "military",
            CivField::Resources => "resources",
            CivField::Energy => "energy",
            CivField::Morale => "morale",
            CivField::Aggressiveness => "aggressiveness",
            CivField::Diplomacy => "diplomacy",
            CivField::BaseSurvivalInstinct => "base_survival_instinct",
            CivField::BaseDevelopmentDesire => "base_development_desire",
        }
    }

    /// Clamp a parsed value into this field's domain
    fn clamp(self, value: f64) -> f64 {
        match self {
            CivField::Morale
            | CivField::Aggressiveness
            | CivField::Diplomacy
            | CivField::BaseSurvivalInstinct
            | CivField::BaseDevelopmentDesire => non_negative(value).min(PERCENT_MAX),
            _ => non_negative(value),
        }
    }
}

/// Starting values for one civilization, edited before a run begins
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CivilizationConfig {
    pub name: String,
    pub color_primary: String,
    pub color_accent: String,

    pub population: f64,
    pub technology: f64,
    pub military: f64,
    pub resources: f64,
    pub energy: f64,
    pub morale: f64,

    pub aggressiveness: f64,
    pub diplomacy: f64,
    pub base_survival_instinct: f64,
    pub base_development_desire: f64,
}

impl CivilizationConfig {
    /// Mid-range starting values with the given identity
    pub fn new(name: impl Into<String>, color_primary: impl Into<String>, color_accent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_primary: color_primary.into(),
            color_accent: color_accent.into(),
            population: 1000.0,
            technology: 50.0,
            military: 100.0,
            resources: 1000.0,
            energy: 100.0,
            morale: 80.0,
            aggressiveness: 50.0,
            diplomacy: 50.0,
            base_survival_instinct: 50.0,
            base_development_desire: 50.0,
        }
    }

    pub fn get(&self, field: CivField) -> Option<f64> {
        let value = match field {
            CivField::Population => self.population,
            CivField::Technology => self.technology,
            CivField::Military => self.military,
            CivField::Resources => self.resources,
            CivField::Energy => self.energy,
            CivField::Morale => self.morale,
            CivField::Aggressiveness => self.aggressiveness,
            CivField::Diplomacy => self.diplomacy,
            CivField::BaseSurvivalInstinct => self.base_survival_instinct,
            CivField::BaseDevelopmentDesire => self.base_development_desire,
            CivField::Name | CivField::ColorPrimary | CivField::ColorAccent => return None,
        };
        Some(value)
    }

    /// Store a numeric field, clamped to its domain
    pub fn set(&mut self, field: CivField, value: f64) {
        let value = field.clamp(value);
        match field {
            CivField::Population => self.population = value,
            CivField::Technology => self.technology = value,
            CivField::Military => self.military = value,
            CivField::Resources => self.resources = value,
            CivField::Energy => self.energy = value,
            CivField::Morale => self.morale = value,
            CivField::Aggressiveness => self.aggressiveness = value,
            CivField::Diplomacy => self.diplomacy = value,
            CivField::BaseSurvivalInstinct => self.base_survival_instinct = value,
            CivField::BaseDevelopmentDesire => self.base_development_desire = value,
            CivField::Name | CivField::ColorPrimary | CivField::ColorAccent => {}
        }
    }

    /// Apply a raw edit as typed by the user
    ///
    /// Malformed numbers are rejected and the previous value is kept.
    pub fn set_field(&mut self, key: &str, raw: &str) -> Result<CivField> {
        let field = CivField::parse(key).ok_or_else(|| SimError::UnknownField(key.to_string()))?;
        let raw = raw.trim();

        match field {
            CivField::Name | CivField::ColorPrimary | CivField::ColorAccent => {
                if raw.is_empty() {
                    return Err(SimError::InvalidInput {
                        field: field.label().to_string(),
                        value: raw.to_string(),
                    });
                }
                let slot = match field {
                    CivField::Name => &mut self.name,
                    CivField::ColorPrimary => &mut self.color_primary,
                    _ => &mut self.color_accent,
                };
                *slot = raw.to_string();
            }
            _ => {
                let value = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| SimError::InvalidInput {
                        field: field.label().to_string(),
                        value: raw.to_string(),
                    })?;
                self.set(field, value);
            }
        }

        Ok(field)
    }

    /// Copy with every numeric field forced into its domain
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        for field in CivField::NUMERIC {
            if let Some(value) = self.get(field) {
                out.set(field, value);
            }
        }
        out
    }
}

/// One civilization's state between ticks
///
/// Replaced wholesale by the updater every tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CivilizationState {
    pub name: String,
    pub color_primary: String,
    pub color_accent: String,

    pub population: f64,
    pub technology: f64,
    pub military: f64,
    pub resources: f64,
    pub energy: f64,
    pub morale: f64,

    pub aggressiveness: f64,
    pub diplomacy: f64,
    pub base_survival_instinct: f64,
    pub base_development_desire: f64,

    /// One-way flag: never cleared within a run
    pub is_singularity: bool,
    pub is_asteroid_mining: bool,
    /// Whether the last update ran shortage attrition
    pub is_starving: bool,

    /// Recomputed every tick, exposed for history and display
    pub instinct: InstinctFactors,

    // Singularity tracking
    pub last_tech_snapshot: f64,
    pub singularity_streak: u32,
}

impl CivilizationState {
    pub fn from_config(config: &CivilizationConfig) -> Self {
        let config = config.clamped();
        Self {
            name: config.name,
            color_primary: config.color_primary,
            color_accent: config.color_accent,
            population: config.population,
            technology: config.technology,
            military: config.military,
            resources: config.resources,
            energy: config.energy,
            morale: config.morale,
            aggressiveness: config.aggressiveness,
            diplomacy: config.diplomacy,
            base_survival_instinct: config.base_survival_instinct,
            base_development_desire: config.base_development_desire,
            is_singularity: false,
            is_asteroid_mining: false,
            is_starving: false,
            instinct: InstinctFactors::default(),
            last_tech_snapshot: config.technology,
            singularity_streak: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.population > 0.0
    }

    /// Force every numeric field into its domain, coercing NaN/Infinity to 0
    pub fn sanitize(&mut self) {
        self.population = non_negative(self.population);
        self.technology = non_negative(self.technology);
        self.military = non_negative(self.military);
        self.resources = non_negative(self.resources);
        self.energy = non_negative(self.energy);
        self.morale = non_negative(self.morale).min(PERCENT_MAX);
    }
}
