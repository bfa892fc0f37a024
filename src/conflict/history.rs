//! Rolling history of per-tick samples for charting

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::conflict::civilization::CivilizationState;
use crate::conflict::relationship::Relationship;
use crate::core::types::Tick;

/// One civilization's values at a given tick
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CivSample {
    pub population: f64,
    pub technology: f64,
    pub military: f64,
    pub resources: f64,
    pub energy: f64,
    pub morale: f64,
    pub survival_instinct: f64,
    pub development_desire: f64,
}

impl CivSample {
    pub fn of(civ: &CivilizationState) -> Self {
        Self {
            population: civ.population,
            technology: civ.technology,
            military: civ.military,
            resources: civ.resources,
            energy: civ.energy,
            morale: civ.morale,
            survival_instinct: civ.instinct.survival_instinct,
            development_desire: civ.instinct.development_desire,
        }
    }

    /// `factor * previous + (1 - factor) * self`, field by field
    pub fn blend(&self, previous: &CivSample, factor: f64) -> Self {
        let mix = |prev: f64, cur: f64| factor * prev + (1.0 - factor) * cur;
        Self {
            population: mix(previous.population, self.population),
            technology: mix(previous.technology, self.technology),
            military: mix(previous.military, self.military),
            resources: mix(previous.resources, self.resources),
            energy: mix(previous.energy, self.energy),
            morale: mix(previous.morale, self.morale),
            survival_instinct: mix(previous.survival_instinct, self.survival_instinct),
            development_desire: mix(previous.development_desire, self.development_desire),
        }
    }
}

/// Immutable snapshot appended once per tick
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub tick: Tick,
    pub relationship: Relationship,
    pub civs: [CivSample; 2],
}

/// Capacity-bounded sample buffer with optional smoothing
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct History {
    samples: VecDeque<HistorySample>,
    capacity: usize,
    smoothing: Option<f64>,
}

impl History {
    pub fn new(capacity: usize, smoothing: Option<f64>) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            smoothing: smoothing.filter(|s| (0.0..1.0).contains(s)),
        }
    }

    /// Record the committed state of both civilizations for `tick`
    pub fn record(&mut self, tick: Tick, relationship: Relationship, civs: [&CivilizationState; 2]) -> HistorySample {
        let mut current = [CivSample::of(civs[0]), CivSample::of(civs[1])];

        if let (Some(factor), Some(previous)) = (self.smoothing, self.samples.back()) {
            current = [
                current[0].blend(&previous.civs[0], factor),
                current[1].blend(&previous.civs[1], factor),
            ];
        }

        let sample = HistorySample {
            tick,
            relationship,
            civs: current,
        };

        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        sample
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn smoothing(&self) -> Option<f64> {
        self.smoothing
    }

    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.back()
    }

    pub fn get(&self, tick: Tick) -> Option<&HistorySample> {
        self.samples.iter().find(|s| s.tick == tick)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
