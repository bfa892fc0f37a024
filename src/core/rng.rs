//! Injected random sources
//!
//! Every roll the simulation makes (event triggers, combat losses, war and
//! peace checks, initial values on reset) goes through a single
//! `RandomSource` owned by the simulation context.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A sequential source of uniform floats in [0, 1)
pub trait RandomSource {
    fn next_float(&mut self) -> f64;

    /// Uniform integer in `min..=max`
    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        let span = (max - min + 1) as f64;
        let offset = (self.next_float() * span).floor() as i64;
        min + offset.min(max - min)
    }
}

/// Deterministic ChaCha-backed source
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from entropy; the chosen seed is kept so the run can be replayed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn from_config(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_float(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Values are clamped into [0, 1); an empty script always yields 0.0
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, 0.999_999) } else { 0.0 })
            .collect();
        Self { values, cursor: 0 }
    }

    /// A source that always returns the same value
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_float(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
