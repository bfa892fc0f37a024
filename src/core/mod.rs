pub mod calendar;
pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use calendar::Calendar;
pub use config::SimulationConfig;
pub use error::{Result, SimError};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use types::{Side, Tick};
