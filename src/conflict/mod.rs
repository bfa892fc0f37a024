//! Two-civilization conflict simulation
//!
//! A pair of civilizations advance in discrete ticks. Each tick runs the
//! event controller, the per-civilization updater, peacetime trade, the
//! extinction check and the PEACE/WAR relationship machine, then appends a
//! bounded history sample and any log entries.

pub mod civilization;
pub mod driver;
pub mod events;
pub mod history;
pub mod output;
pub mod relationship;
pub mod simulation;
pub mod systems;
pub mod world;

pub use civilization::{CivField, CivilizationConfig, CivilizationState, InstinctFactors};
pub use driver::{DriveResult, InterruptGate, NoOpObserver, StopReason, TickDriver, TickObserver};
pub use events::{ActiveEvent, EventKind, EventLog, LogEntry, LogKind};
pub use history::{CivSample, History, HistorySample};
pub use output::{format_number, SimulationOutput};
pub use relationship::{Phase, Relationship};
pub use simulation::TickReport;
pub use world::{RunStats, SimulationContext};
