//! Simulation systems

mod diplomacy;
mod event_control;
mod generation;
mod instinct;
mod trade;
pub mod update;
mod warfare;

pub use diplomacy::{peace_chance, step_relationship, war_chance, RelationshipStep, Transition};
pub use event_control::{start_reconstruction, step_event, EventStep};
pub use generation::{default_identity, generate_civilization, generate_pair, INITIAL_RANGES};
pub use instinct::calculate_instincts;
pub use trade::{apply_trade, compute_trade, TradeFlow};
pub use update::{base_deltas, update_civilization, GrowthDeltas, UpdateResult};
pub use warfare::{calculate_base_military, roll_combat_losses, CombatLosses};
