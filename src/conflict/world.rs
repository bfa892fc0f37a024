//! SimulationContext - the state owned by the tick orchestrator

use serde::{Deserialize, Serialize};

use crate::conflict::civilization::{CivilizationConfig, CivilizationState};
use crate::conflict::events::{ActiveEvent, EventKind, EventLog};
use crate::conflict::history::History;
use crate::conflict::relationship::{Phase, Relationship};
use crate::conflict::systems;
use crate::core::calendar::Calendar;
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::rng::{RandomSource, SeededRandom};
use crate::core::types::{Side, Tick};

/// Counters accumulated over a run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub wars_declared: u32,
    pub treaties_signed: u32,
    pub crises: u32,
    pub booms: u32,
    pub singularities: u32,
}

/// Everything one simulation run owns between ticks
///
/// Civilizations are replaced wholesale each tick; nothing else holds
/// references into this state.
pub struct SimulationContext<R: RandomSource = SeededRandom> {
    pub(crate) config: SimulationConfig,
    pub(crate) initial: [CivilizationConfig; 2],
    pub(crate) civs: [CivilizationState; 2],
    pub(crate) events: [Option<ActiveEvent>; 2],
    pub(crate) relationship: Relationship,
    pub(crate) calendar: Calendar,
    pub(crate) running: bool,
    pub(crate) extinct: Option<Side>,
    pub(crate) history: History,
    pub(crate) log: EventLog,
    pub(crate) stats: RunStats,
    pub(crate) rng: R,
}

impl SimulationContext<SeededRandom> {
    /// Context seeded from `config.seed` (or entropy), with random civilizations
    pub fn from_config(config: SimulationConfig) -> Result<Self> {
        let rng = SeededRandom::from_config(config.seed);
        Self::new(config, rng)
    }

    /// Seed of the underlying generator
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl<R: RandomSource> SimulationContext<R> {
    /// Context with randomly generated civilizations drawn from `rng`
    pub fn new(config: SimulationConfig, mut rng: R) -> Result<Self> {
        let initial = systems::generate_pair(&mut rng);
        Self::with_initial(config, rng, initial)
    }

    /// Context with user-specified starting configurations
    pub fn with_initial(config: SimulationConfig, rng: R, initial: [CivilizationConfig; 2]) -> Result<Self> {
        config.validate()?;
        let initial = [initial[0].clamped(), initial[1].clamped()];
        let civs = [
            CivilizationState::from_config(&initial[0]),
            CivilizationState::from_config(&initial[1]),
        ];

        Ok(Self {
            history: History::new(config.history_capacity, config.history_smoothing),
            log: EventLog::new(config.log_capacity),
            config,
            initial,
            civs,
            events: [None, None],
            relationship: Relationship::Peace,
            calendar: Calendar::new(),
            running: false,
            extinct: None,
            stats: RunStats::default(),
            rng,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn civ(&self, side: Side) -> &CivilizationState {
        &self.civs[side.index()]
    }

    pub fn civs(&self) -> &[CivilizationState; 2] {
        &self.civs
    }

    pub fn initial(&self, side: Side) -> &CivilizationConfig {
        &self.initial[side.index()]
    }

    pub fn active_event(&self, side: Side) -> Option<&ActiveEvent> {
        self.events[side.index()].as_ref()
    }

    pub fn relationship(&self) -> Relationship {
        self.relationship
    }

    /// PEACE, WAR, or RECONSTRUCTION while a RECON event runs at peace
    pub fn phase(&self) -> Phase {
        let rebuilding = self
            .events
            .iter()
            .flatten()
            .any(|e| e.kind == EventKind::Recon);
        self.relationship.phase(rebuilding)
    }

    pub fn tick(&self) -> Tick {
        self.calendar.current_tick()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True once a civilization has gone extinct; only a reset clears it
    pub fn is_halted(&self) -> bool {
        self.extinct.is_some()
    }

    pub fn extinct_side(&self) -> Option<Side> {
        self.extinct
    }

    pub fn extinct_civilization(&self) -> Option<&str> {
        self.extinct.map(|side| self.civs[side.index()].name.as_str())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}
