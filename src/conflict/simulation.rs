//! Tick orchestration and the control surface
//!
//! One call to `advance` runs exactly one tick in a fixed order:
//! 1. event controller (A, then B)
//! 2. civilization updates, each reading the other's pre-tick state
//! 3. peacetime trade
//! 4. extinction check (halts the run)
//! 5. relationship state machine
//! 6. history and log append

use serde::{Deserialize, Serialize};

use crate::conflict::civilization::{CivField, CivilizationConfig, CivilizationState};
use crate::conflict::events::{ActiveEvent, EventKind, LogEntry, LogKind};
use crate::conflict::history::HistorySample;
use crate::conflict::relationship::{Phase, Relationship};
use crate::conflict::systems::{self, Transition};
use crate::conflict::world::{RunStats, SimulationContext};
use crate::core::calendar::{is_boundary, Calendar};
use crate::core::error::{Result, SimError};
use crate::core::rng::RandomSource;
use crate::core::types::{Side, Tick};

/// What one tick produced, for display collaborators
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: Tick,
    pub relationship: Relationship,
    pub phase: Phase,
    pub events: [Option<ActiveEvent>; 2],
    pub logs: Vec<LogEntry>,
    pub war_declared_by: Option<Side>,
    pub peace_signed: bool,
    pub extinct: Option<Side>,
    pub sample: HistorySample,
}

impl<R: RandomSource> SimulationContext<R> {
    /// Begin (or resume) scheduling ticks
    pub fn start(&mut self) -> Result<()> {
        self.ensure_not_halted()?;
        if !self.running {
            tracing::info!(tick = self.tick(), "simulation started");
        }
        self.running = true;
        Ok(())
    }

    /// Stop scheduling ticks, keeping all state
    pub fn pause(&mut self) {
        if self.running {
            tracing::info!(tick = self.tick(), "simulation paused");
        }
        self.running = false;
    }

    /// Discard the run and start over with freshly generated civilizations
    pub fn reset(&mut self) {
        let initial = systems::generate_pair(&mut self.rng);
        self.reset_with(initial);
    }

    /// Discard the run and start over from the given configurations
    pub fn reset_with(&mut self, initial: [CivilizationConfig; 2]) {
        self.initial = [initial[0].clamped(), initial[1].clamped()];
        self.civs = [
            CivilizationState::from_config(&self.initial[0]),
            CivilizationState::from_config(&self.initial[1]),
        ];
        self.events = [None, None];
        self.relationship = Relationship::Peace;
        self.calendar = Calendar::new();
        self.running = false;
        self.extinct = None;
        self.history.clear();
        self.log.clear();
        self.stats = RunStats::default();
        tracing::info!(a = %self.civs[0].name, b = %self.civs[1].name, "simulation reset");
    }

    /// Restart from the current (possibly edited) starting configurations
    pub fn reset_to_initial(&mut self) {
        let initial = self.initial.clone();
        self.reset_with(initial);
    }

    /// Edit one starting value from raw user input
    ///
    /// Only allowed while paused and at peace. Before the first tick the
    /// edit also re-seeds that side's live state.
    pub fn edit_initial(&mut self, side: Side, key: &str, raw: &str) -> Result<CivField> {
        if self.running || self.relationship != Relationship::Peace {
            return Err(SimError::NotEditable);
        }

        let field = self.initial[side.index()].set_field(key, raw)?;
        if self.tick() == 0 {
            self.civs[side.index()] = CivilizationState::from_config(&self.initial[side.index()]);
        }
        Ok(field)
    }

    /// Run up to `ticks` ticks, stopping early on extinction
    ///
    /// Returns the number of ticks simulated.
    pub fn run(&mut self, ticks: u64) -> u64 {
        let mut done = 0;
        while done < ticks && self.advance().is_ok() {
            done += 1;
            if self.is_halted() {
                break;
            }
        }
        done
    }

    /// Simulate exactly one tick
    pub fn advance(&mut self) -> Result<TickReport> {
        self.ensure_not_halted()?;

        let tick = self.calendar.advance();
        let mut logs = Vec::new();

        // 1. Event controller
        let mut events = self.events;
        for side in Side::BOTH {
            let i = side.index();
            let step = systems::step_event(self.events[i], &self.civs[i], tick, &self.config, &mut self.rng);
            if self.events[i].is_none() {
                match step.event.map(|e| e.kind) {
                    Some(EventKind::Crisis) => self.stats.crises += 1,
                    Some(EventKind::Boom) => self.stats.booms += 1,
                    _ => {}
                }
            }
            events[i] = step.event;
            logs.extend(step.logs);
        }

        // 2. Civilization updates against pre-tick state
        let [prev_a, prev_b] = &self.civs;
        let update_a = systems::update_civilization(prev_a, prev_b, self.relationship, events[0].as_ref(), tick, &mut self.rng);
        let update_b = systems::update_civilization(prev_b, prev_a, self.relationship, events[1].as_ref(), tick, &mut self.rng);

        for (prev, next) in self.civs.iter().zip([&update_a.civ, &update_b.civ]) {
            if !prev.is_singularity && next.is_singularity {
                self.stats.singularities += 1;
            }
        }
        logs.extend(update_a.logs);
        logs.extend(update_b.logs);
        let mut next = [update_a.civ, update_b.civ];

        // 3. Trade
        if self.relationship == Relationship::Peace && next.iter().all(|c| c.is_alive()) {
            let log_trade = is_boundary(tick, self.config.trade_log_interval);
            let [a, b] = &mut next;
            let (_, entry) = systems::apply_trade(a, b, tick, log_trade);
            logs.extend(entry);
        }

        // 4. Extinction, A checked first
        let extinct = Side::BOTH.into_iter().find(|side| !next[side.index()].is_alive());
        let mut war_declared_by = None;
        let mut peace_signed = false;

        if let Some(side) = extinct {
            let name = &next[side.index()].name;
            tracing::info!(tick, civ = %name, "civilization extinct, halting");
            logs.push(LogEntry::new(
                tick,
                LogKind::Extinction,
                format!("{} has gone extinct. The simulation is over.", name),
            ));
            self.extinct = Some(side);
            self.running = false;
        } else {
            // 5. Relationship
            let step = systems::step_relationship(self.relationship, [&next[0], &next[1]], tick, &self.config, &mut self.rng);
            logs.extend(step.logs);

            match step.transition {
                Some(Transition::WarDeclared { aggressor }) => {
                    self.stats.wars_declared += 1;
                    war_declared_by = Some(aggressor);
                }
                Some(Transition::PeaceSigned) => {
                    self.stats.treaties_signed += 1;
                    peace_signed = true;
                    for side in Side::BOTH {
                        let civ = &next[side.index()];
                        if civ.is_alive() {
                            let (event, entry) = systems::start_reconstruction(civ, tick, self.config.recon_duration);
                            events[side.index()] = Some(event);
                            logs.push(entry);
                        }
                    }
                }
                None => {}
            }
            self.relationship = step.relationship;
        }

        // 6. Commit
        self.civs = next;
        self.events = events;
        let sample = self
            .history
            .record(tick, self.relationship, [&self.civs[0], &self.civs[1]]);
        self.log.extend(logs.iter().cloned());

        tracing::debug!(
            tick,
            relationship = ?self.relationship,
            pop_a = self.civs[0].population,
            pop_b = self.civs[1].population,
            "tick complete"
        );

        Ok(TickReport {
            tick,
            relationship: self.relationship,
            phase: self.phase(),
            events: self.events,
            logs,
            war_declared_by,
            peace_signed,
            extinct,
            sample,
        })
    }

    /// Force the relationship, bypassing the state machine
    ///
    /// Used by scenario drivers and tests to start a run already at war.
    pub fn force_relationship(&mut self, relationship: Relationship) {
        self.relationship = relationship;
    }

    /// Force an active event on one side, replacing any current one
    pub fn force_event(&mut self, side: Side, event: Option<ActiveEvent>) {
        self.events[side.index()] = event;
    }

    fn ensure_not_halted(&self) -> Result<()> {
        match self.extinct_civilization() {
            Some(name) => Err(SimError::SimulationHalted {
                extinct: name.to_string(),
            }),
            None => Ok(()),
        }
    }
}
