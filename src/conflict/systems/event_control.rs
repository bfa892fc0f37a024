//! Per-civilization event controller
//!
//! Each side carries at most one active event. Random CRISIS/BOOM events
//! only trigger on check boundaries; RECON is started by peace treaties.

use crate::conflict::civilization::CivilizationState;
use crate::conflict::events::{ActiveEvent, EventKind, LogEntry, LogKind};
use crate::core::calendar::is_boundary;
use crate::core::config::SimulationConfig;
use crate::core::rng::RandomSource;
use crate::core::types::Tick;

pub const CRISIS_MAX_RESOURCES: f64 = 500.0;
pub const CRISIS_MAX_MORALE: f64 = 50.0;
pub const BOOM_MIN_RESOURCES: f64 = 2000.0;
pub const BOOM_MIN_TECHNOLOGY: f64 = 200.0;

/// Remaining-duration checkpoints that log reconstruction progress
const RECON_MILESTONES: [(u32, &str); 3] = [
    (60, "infrastructure restoration is underway"),
    (50, "the energy grid is back to full capacity"),
    (30, "research networks are back online"),
];

/// Result of stepping one side's event state
#[derive(Debug, Clone, PartialEq)]
pub struct EventStep {
    pub event: Option<ActiveEvent>,
    pub logs: Vec<LogEntry>,
}

/// Advance one civilization's event state by a tick
///
/// An active event counts down first and is dropped at zero. A side with no
/// event rolls on check boundaries against its current status.
pub fn step_event<R: RandomSource + ?Sized>(
    current: Option<ActiveEvent>,
    civ: &CivilizationState,
    tick: Tick,
    config: &SimulationConfig,
    rng: &mut R,
) -> EventStep {
    let mut logs = Vec::new();

    if let Some(mut event) = current {
        event.remaining = event.remaining.saturating_sub(1);

        if event.kind == EventKind::Recon {
            if let Some((_, stage)) = RECON_MILESTONES.iter().find(|(at, _)| *at == event.remaining) {
                logs.push(LogEntry::new(
                    tick,
                    LogKind::Reconstruction,
                    format!("{}: {}.", civ.name, stage),
                ));
            }
        }

        if event.remaining == 0 {
            logs.push(LogEntry::new(
                tick,
                LogKind::Recovery,
                format!("{} has recovered from its {} period.", civ.name, event.kind.label()),
            ));
            return EventStep { event: None, logs };
        }

        return EventStep {
            event: Some(event),
            logs,
        };
    }

    if !civ.is_alive() || !is_boundary(tick, config.event_check_interval) {
        return EventStep { event: None, logs };
    }

    if rng.next_float() >= config.event_trigger_chance {
        return EventStep { event: None, logs };
    }

    let triggered = if civ.resources < CRISIS_MAX_RESOURCES && civ.morale < CRISIS_MAX_MORALE {
        Some(ActiveEvent::new(EventKind::Crisis, config.crisis_duration))
    } else if civ.resources > BOOM_MIN_RESOURCES && civ.technology > BOOM_MIN_TECHNOLOGY {
        Some(ActiveEvent::new(EventKind::Boom, config.boom_duration))
    } else {
        None
    };

    if let Some(event) = triggered {
        let (kind, message) = match event.kind {
            EventKind::Crisis => (
                LogKind::Crisis,
                format!("{} is gripped by a crisis: shortages and unrest spread.", civ.name),
            ),
            _ => (
                LogKind::Boom,
                format!("{} enters an economic boom.", civ.name),
            ),
        };
        tracing::debug!(civ = %civ.name, kind = event.kind.label(), tick, "event started");
        logs.push(LogEntry::new(tick, kind, message));
    }

    EventStep {
        event: triggered,
        logs,
    }
}

/// Start the RECON event a peace treaty grants a surviving civilization
pub fn start_reconstruction(civ: &CivilizationState, tick: Tick, duration: u32) -> (ActiveEvent, LogEntry) {
    let event = ActiveEvent::new(EventKind::Recon, duration);
    let entry = LogEntry::new(
        tick,
        LogKind::Reconstruction,
        format!("{} begins reconstruction.", civ.name),
    );
    (event, entry)
}
