//! Peacetime trade between the two civilizations

use crate::conflict::civilization::CivilizationState;
use crate::conflict::events::{LogEntry, LogKind};
use crate::core::types::non_negative;

const BASE_TRADE_VOLUME: f64 = 50.0;
const RICHER_SHARE_CAP: f64 = 0.1;
const TECH_TRICKLE: f64 = 0.05;

/// Amounts moved by one round of trade
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TradeFlow {
    /// Resources moved from A to B (negative: B to A)
    pub resources_a_to_b: f64,
    /// Technology moved from A to B (negative: B to A)
    pub technology_a_to_b: f64,
}

/// Compute the transfers implied by both sides' diplomacy
pub fn compute_trade(a: &CivilizationState, b: &CivilizationState) -> TradeFlow {
    if !a.is_alive() || !b.is_alive() {
        return TradeFlow::default();
    }

    let diplomacy_factor = (a.diplomacy + b.diplomacy) / 200.0;
    let base_trade = BASE_TRADE_VOLUME * diplomacy_factor;

    let resources_a_to_b = if a.resources > b.resources {
        base_trade.min(a.resources * RICHER_SHARE_CAP)
    } else if b.resources > a.resources {
        -base_trade.min(b.resources * RICHER_SHARE_CAP)
    } else {
        0.0
    };

    let trickle = TECH_TRICKLE * diplomacy_factor;
    let technology_a_to_b = if a.technology > b.technology {
        trickle.min(a.technology)
    } else if b.technology > a.technology {
        -trickle.min(b.technology)
    } else {
        0.0
    };

    TradeFlow {
        resources_a_to_b: non_finite_to_zero(resources_a_to_b),
        technology_a_to_b: non_finite_to_zero(technology_a_to_b),
    }
}

/// Apply one round of trade, returning a log entry when `log` is set
pub fn apply_trade(
    a: &mut CivilizationState,
    b: &mut CivilizationState,
    tick: u64,
    log: bool,
) -> (TradeFlow, Option<LogEntry>) {
    let flow = compute_trade(a, b);

    a.resources = non_negative(a.resources - flow.resources_a_to_b);
    b.resources = non_negative(b.resources + flow.resources_a_to_b);
    a.technology = non_negative(a.technology - flow.technology_a_to_b);
    b.technology = non_negative(b.technology + flow.technology_a_to_b);

    let entry = (log && flow.resources_a_to_b != 0.0).then(|| {
        let (from, to) = if flow.resources_a_to_b > 0.0 {
            (&a.name, &b.name)
        } else {
            (&b.name, &a.name)
        };
        LogEntry::new(
            tick,
            LogKind::Trade,
            format!(
                "{} ships {:.0} resources to {} under the trade accord.",
                from,
                flow.resources_a_to_b.abs(),
                to
            ),
        )
    });

    (flow, entry)
}

fn non_finite_to_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::civilization::CivilizationConfig;

    fn civ(name: &str, resources: f64, technology: f64, diplomacy: f64) -> CivilizationState {
        let mut config = CivilizationConfig::new(name, "", "");
        config.resources = resources;
        config.technology = technology;
        config.diplomacy = diplomacy;
        CivilizationState::from_config(&config)
    }

    #[test]
    fn test_poorer_side_receives() {
        let mut a = civ("A", 2000.0, 100.0, 50.0);
        let mut b = civ("B", 500.0, 40.0, 50.0);
        let total_res = a.resources + b.resources;
        let total_tech = a.technology + b.technology;

        let (flow, entry) = apply_trade(&mut a, &mut b, 40, true);

        // diplomacy factor 0.5 -> base 25, tech trickle 0.025
        assert!((flow.resources_a_to_b - 25.0).abs() < 1e-12);
        assert!((flow.technology_a_to_b - 0.025).abs() < 1e-12);
        assert!((a.resources + b.resources - total_res).abs() < 1e-9);
        assert!((a.technology + b.technology - total_tech).abs() < 1e-9);
        assert!(b.resources > 500.0);
        assert_eq!(entry.map(|e| e.kind), Some(LogKind::Trade));
    }

    #[test]
    fn test_transfer_capped_by_richer_stock() {
        let a = civ("A", 10.0, 10.0, 100.0);
        let b = civ("B", 100.0, 10.0, 100.0);
        let flow = compute_trade(&a, &b);
        // base trade 50, capped at 10% of 100
        assert!((flow.resources_a_to_b + 10.0).abs() < 1e-12);
        assert_eq!(flow.technology_a_to_b, 0.0);
    }

    #[test]
    fn test_no_trade_with_dead_partner() {
        let a = civ("A", 2000.0, 100.0, 50.0);
        let mut b = civ("B", 100.0, 10.0, 50.0);
        b.population = 0.0;
        assert_eq!(compute_trade(&a, &b), TradeFlow::default());
    }

    #[test]
    fn test_no_log_when_not_requested() {
        let mut a = civ("A", 2000.0, 100.0, 50.0);
        let mut b = civ("B", 500.0, 40.0, 50.0);
        let (_, entry) = apply_trade(&mut a, &mut b, 3, false);
        assert!(entry.is_none());
    }
}
