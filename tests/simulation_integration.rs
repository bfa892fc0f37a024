//! Integration tests for the tick orchestrator
//!
//! These drive full simulation runs through the public API and check the
//! cross-module guarantees:
//! - Domain bounds and singularity monotonicity over long runs
//! - Determinism under a fixed seed
//! - Reset idempotence
//! - Extinction halting, including simultaneous extinction
//! - Restarting from edited starting values
//! - History samples matching committed state, smoothed and unsmoothed

use civ_conflict::conflict::history::CivSample;
use civ_conflict::conflict::systems::{self, calculate_base_military};
use civ_conflict::conflict::{
    CivilizationConfig, CivilizationState, EventKind, LogKind, Phase, Relationship, SimulationContext,
};
use civ_conflict::core::{ScriptedRandom, SeededRandom, SimError, SimulationConfig, Side};

fn default_pair() -> [CivilizationConfig; 2] {
    [
        CivilizationConfig::new("CIV A", "#88ccff", "#3399ff"),
        CivilizationConfig::new("CIV B", "#ff9999", "#ff5555"),
    ]
}

fn seeded(seed: u64) -> SimulationContext {
    SimulationContext::from_config(SimulationConfig::seeded(seed)).unwrap()
}

fn assert_in_domain(civ: &CivilizationState) {
    for (label, value) in [
        ("population", civ.population),
        ("technology", civ.technology),
        ("military", civ.military),
        ("resources", civ.resources),
        ("energy", civ.energy),
    ] {
        assert!(value.is_finite() && value >= 0.0, "{} {} = {}", civ.name, label, value);
    }
    assert!((0.0..=100.0).contains(&civ.morale), "{} morale = {}", civ.name, civ.morale);
}

#[test]
fn test_long_runs_stay_in_domain() {
    for seed in [1, 7, 42, 1234, 9999] {
        let mut ctx = seeded(seed);
        let mut singular = [false, false];

        for _ in 0..1500 {
            if ctx.advance().is_err() {
                break;
            }
            for side in Side::BOTH {
                let civ = ctx.civ(side);
                assert_in_domain(civ);
                assert!(
                    !singular[side.index()] || civ.is_singularity,
                    "singularity revoked for {} (seed {})",
                    civ.name,
                    seed
                );
                singular[side.index()] = civ.is_singularity;
            }
        }
    }
}

#[test]
fn test_military_floor_holds_during_war() {
    for seed in [3, 11, 29] {
        let mut ctx = seeded(seed);
        ctx.force_relationship(Relationship::War);

        for _ in 0..600 {
            let at_war = ctx.relationship() == Relationship::War;
            let before = ctx.civs().clone();
            if ctx.advance().is_err() {
                break;
            }
            if at_war {
                for side in Side::BOTH {
                    if before[side.index()].is_alive() {
                        let floor = calculate_base_military(&before[side.index()]);
                        assert!(ctx.civ(side).military >= floor, "tick {}", ctx.tick());
                    }
                }
            }
        }
    }
}

#[test]
fn test_forced_war_with_no_military_gets_floor() {
    let mut initial = default_pair();
    initial[0].military = 0.0;
    let mut ctx =
        SimulationContext::with_initial(SimulationConfig::default(), SeededRandom::new(5), initial).unwrap();
    ctx.force_relationship(Relationship::War);
    let before = ctx.civ(Side::A).clone();

    ctx.advance().unwrap();
    assert_eq!(ctx.civ(Side::A).military, calculate_base_military(&before));
}

#[test]
fn test_same_seed_same_run() {
    let mut first = seeded(77);
    let mut second = seeded(77);
    assert_eq!(first.initial(Side::A), second.initial(Side::A));

    for _ in 0..800 {
        let a = first.advance();
        let b = second.advance();
        match (a, b) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(_), Err(_)) => break,
            _ => panic!("runs diverged at tick {}", first.tick()),
        }
        assert_eq!(first.civs(), second.civs());
    }
    assert_eq!(
        first.log().iter().collect::<Vec<_>>(),
        second.log().iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_scripted_runs_are_identical() {
    let script = vec![0.3, 0.01, 0.7, 0.12, 0.95, 0.5];
    let mut first =
        SimulationContext::with_initial(SimulationConfig::default(), ScriptedRandom::new(script.clone()), default_pair())
            .unwrap();
    let mut second =
        SimulationContext::with_initial(SimulationConfig::default(), ScriptedRandom::new(script), default_pair())
            .unwrap();

    first.run(300);
    second.run(300);
    assert_eq!(first.civs(), second.civs());
    assert_eq!(
        first.history().iter().collect::<Vec<_>>(),
        second.history().iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_reset_twice_is_fresh() {
    let mut ctx = seeded(12);
    ctx.force_relationship(Relationship::War);
    ctx.run(120);

    for _ in 0..2 {
        ctx.reset();
        assert_eq!(ctx.tick(), 0);
        assert_eq!(ctx.relationship(), Relationship::Peace);
        assert_eq!(ctx.phase(), Phase::Peace);
        assert!(ctx.history().is_empty());
        assert!(ctx.log().is_empty());
        assert!(!ctx.is_running());
        assert!(!ctx.is_halted());
        for side in Side::BOTH {
            assert!(ctx.active_event(side).is_none());
            assert!(ctx.civ(side).is_alive());
            assert!(!ctx.civ(side).is_singularity);
        }
    }
}

#[test]
fn test_simultaneous_extinction_reports_once() {
    let mut initial = default_pair();
    initial[0].population = 0.0;
    initial[1].population = 0.0;
    let mut ctx =
        SimulationContext::with_initial(SimulationConfig::default(), SeededRandom::new(1), initial).unwrap();
    ctx.start().unwrap();

    let report = ctx.advance().unwrap();
    assert_eq!(report.extinct, Some(Side::A));
    assert_eq!(ctx.extinct_civilization(), Some("CIV A"));
    assert_eq!(ctx.log().entries_of_kind(LogKind::Extinction).count(), 1);
    assert!(!ctx.is_running());

    match ctx.advance() {
        Err(SimError::SimulationHalted { extinct }) => assert_eq!(extinct, "CIV A"),
        other => panic!("expected halt, got {:?}", other.map(|r| r.tick)),
    }
    assert_eq!(ctx.history().len(), 1);
}

#[test]
fn test_both_sides_wiped_out_in_one_war_tick() {
    let mut initial = default_pair();
    initial[0].population = 1.0;
    initial[1].population = 1.0;
    // High rolls: each side loses well over one population unit in combat
    let mut ctx =
        SimulationContext::with_initial(SimulationConfig::default(), ScriptedRandom::constant(0.99), initial).unwrap();
    ctx.force_relationship(Relationship::War);
    assert!(ctx.civs().iter().all(|c| c.is_alive()));

    let report = ctx.advance().unwrap();
    assert_eq!(report.tick, 1);
    assert_eq!(report.extinct, Some(Side::A));
    assert_eq!(ctx.civ(Side::A).population, 0.0);
    assert_eq!(ctx.civ(Side::B).population, 0.0);
    assert_eq!(ctx.log().entries_of_kind(LogKind::Extinction).count(), 1);
    assert_eq!(ctx.extinct_civilization(), Some("CIV A"));
    assert!(ctx.is_halted());
    assert!(matches!(ctx.advance(), Err(SimError::SimulationHalted { .. })));
}

#[test]
fn test_restart_after_extinction_uses_edited_values() {
    let mut initial = default_pair();
    initial[0].population = 0.0;
    let mut ctx =
        SimulationContext::with_initial(SimulationConfig::default(), SeededRandom::new(3), initial).unwrap();
    ctx.advance().unwrap();
    assert!(ctx.is_halted());

    ctx.edit_initial(Side::A, "population", "750").unwrap();
    assert_eq!(ctx.civ(Side::A).population, 0.0);

    ctx.reset_to_initial();
    assert!(!ctx.is_halted());
    assert_eq!(ctx.tick(), 0);
    assert_eq!(ctx.civ(Side::A).population, 750.0);
    assert!(ctx.advance().is_ok());
}

#[test]
fn test_history_matches_committed_state() {
    let mut ctx = seeded(21);
    for _ in 0..200 {
        let Ok(report) = ctx.advance() else {
            break;
        };
        let latest = ctx.history().latest().unwrap();
        assert_eq!(latest, &report.sample);
        assert_eq!(latest.tick, ctx.tick());
        assert_eq!(latest.relationship, ctx.relationship());
        assert_eq!(latest.civs[0], CivSample::of(ctx.civ(Side::A)));
        assert_eq!(latest.civs[1], CivSample::of(ctx.civ(Side::B)));
    }
}

#[test]
fn test_smoothed_history_is_linear_blend() {
    let config = SimulationConfig {
        history_smoothing: Some(0.25),
        ..SimulationConfig::seeded(21)
    };
    let mut ctx = SimulationContext::from_config(config).unwrap();

    let first = ctx.advance().unwrap().sample;
    assert_eq!(first.civs[0], CivSample::of(ctx.civ(Side::A)));

    let mut previous = first;
    for _ in 0..100 {
        let Ok(report) = ctx.advance() else {
            break;
        };
        let sample = report.sample;
        for side in Side::BOTH {
            let expected = CivSample::of(ctx.civ(side)).blend(&previous.civs[side.index()], 0.25);
            assert_eq!(sample.civs[side.index()], expected);
        }
        previous = sample;
    }
}

#[test]
fn test_history_and_log_are_bounded() {
    let config = SimulationConfig {
        history_capacity: 50,
        log_capacity: 5,
        ..SimulationConfig::seeded(4)
    };
    let mut ctx = SimulationContext::from_config(config).unwrap();
    ctx.force_relationship(Relationship::War);
    let ran = ctx.run(300);

    assert_eq!(ctx.history().len(), 50.min(ran as usize));
    assert!(ctx.log().len() <= 5);
    let oldest = ctx.history().iter().next().unwrap().tick;
    assert_eq!(oldest, ctx.tick() - ctx.history().len() as u64 + 1);
}

#[test]
fn test_starvation_tick() {
    let mut config = CivilizationConfig::new("CIV A", "", "");
    config.resources = 0.0;
    config.morale = 0.0;
    config.population = 100.0;
    let starving = CivilizationState::from_config(&config);
    let rival = CivilizationState::from_config(&default_pair()[1]);

    let mut rng = SeededRandom::new(0);
    let result = systems::update_civilization(&starving, &rival, Relationship::Peace, None, 1, &mut rng);

    assert!(result.civ.population < starving.population);
    assert!(result.civ.resources <= starving.resources);
    assert!(result.logs.iter().any(|l| l.kind == LogKind::ResourceShortage));
}

#[test]
fn test_edit_boundary() {
    let mut ctx =
        SimulationContext::with_initial(SimulationConfig::default(), SeededRandom::new(9), default_pair()).unwrap();

    assert!(matches!(
        ctx.edit_initial(Side::A, "population", "lots"),
        Err(SimError::InvalidInput { .. })
    ));
    assert!(matches!(
        ctx.edit_initial(Side::A, "happiness", "10"),
        Err(SimError::UnknownField(_))
    ));

    ctx.edit_initial(Side::B, "morale", "250").unwrap();
    assert_eq!(ctx.civ(Side::B).morale, 100.0);

    ctx.start().unwrap();
    assert!(matches!(ctx.edit_initial(Side::B, "morale", "10"), Err(SimError::NotEditable)));
}

#[test]
fn test_peace_treaty_starts_reconstruction_for_both() {
    // Every roll succeeds, so the first peace check signs a treaty
    let mut ctx =
        SimulationContext::with_initial(SimulationConfig::default(), ScriptedRandom::constant(0.0), default_pair())
            .unwrap();
    ctx.force_relationship(Relationship::War);
    ctx.run(30);

    assert_eq!(ctx.relationship(), Relationship::Peace);
    assert_eq!(ctx.phase(), Phase::Reconstruction);
    assert_eq!(ctx.stats().treaties_signed, 1);
    for side in Side::BOTH {
        assert_eq!(ctx.active_event(side).map(|e| e.kind), Some(EventKind::Recon));
    }
}

#[test]
fn test_random_source_drives_reset() {
    let mut rng = SeededRandom::new(31);
    let expected = systems::generate_pair(&mut rng);

    let mut ctx = SimulationContext::new(SimulationConfig::default(), SeededRandom::new(31)).unwrap();
    assert_eq!(ctx.initial(Side::A), &expected[0]);
    assert_eq!(ctx.initial(Side::B), &expected[1]);

    ctx.reset();
    assert_ne!(ctx.initial(Side::A), &expected[0]);
}
