use super::support::*;
use super::*;

#[test]
fn config_validation_rejects_zero_dimensions() {
    let mut cfg = PondConfig::default();
    cfg.width = 0;
    let err = Simulation::new(cfg, 1).expect_err("config should be rejected");
    assert!(err.to_string().contains("dimensions"));
}

#[test]
fn config_validation_rejects_overfull_pond() {
    let mut cfg = PondConfig::default();
    cfg.width = 3;
    cfg.height = 3;
    let err = Simulation::new(cfg, 1).expect_err("config should be rejected");
    assert!(err.to_string().contains("fit within the pond"));
}

#[test]
fn config_validation_rejects_zero_species_parameters() {
    let mut cfg = PondConfig::default();
    cfg.pike.max_hunger_ticks = 0;
    let err = Simulation::new(cfg, 1).expect_err("config should be rejected");
    assert!(err.to_string().contains("max_hunger_ticks"));
}

#[test]
fn initial_population_matches_config() {
    let sim = Simulation::new(PondConfig::default(), 42).expect("simulation should initialize");
    assert_eq!(sim.pikes.len(), 5);
    assert_eq!(sim.carps.len(), 20);
    assert_eq!(sim.metrics().pikes, 5);
    assert_eq!(sim.metrics().carps, 20);
    assert_grid_consistent(&sim);
}

#[test]
fn same_seed_runs_are_identical() {
    let mut a = Simulation::new(PondConfig::default(), 42).expect("simulation should initialize");
    a.step_n(20).expect("run should complete");
    let a_snapshot = serde_json::to_string(&a.snapshot()).expect("serialize snapshot");

    let mut b = Simulation::new(PondConfig::default(), 42).expect("simulation should initialize");
    b.step_n(20).expect("run should complete");
    let b_snapshot = serde_json::to_string(&b.snapshot()).expect("serialize snapshot");

    assert_eq!(a_snapshot, b_snapshot);
}

#[test]
fn different_seeds_diverge() {
    let mut a = Simulation::new(PondConfig::default(), 1).expect("simulation should initialize");
    a.step_n(5).expect("run should complete");
    let mut b = Simulation::new(PondConfig::default(), 2).expect("simulation should initialize");
    b.step_n(5).expect("run should complete");

    assert_ne!(a.snapshot().occupancy, b.snapshot().occupancy);
}

#[test]
fn reset_reproduces_a_fresh_run() {
    let mut sim = Simulation::new(PondConfig::default(), 42).expect("simulation should initialize");
    sim.step_n(10).expect("run should complete");
    sim.reset(Some(42)).expect("reset should succeed");

    let fresh = Simulation::new(PondConfig::default(), 42).expect("simulation should initialize");
    assert_eq!(
        serde_json::to_string(&sim.snapshot()).expect("serialize snapshot"),
        serde_json::to_string(&fresh.snapshot()).expect("serialize snapshot"),
    );
}
