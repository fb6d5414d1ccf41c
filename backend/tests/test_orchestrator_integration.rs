//! Integration tests for the orchestrator tick loop
//!
//! Tests the complete tick loop: macro aggregates, activation order, labour
//! market bookkeeping, inflation warm-up and determinism.

use econ_simulator_core_rs::{
    AgentKind, HouseholdId, ModelConfig, Orchestrator, OrchestratorConfig, SimulationError,
};

fn create_test_config(seed: u64, population: usize) -> OrchestratorConfig {
    OrchestratorConfig {
        rng_seed: seed,
        model: ModelConfig {
            population_size: population,
            ..ModelConfig::default()
        },
        ..OrchestratorConfig::default()
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_orchestrator_initial_state() {
    let orchestrator = Orchestrator::new(create_test_config(12345, 10)).unwrap();

    assert_eq!(orchestrator.current_tick(), 0);
    assert_eq!(orchestrator.population_size(), 10);
    assert!(orchestrator.employment_partition_holds());

    let employed = orchestrator.firm().employment();
    assert!((5..10).contains(&employed), "employed = {}", employed);
    assert_eq!(orchestrator.state().unemployed().len(), 10 - employed);

    // Output starts at initial aggregate demand
    assert!((orchestrator.firm().output() - orchestrator.state().aggregate_demand()).abs() < 1e-9);
    assert_eq!(orchestrator.event_log().events_of_type("WorkforceSeeded").len(), 1);
}

#[test]
fn test_schedule_order() {
    let orchestrator = Orchestrator::new(create_test_config(1, 4)).unwrap();

    assert_eq!(
        orchestrator.schedule(),
        &[
            AgentKind::CentralBank,
            AgentKind::CommercialBank,
            AgentKind::Firm,
            AgentKind::Household(HouseholdId(0)),
            AgentKind::Household(HouseholdId(1)),
            AgentKind::Household(HouseholdId(2)),
            AgentKind::Household(HouseholdId(3)),
        ]
    );
}

#[test]
fn test_invalid_configs_rejected() {
    let mut tiny = create_test_config(1, 1);
    assert!(matches!(
        Orchestrator::new(tiny.clone()),
        Err(SimulationError::InvalidConfig(_))
    ));

    tiny.model.population_size = 10;
    tiny.model.trust = 1.5;
    assert!(matches!(
        Orchestrator::new(tiny.clone()),
        Err(SimulationError::InvalidConfig(_))
    ));

    let mut negative_std = create_test_config(1, 10);
    negative_std.household.wealth_std = -1.0;
    assert!(Orchestrator::new(negative_std).is_err());

    let mut no_warmup = create_test_config(1, 10);
    no_warmup.model.warmup_ticks = 0;
    assert!(Orchestrator::new(no_warmup).is_err());
}

#[test]
fn test_config_from_partial_json() {
    let config =
        OrchestratorConfig::from_json(r#"{"rng_seed": 7, "model": {"population_size": 12}}"#)
            .unwrap();

    assert_eq!(config.rng_seed, 7);
    assert_eq!(config.model.population_size, 12);
    assert_eq!(config.model.trust, 0.8);
    assert_eq!(config.firm, Default::default());

    assert!(matches!(
        OrchestratorConfig::from_json("{not json"),
        Err(SimulationError::InvalidConfig(_))
    ));
}

// ============================================================================
// Tick loop
// ============================================================================

#[test]
fn test_tick_advances_time() {
    let mut orchestrator = Orchestrator::new(create_test_config(3, 10)).unwrap();

    let results = orchestrator.run(5).unwrap();

    assert_eq!(orchestrator.current_tick(), 5);
    let ticks: Vec<usize> = results.iter().map(|r| r.tick).collect();
    assert_eq!(ticks, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_partition_holds_every_tick() {
    let mut orchestrator = Orchestrator::new(create_test_config(2024, 50)).unwrap();

    for _ in 0..60 {
        orchestrator.tick().unwrap();
        assert!(
            orchestrator.employment_partition_holds(),
            "partition broken at tick {}",
            orchestrator.current_tick()
        );
        assert!(orchestrator.firm().employment() >= 1);
    }
}

#[test]
fn test_households_paid_same_tick_wage() {
    let mut orchestrator = Orchestrator::new(create_test_config(77, 20)).unwrap();

    for _ in 0..15 {
        orchestrator.tick().unwrap();

        let ledger = orchestrator.firm().wage_ledger();
        for household in orchestrator.state().households() {
            match ledger.wage(household.id()) {
                Some(wage) => assert_eq!(household.income(), wage),
                None => assert_eq!(household.income(), 0.0),
            }
        }
    }
}

#[test]
fn test_snapshot_aggregates_use_previous_tick() {
    let population = 20;
    let mut orchestrator = Orchestrator::new(create_test_config(31, population)).unwrap();

    for _ in 0..10 {
        orchestrator.tick().unwrap();
        let unemployed = orchestrator.state().unemployed().len();
        let demand = orchestrator.state().aggregate_demand();

        let next = orchestrator.tick().unwrap();
        assert!((next.snapshot.unemployment - unemployed as f64 / population as f64).abs() < 1e-12);
        assert!((next.snapshot.aggregate_demand - demand).abs() < 1e-9);
    }
}

#[test]
fn test_tick_result_counts_match_events() {
    let mut orchestrator = Orchestrator::new(create_test_config(99, 30)).unwrap();
    let results = orchestrator.run(40).unwrap();

    let log = orchestrator.event_log();
    let hired: usize = results.iter().map(|r| r.num_hired).sum();
    let fired: usize = results.iter().map(|r| r.num_fired).sum();
    let constrained: usize = results.iter().map(|r| r.num_credit_constrained).sum();

    assert_eq!(log.events_of_type("Hired").len(), hired);
    assert_eq!(log.events_of_type("Fired").len(), fired);
    assert_eq!(log.events_of_type("CreditConstrained").len(), constrained);
    assert_eq!(log.events_of_type("PolicyRateSet").len(), 40);
    assert_eq!(log.events_of_type("BankRatesUpdated").len(), 40);
    assert_eq!(log.events_of_type("DemandStateDetermined").len(), 40);

    for r in &results {
        let at_tick = log.events_at_tick(r.tick);
        assert!(at_tick
            .iter()
            .any(|e| e.event_type() == "DemandStateDetermined"));
    }
}

// ============================================================================
// Inflation
// ============================================================================

#[test]
fn test_inflation_warmup_then_ema() {
    let mut orchestrator = Orchestrator::new(create_test_config(5, 25)).unwrap();
    orchestrator.run(30).unwrap();

    let snapshots = orchestrator.collector().model_vars();
    let warmup = orchestrator.config().model.warmup_ticks;
    let alpha = orchestrator.config().model.ema_smoothing;

    for s in &snapshots[..warmup] {
        assert_eq!(s.smoothed_inflation, s.actual_inflation, "tick {}", s.tick);
    }

    let mean: f64 = snapshots[..warmup]
        .iter()
        .map(|s| s.actual_inflation)
        .sum::<f64>()
        / warmup as f64;
    assert!((snapshots[warmup].smoothed_inflation - mean).abs() < 1e-12);

    for t in (warmup + 1)..snapshots.len() {
        let expected = alpha * snapshots[t].actual_inflation
            + (1.0 - alpha) * snapshots[t - 1].smoothed_inflation;
        assert!((snapshots[t].smoothed_inflation - expected).abs() < 1e-12);
    }
}

#[test]
fn test_expected_inflation_anchored_on_target() {
    let mut orchestrator = Orchestrator::new(create_test_config(6, 15)).unwrap();
    orchestrator.run(12).unwrap();

    let model = &orchestrator.config().model;
    let snapshots = orchestrator.collector().model_vars();
    for t in 1..snapshots.len() {
        let expected = model.trust * model.inflation_target
            + (1.0 - model.trust) * snapshots[t - 1].actual_inflation;
        assert!((snapshots[t].expected_inflation - expected).abs() < 1e-12);
    }
}

#[test]
fn test_actual_inflation_from_price_path() {
    let mut orchestrator = Orchestrator::new(create_test_config(8, 15)).unwrap();

    for _ in 0..10 {
        orchestrator.tick().unwrap();
        let price = orchestrator.firm().price();
        let prev = orchestrator.firm().prev_price();

        let next = orchestrator.tick().unwrap();
        assert!((next.snapshot.actual_inflation - (price - prev) / prev).abs() < 1e-12);
        assert_eq!(next.snapshot.price, price);
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_reproduces_run() {
    let mut first = Orchestrator::new(create_test_config(42, 10)).unwrap();
    let mut second = Orchestrator::new(create_test_config(42, 10)).unwrap();

    first.run(50).unwrap();
    second.run(50).unwrap();

    assert_eq!(first.collector().model_vars(), second.collector().model_vars());
    assert_eq!(first.collector().agent_vars(), second.collector().agent_vars());
    assert_eq!(first.event_log().len(), second.event_log().len());
}

#[test]
fn test_different_seeds_diverge() {
    let mut first = Orchestrator::new(create_test_config(1, 10)).unwrap();
    let mut second = Orchestrator::new(create_test_config(2, 10)).unwrap();

    first.run(10).unwrap();
    second.run(10).unwrap();

    assert_ne!(first.collector().model_vars(), second.collector().model_vars());
}

#[test]
fn test_ptc_bounded_across_run() {
    let mut orchestrator = Orchestrator::new(create_test_config(13, 30)).unwrap();

    for _ in 0..40 {
        orchestrator.tick().unwrap();
        for household in orchestrator.state().households() {
            assert!((0.0..=1.0).contains(&household.ptc()));
        }
    }
}
