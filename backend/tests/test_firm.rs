//! Firm labour-market tests
//!
//! Scenarios are built from zero-variance households so wages and hiring
//! targets are exact.

use econ_simulator_core_rs::{
    DemandState, Firm, FirmConfig, FirmError, Household, HouseholdConfig, HouseholdId,
    MarketConditions, RngManager, SimulationState, UnemployedPool,
};

/// Households with productivity 1, wealth 100, desired consumption 20
fn flat_households(n: usize) -> Vec<Household> {
    let params = HouseholdConfig {
        consumption_std: 0.0,
        productivity_std: 0.0,
        wealth_std: 0.0,
        ..HouseholdConfig::default()
    };
    let mut rng = RngManager::new(1);
    (0..n)
        .map(|i| Household::new(HouseholdId(i), &params, &mut rng))
        .collect()
}

fn firm_with(firing_responsiveness: f64, output: f64, employed: usize) -> Firm {
    let config = FirmConfig {
        firing_responsiveness,
        ..FirmConfig::default()
    };
    let mut firm = Firm::new(&config, output);
    for i in 0..employed {
        firm.hire_at(HouseholdId(i), 0.0);
    }
    firm
}

fn market(aggregate_demand: f64, unemployment: f64) -> MarketConditions {
    MarketConditions {
        aggregate_demand,
        expected_inflation: 0.0,
        unemployment,
        policy_rate: 0.1,
    }
}

// ============================================================================
// Demand state
// ============================================================================

#[test]
fn test_balanced_market_is_excess_demand() {
    let mut firm = firm_with(0.2, 100.0, 0);
    assert_eq!(firm.determine_state(100.0), 0.0);
    assert_eq!(firm.state(), DemandState::ExcessDemand);
}

#[test]
fn test_negative_gap_is_excess_demand() {
    let mut firm = firm_with(0.2, 100.0, 0);
    assert_eq!(firm.determine_state(120.0), -20.0);
    assert_eq!(firm.state(), DemandState::ExcessDemand);
}

// ============================================================================
// Wages
// ============================================================================

#[test]
fn test_wages_rewritten_from_productivity() {
    let households = flat_households(10);
    let mut firm = firm_with(0.2, 100.0, 4);
    let mut pool = UnemployedPool::from_ids((4..10).map(HouseholdId));
    let mut rng = RngManager::new(3);

    // Small surplus: nobody is fired, and zero unemployment removes wage noise
    let gap = firm.determine_state(90.0);
    let change = firm
        .update_workforce(gap, &market(90.0, 0.0), &households, &mut pool, &mut rng)
        .unwrap();

    assert!(change.fired.is_empty());
    assert_eq!(change.base_wage, 25.0);
    for id in firm.wage_ledger().employees() {
        assert_eq!(firm.wage_ledger().wage(id), Some(25.0));
    }
    let wage_bill: f64 = firm
        .wage_ledger()
        .employees()
        .filter_map(|id| firm.wage_ledger().wage(id))
        .sum();
    assert_eq!(wage_bill, 100.0);
}

#[test]
fn test_expected_inflation_passes_through_to_wages() {
    let households = flat_households(4);
    let mut firm = firm_with(0.2, 100.0, 4);
    let mut pool = UnemployedPool::new();
    let mut rng = RngManager::new(3);

    let conditions = MarketConditions {
        expected_inflation: 0.1,
        ..market(90.0, 0.0)
    };
    let gap = firm.determine_state(90.0);
    let change = firm
        .update_workforce(gap, &conditions, &households, &mut pool, &mut rng)
        .unwrap();

    assert!((change.base_wage - 27.5).abs() < 1e-9);
}

// ============================================================================
// Hiring
// ============================================================================

#[test]
fn test_hiring_stops_when_pool_exhausted() {
    let households = flat_households(6);
    let mut firm = firm_with(1.0, 100.0, 4);
    let mut pool = UnemployedPool::from_ids([HouseholdId(4), HouseholdId(5)]);
    let mut rng = RngManager::new(8);

    // ν₁ = 1 means a target of ⌊1000 / 100 * 4⌋ = 40 hires
    let gap = firm.determine_state(1100.0);
    let change = firm
        .update_workforce(gap, &market(1100.0, 2.0 / 6.0), &households, &mut pool, &mut rng)
        .unwrap();

    assert_eq!(change.hired.len(), 2);
    assert_eq!(change.unfilled, 38);
    assert!(pool.is_empty());
    assert_eq!(firm.employment(), 6);

    // New hires are paid base wage times productivity like everyone else
    for id in firm.wage_ledger().employees() {
        assert_eq!(firm.wage_ledger().wage(id), Some(25.0));
    }
}

#[test]
fn test_hired_households_leave_pool() {
    let mut state = SimulationState::from_parts(
        flat_households(8),
        UnemployedPool::from_ids((3..8).map(HouseholdId)),
    );
    let mut firm = firm_with(1.0, 100.0, 3);
    let mut rng = RngManager::new(21);

    let (households, pool) = state.labor_market_mut();
    let gap = firm.determine_state(150.0);
    let change = firm
        .update_workforce(gap, &market(150.0, 5.0 / 8.0), households, pool, &mut rng)
        .unwrap();

    // ⌊50 / 100 * 3⌋ = 1
    assert_eq!(change.hired.len(), 1);
    assert!(!state.unemployed().contains(change.hired[0]));
    assert!(state.employment_partition_holds(firm.wage_ledger()));
}

// ============================================================================
// Firing
// ============================================================================

#[test]
fn test_firing_moves_employees_to_pool() {
    let mut state = SimulationState::from_parts(flat_households(10), UnemployedPool::new());
    let mut firm = firm_with(0.5, 100.0, 10);
    let mut rng = RngManager::new(4);

    // ⌊0.5 * 90 / 100 * 10⌋ = 4
    let (households, pool) = state.labor_market_mut();
    let gap = firm.determine_state(10.0);
    let change = firm
        .update_workforce(gap, &market(10.0, 0.0), households, pool, &mut rng)
        .unwrap();

    assert_eq!(change.fired.len(), 4);
    assert_eq!(firm.employment(), 6);
    assert_eq!(state.unemployed().len(), 4);
    for id in &change.fired {
        assert!(state.unemployed().contains(*id));
        assert!(!firm.wage_ledger().contains(*id));
    }
    assert!(state.employment_partition_holds(firm.wage_ledger()));
}

#[test]
fn test_firing_never_empties_workforce() {
    let households = flat_households(3);
    let mut firm = firm_with(1.0, 100.0, 3);
    let mut pool = UnemployedPool::new();
    let mut rng = RngManager::new(4);

    let gap = firm.determine_state(-1000.0);
    let change = firm
        .update_workforce(gap, &market(-1000.0, 0.0), &households, &mut pool, &mut rng)
        .unwrap();

    assert_eq!(change.fired.len(), 2);
    assert_eq!(firm.employment(), 1);
}

#[test]
fn test_empty_workforce_is_degenerate() {
    let households = flat_households(3);
    let mut firm = firm_with(0.2, 100.0, 0);
    let mut pool = UnemployedPool::from_ids((0..3).map(HouseholdId));
    let mut rng = RngManager::new(4);

    let gap = firm.determine_state(120.0);
    let err = firm
        .update_workforce(gap, &market(120.0, 1.0), &households, &mut pool, &mut rng)
        .unwrap_err();

    assert_eq!(
        err,
        FirmError::DegenerateWorkforce {
            employees: 0,
            productivity_sum: 0.0,
        }
    );
}

#[test]
fn test_non_positive_productivity_is_degenerate() {
    let mut households = flat_households(2);
    households[0].set_productivity(0.0);
    let mut firm = firm_with(0.2, 100.0, 1);
    let mut pool = UnemployedPool::from_ids([HouseholdId(1)]);
    let mut rng = RngManager::new(4);

    let gap = firm.determine_state(120.0);
    let result = firm.update_workforce(gap, &market(120.0, 0.5), &households, &mut pool, &mut rng);

    assert!(matches!(
        result,
        Err(FirmError::DegenerateWorkforce { employees: 1, .. })
    ));
}

// ============================================================================
// Initialization and full step
// ============================================================================

#[test]
fn test_init_employment_hires_at_least_half() {
    for seed in 0..20 {
        let households = flat_households(10);
        let mut firm = firm_with(0.2, 200.0, 0);
        let mut pool = UnemployedPool::from_ids((0..10).map(HouseholdId));
        let mut rng = RngManager::new(seed);

        let base_wage = firm
            .init_employment(&households, &mut pool, &mut rng)
            .unwrap();

        let employed = firm.employment();
        assert!((5..10).contains(&employed), "seed {}: {}", seed, employed);
        assert_eq!(pool.len(), 10 - employed);
        assert!((base_wage - 200.0 / employed as f64).abs() < 1e-9);
    }
}

#[test]
fn test_step_records_previous_price_and_updates_responsiveness() {
    let households = flat_households(6);
    let mut firm = firm_with(0.2, 100.0, 4);
    let mut pool = UnemployedPool::from_ids([HouseholdId(4), HouseholdId(5)]);
    let mut rng = RngManager::new(12);

    let conditions = MarketConditions {
        aggregate_demand: 110.0,
        expected_inflation: 0.0,
        unemployment: 2.0 / 6.0,
        policy_rate: 0.25,
    };
    let outcome = firm
        .step(&conditions, &households, &mut pool, &mut rng)
        .unwrap();

    assert_eq!(outcome.state, DemandState::ExcessDemand);
    assert_eq!(outcome.gap, -10.0);
    assert_eq!(firm.prev_price(), 1.0);
    assert!(firm.price() >= 1.0);

    // Pool still has someone in it, so ν₁ = rate * ν₂
    assert!(!pool.is_empty());
    assert!((firm.hiring_responsiveness() - 0.05).abs() < 1e-12);
}
