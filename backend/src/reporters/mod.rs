//! Reporters
//!
//! Pure functions over model state that feed the time series consumed by
//! dashboards and exporters. Model reporters are captured once per tick into
//! a `ModelSnapshot` *before* any agent is activated; agent reporters are
//! defined for households only and yield `None` for the other agent kinds.

mod collector;

pub use collector::{AgentRow, DataCollector};

use serde::{Deserialize, Serialize};

use crate::models::household::{Household, HouseholdId};
use crate::orchestrator::{AgentKind, Orchestrator};

// ============================================================================
// Model reporters
// ============================================================================

/// Gini coefficient of a wealth distribution
///
/// Uses `G = 1 + 1/N - 2B` with `B = Σ xᵢ(N - i) / (N Σx)` over wealth sorted
/// ascending. Equal wealth gives 0; a single holder gives `(N-1)/N`. Empty
/// input or zero total wealth yields 0. Negative wealth is not filtered and can
/// push the value outside [0, 1].
///
/// # Example
/// ```
/// use econ_simulator_core_rs::reporters::gini_coefficient;
///
/// assert!(gini_coefficient(&[5.0, 5.0, 5.0, 5.0]).abs() < 1e-12);
/// assert!((gini_coefficient(&[0.0, 0.0, 0.0, 8.0]) - 0.75).abs() < 1e-12);
/// ```
pub fn gini_coefficient(wealths: &[f64]) -> f64 {
    let n = wealths.len();
    let total: f64 = wealths.iter().sum();
    if n == 0 || total == 0.0 {
        return 0.0;
    }

    let mut sorted = wealths.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = n as f64;
    let b = sorted
        .iter()
        .enumerate()
        .map(|(i, x)| x * (n - i as f64))
        .sum::<f64>()
        / (n * total);

    1.0 + 1.0 / n - 2.0 * b
}

pub fn compute_gini(model: &Orchestrator) -> f64 {
    let wealths: Vec<f64> = model.state().households().iter().map(Household::wealth).collect();
    gini_coefficient(&wealths)
}

pub fn inflation_actual(model: &Orchestrator) -> f64 {
    model.inflation().actual()
}

pub fn inflation_smoothed(model: &Orchestrator) -> f64 {
    model.inflation().smoothed()
}

pub fn inflation_expected(model: &Orchestrator) -> f64 {
    model.inflation().expected()
}

pub fn output(model: &Orchestrator) -> f64 {
    model.firm().output()
}

pub fn aggregate_demand(model: &Orchestrator) -> f64 {
    model.aggregate_demand()
}

pub fn price(model: &Orchestrator) -> f64 {
    model.firm().price()
}

pub fn policy_rate(model: &Orchestrator) -> f64 {
    model.central_bank().rate()
}

pub fn unemployment(model: &Orchestrator) -> f64 {
    model.unemployment()
}

/// One row of the model-level time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub tick: usize,
    pub gini: f64,
    pub actual_inflation: f64,
    pub smoothed_inflation: f64,
    pub expected_inflation: f64,
    pub output: f64,
    pub aggregate_demand: f64,
    pub price: f64,
    pub policy_rate: f64,
    pub unemployment: f64,
}

impl ModelSnapshot {
    /// Evaluate every model reporter against the current state
    pub fn capture(model: &Orchestrator) -> Self {
        Self {
            tick: model.current_tick(),
            gini: compute_gini(model),
            actual_inflation: inflation_actual(model),
            smoothed_inflation: inflation_smoothed(model),
            expected_inflation: inflation_expected(model),
            output: output(model),
            aggregate_demand: aggregate_demand(model),
            price: price(model),
            policy_rate: policy_rate(model),
            unemployment: unemployment(model),
        }
    }
}

// ============================================================================
// Agent reporters
// ============================================================================

/// Per-household reporter values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdRecord {
    pub household_id: HouseholdId,
    pub wealth: f64,
    pub productivity: f64,
    pub income: f64,
    pub desired_consumption: f64,
    pub ptc: f64,
}

impl From<&Household> for HouseholdRecord {
    fn from(household: &Household) -> Self {
        Self {
            household_id: household.id(),
            wealth: household.wealth(),
            productivity: household.productivity(),
            income: household.income(),
            desired_consumption: household.desired_consumption(),
            ptc: household.ptc(),
        }
    }
}

/// Agent reporter: `Some` for households, `None` for every other agent kind
pub fn agent_record(model: &Orchestrator, kind: AgentKind) -> Option<HouseholdRecord> {
    match kind {
        AgentKind::Household(id) => model.state().household(id).map(HouseholdRecord::from),
        AgentKind::CentralBank | AgentKind::CommercialBank | AgentKind::Firm => None,
    }
}
