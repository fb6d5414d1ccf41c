//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::orchestrator::{
    AgentKind, BankConfig, FirmConfig, HouseholdConfig, ModelConfig, OrchestratorConfig,
    TickResult,
};
use crate::reporters::{AgentRow, ModelSnapshot};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a field with a default value if missing.
///
/// # Errors
/// Returns error only if type conversion fails (not if field is missing)
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Extract an optional nested section
fn extract_section<'py>(
    dict: &Bound<'py, PyDict>,
    key: &str,
) -> PyResult<Option<Bound<'py, PyDict>>> {
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.downcast_into::<PyDict>()?)),
        None => Ok(None),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert Python dict to OrchestratorConfig
///
/// Expected layout mirrors the JSON form:
/// `{"rng_seed": 0, "model": {...}, "firm": {...}, "bank": {...}, "household": {...}}`.
/// Every field is optional and falls back to its default.
pub fn parse_orchestrator_config(py_config: &Bound<'_, PyDict>) -> PyResult<OrchestratorConfig> {
    let rng_seed: u64 = extract_with_default(py_config, "rng_seed", 0)?;

    let model = match extract_section(py_config, "model")? {
        Some(dict) => parse_model_config(&dict)?,
        None => ModelConfig::default(),
    };
    let firm = match extract_section(py_config, "firm")? {
        Some(dict) => parse_firm_config(&dict)?,
        None => FirmConfig::default(),
    };
    let bank = match extract_section(py_config, "bank")? {
        Some(dict) => parse_bank_config(&dict)?,
        None => BankConfig::default(),
    };
    let household = match extract_section(py_config, "household")? {
        Some(dict) => parse_household_config(&dict)?,
        None => HouseholdConfig::default(),
    };

    Ok(OrchestratorConfig {
        rng_seed,
        model,
        firm,
        bank,
        household,
    })
}

fn parse_model_config(dict: &Bound<'_, PyDict>) -> PyResult<ModelConfig> {
    let d = ModelConfig::default();
    Ok(ModelConfig {
        population_size: extract_with_default(dict, "population_size", d.population_size)?,
        base_rate: extract_with_default(dict, "base_rate", d.base_rate)?,
        policy_intensity: extract_with_default(dict, "policy_intensity", d.policy_intensity)?,
        inflation_target: extract_with_default(dict, "inflation_target", d.inflation_target)?,
        trust: extract_with_default(dict, "trust", d.trust)?,
        ema_smoothing: extract_with_default(dict, "ema_smoothing", d.ema_smoothing)?,
        warmup_ticks: extract_with_default(dict, "warmup_ticks", d.warmup_ticks)?,
    })
}

fn parse_firm_config(dict: &Bound<'_, PyDict>) -> PyResult<FirmConfig> {
    let d = FirmConfig::default();
    Ok(FirmConfig {
        price_adjust: extract_with_default(dict, "price_adjust", d.price_adjust)?,
        wage_adjust: extract_with_default(dict, "wage_adjust", d.wage_adjust)?,
        firing_responsiveness: extract_with_default(
            dict,
            "firing_responsiveness",
            d.firing_responsiveness,
        )?,
        price_sensitivity: extract_with_default(dict, "price_sensitivity", d.price_sensitivity)?,
    })
}

fn parse_bank_config(dict: &Bound<'_, PyDict>) -> PyResult<BankConfig> {
    let d = BankConfig::default();
    Ok(BankConfig {
        loan_to_value: extract_with_default(dict, "loan_to_value", d.loan_to_value)?,
        loan_markup: extract_with_default(dict, "loan_markup", d.loan_markup)?,
        deposit_markdown: extract_with_default(dict, "deposit_markdown", d.deposit_markdown)?,
    })
}

fn parse_household_config(dict: &Bound<'_, PyDict>) -> PyResult<HouseholdConfig> {
    let d = HouseholdConfig::default();
    Ok(HouseholdConfig {
        initial_ptc: extract_with_default(dict, "initial_ptc", d.initial_ptc)?,
        sensitivity: extract_with_default(dict, "sensitivity", d.sensitivity)?,
        consumption_mean: extract_with_default(dict, "consumption_mean", d.consumption_mean)?,
        consumption_std: extract_with_default(dict, "consumption_std", d.consumption_std)?,
        invest_productivity_mean: extract_with_default(
            dict,
            "invest_productivity_mean",
            d.invest_productivity_mean,
        )?,
        idle_productivity_mean: extract_with_default(
            dict,
            "idle_productivity_mean",
            d.idle_productivity_mean,
        )?,
        productivity_std: extract_with_default(dict, "productivity_std", d.productivity_std)?,
        mean_wealth: extract_with_default(dict, "mean_wealth", d.mean_wealth)?,
        wealth_std: extract_with_default(dict, "wealth_std", d.wealth_std)?,
        investment_cost: extract_with_default(dict, "investment_cost", d.investment_cost)?,
    })
}

// ========================================================================
// Result Converters
// ========================================================================

/// Convert a model snapshot to a Python dict (dashboard column names)
pub fn snapshot_to_py(py: Python<'_>, snapshot: &ModelSnapshot) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("Step", snapshot.tick)?;
    dict.set_item("Gini", snapshot.gini)?;
    dict.set_item("Actual Inflation", snapshot.actual_inflation)?;
    dict.set_item("Inflation EMA", snapshot.smoothed_inflation)?;
    dict.set_item("Inflation Expectations", snapshot.expected_inflation)?;
    dict.set_item("Output", snapshot.output)?;
    dict.set_item("Demand", snapshot.aggregate_demand)?;
    dict.set_item("Price", snapshot.price)?;
    dict.set_item("CB Rate", snapshot.policy_rate)?;
    dict.set_item("Unemployment", snapshot.unemployment)?;
    Ok(dict.unbind())
}

/// Convert an agent row to a Python dict; reporter values are `None` for
/// non-household agents
pub fn agent_row_to_py(py: Python<'_>, row: &AgentRow) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("Step", row.tick)?;

    let agent = match row.agent {
        AgentKind::CentralBank => "central_bank".to_string(),
        AgentKind::CommercialBank => "bank".to_string(),
        AgentKind::Firm => "firm".to_string(),
        AgentKind::Household(id) => id.to_string(),
    };
    dict.set_item("AgentID", agent)?;

    let record = row.record.as_ref();
    dict.set_item("Wealth", record.map(|r| r.wealth))?;
    dict.set_item("Productivity", record.map(|r| r.productivity))?;
    dict.set_item("Income", record.map(|r| r.income))?;
    dict.set_item("Desired Cons", record.map(|r| r.desired_consumption))?;
    dict.set_item("PTC", record.map(|r| r.ptc))?;
    Ok(dict.unbind())
}

/// Convert TickResult to a Python dict
pub fn tick_result_to_py(py: Python<'_>, result: &TickResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("tick", result.tick)?;
    dict.set_item("snapshot", snapshot_to_py(py, &result.snapshot)?)?;
    dict.set_item("demand_state", format!("{:?}", result.demand_state))?;
    dict.set_item("num_hired", result.num_hired)?;
    dict.set_item("num_fired", result.num_fired)?;
    dict.set_item("num_unfilled", result.num_unfilled)?;
    dict.set_item("num_credit_constrained", result.num_credit_constrained)?;
    Ok(dict.unbind())
}
