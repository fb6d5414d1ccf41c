//! Economy Simulator Core - Rust Engine
//!
//! Agent-based macroeconomic simulation with deterministic execution:
//! heterogeneous households interact with an aggregate firm, a commercial bank
//! and a central bank, producing time series of inflation, unemployment and
//! wealth inequality.
//!
//! # Architecture
//!
//! - **core**: Tick counter, inflation warm-up and inflation signals
//! - **models**: Agents (CentralBank, CommercialBank, Firm, Household),
//!   population state, event log
//! - **orchestrator**: Configuration and the staged tick loop
//! - **reporters**: Model/agent reporters and the data collector
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. The unemployed pool and the firm's wage ledger partition the population
//!    at every tick boundary
//! 2. All randomness is deterministic (seeded RNG)
//! 3. Agents are activated sequentially in a fixed order
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod reporters;
pub mod rng;

// Re-exports for convenience
pub use core::inflation::InflationSignals;
pub use core::time::{TimeManager, WarmupPhase};
pub use models::{
    bank::CommercialBank,
    central_bank::CentralBank,
    event::{Event, EventLog},
    firm::{
        DemandState, Firm, FirmError, FirmStepOutcome, MarketConditions, WageLedger,
        WorkforceChange,
    },
    household::{CreditOutcome, CreditPosition, Household, HouseholdEnvironment, HouseholdId},
    state::{SimulationState, UnemployedPool},
};
pub use orchestrator::{
    AgentKind, BankConfig, FirmConfig, HouseholdConfig, ModelConfig, Orchestrator,
    OrchestratorConfig, SimulationError, TickResult,
};
pub use reporters::{DataCollector, HouseholdRecord, ModelSnapshot};
pub use rng::RngManager;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn econ_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::model::PyModel>()?;
    Ok(())
}
