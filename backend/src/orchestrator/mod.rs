//! Orchestrator module - main simulation loop

pub mod engine;

pub use engine::{
    AgentKind, BankConfig, FirmConfig, HouseholdConfig, ModelConfig, Orchestrator,
    OrchestratorConfig, SimulationError, TickResult,
};
