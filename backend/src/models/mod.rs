//! Domain models for the economy simulator

pub mod bank;
pub mod central_bank;
pub mod event;
pub mod firm;
pub mod household;
pub mod state;

// Re-exports
pub use bank::CommercialBank;
pub use central_bank::CentralBank;
pub use event::{Event, EventLog};
pub use firm::{DemandState, Firm, FirmError, MarketConditions, WageLedger};
pub use household::{CreditOutcome, CreditPosition, Household, HouseholdEnvironment, HouseholdId};
pub use state::{SimulationState, UnemployedPool};
