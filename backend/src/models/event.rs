//! Event logging for simulation replay and auditing.
//!
//! Every significant state change during a tick is appended to the
//! `EventLog`. Events enable:
//! - Debugging (what did the firm do at tick 37, and why?)
//! - Auditing (every hire and fire is recorded, so the employment partition
//!   can be reconstructed)
//! - Analysis (credit constraints, stalled hiring, policy path)
//!
//! # Event Types
//!
//! Events are categorized by the agent that produced them:
//! - **Initialization**: `WorkforceSeeded`
//! - **CentralBank**: `PolicyRateSet`
//! - **CommercialBank**: `BankRatesUpdated`
//! - **Firm**: `DemandStateDetermined`, `Hired`, `Fired`, `HiringStalled`,
//!   `PriceUpdated`, `OutputUpdated`
//! - **Household**: `InvestmentDropped`, `CreditConstrained`
//!
//! # Example
//!
//! ```rust
//! use econ_simulator_core_rs::{Event, EventLog, HouseholdId};
//!
//! let mut log = EventLog::new();
//! log.log(Event::Hired { tick: 3, household_id: HouseholdId(7), wage: 1.25 });
//!
//! assert_eq!(log.events_at_tick(3).len(), 1);
//! assert_eq!(log.events_for_household(HouseholdId(7)).len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::models::firm::DemandState;
use crate::models::household::HouseholdId;

/// Simulation event capturing a state change.
///
/// All events include a tick number for temporal ordering.
/// Events are logged in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum Event {
    /// Initial employment drawn at model construction
    WorkforceSeeded {
        tick: usize,
        employed: usize,
        base_wage: f64,
    },

    /// Central bank recomputed the policy rate
    PolicyRateSet {
        tick: usize,
        rate: f64,
        smoothed_inflation: f64,
    },

    /// Commercial bank re-derived its rates
    BankRatesUpdated {
        tick: usize,
        loan_rate: f64,
        deposit_rate: f64,
    },

    /// Firm classified the goods market
    DemandStateDetermined {
        tick: usize,
        gap: f64,
        state: DemandState,
    },

    /// Household moved from the unemployed pool onto the payroll
    Hired {
        tick: usize,
        household_id: HouseholdId,
        wage: f64,
    },

    /// Household moved from the payroll into the unemployed pool
    Fired {
        tick: usize,
        household_id: HouseholdId,
    },

    /// Firm wanted to hire but the unemployed pool ran dry
    HiringStalled { tick: usize, unfilled: usize },

    PriceUpdated {
        tick: usize,
        prev_price: f64,
        price: f64,
    },

    OutputUpdated {
        tick: usize,
        output: f64,
        hiring_responsiveness: f64,
    },

    /// Borrower abandoned this period's investment to fit under the LTV cap
    InvestmentDropped {
        tick: usize,
        household_id: HouseholdId,
    },

    /// Borrower's loan was clamped to the LTV cap
    CreditConstrained {
        tick: usize,
        household_id: HouseholdId,
        granted: f64,
    },
}

impl Event {
    /// Get tick when event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::WorkforceSeeded { tick, .. } => *tick,
            Event::PolicyRateSet { tick, .. } => *tick,
            Event::BankRatesUpdated { tick, .. } => *tick,
            Event::DemandStateDetermined { tick, .. } => *tick,
            Event::Hired { tick, .. } => *tick,
            Event::Fired { tick, .. } => *tick,
            Event::HiringStalled { tick, .. } => *tick,
            Event::PriceUpdated { tick, .. } => *tick,
            Event::OutputUpdated { tick, .. } => *tick,
            Event::InvestmentDropped { tick, .. } => *tick,
            Event::CreditConstrained { tick, .. } => *tick,
        }
    }

    /// Get event type as string (for filtering/querying)
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::WorkforceSeeded { .. } => "WorkforceSeeded",
            Event::PolicyRateSet { .. } => "PolicyRateSet",
            Event::BankRatesUpdated { .. } => "BankRatesUpdated",
            Event::DemandStateDetermined { .. } => "DemandStateDetermined",
            Event::Hired { .. } => "Hired",
            Event::Fired { .. } => "Fired",
            Event::HiringStalled { .. } => "HiringStalled",
            Event::PriceUpdated { .. } => "PriceUpdated",
            Event::OutputUpdated { .. } => "OutputUpdated",
            Event::InvestmentDropped { .. } => "InvestmentDropped",
            Event::CreditConstrained { .. } => "CreditConstrained",
        }
    }

    /// Get household ID if event relates to a single household
    pub fn household_id(&self) -> Option<HouseholdId> {
        match self {
            Event::Hired { household_id, .. } => Some(*household_id),
            Event::Fired { household_id, .. } => Some(*household_id),
            Event::InvestmentDropped { household_id, .. } => Some(*household_id),
            Event::CreditConstrained { household_id, .. } => Some(*household_id),
            _ => None,
        }
    }
}

/// Event log for storing and querying simulation events
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add event to log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events at a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific household
    pub fn events_for_household(&self, household_id: HouseholdId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.household_id() == Some(household_id))
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
