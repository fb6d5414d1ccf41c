//! In-memory data collector
//!
//! Records the reporter feed: one `ModelSnapshot` per tick and one `AgentRow`
//! per registered agent per tick (households carry a record, the banks and the
//! firm carry `None`).

use serde::{Deserialize, Serialize};

use super::{HouseholdRecord, ModelSnapshot};
use crate::models::household::HouseholdId;
use crate::models::state::SimulationState;
use crate::orchestrator::AgentKind;

/// One agent's reporter values at one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRow {
    pub tick: usize,
    pub agent: AgentKind,
    pub record: Option<HouseholdRecord>,
}

/// Collected model and agent time series
#[derive(Debug, Clone, Default)]
pub struct DataCollector {
    model_vars: Vec<ModelSnapshot>,
    agent_vars: Vec<AgentRow>,
}

impl DataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick: the model snapshot plus a row for every scheduled agent
    pub fn collect(
        &mut self,
        snapshot: ModelSnapshot,
        schedule: &[AgentKind],
        state: &SimulationState,
    ) {
        let tick = snapshot.tick;
        self.model_vars.push(snapshot);

        self.agent_vars.extend(schedule.iter().map(|&agent| AgentRow {
            tick,
            agent,
            record: match agent {
                AgentKind::Household(id) => state.household(id).map(HouseholdRecord::from),
                _ => None,
            },
        }));
    }

    pub fn model_vars(&self) -> &[ModelSnapshot] {
        &self.model_vars
    }

    pub fn agent_vars(&self) -> &[AgentRow] {
        &self.agent_vars
    }

    /// Extract one model reporter as a series
    pub fn model_series<F>(&self, reporter: F) -> Vec<f64>
    where
        F: Fn(&ModelSnapshot) -> f64,
    {
        self.model_vars.iter().map(reporter).collect()
    }

    /// All recorded values for one household, in tick order
    pub fn household_history(&self, id: HouseholdId) -> Vec<&HouseholdRecord> {
        self.agent_vars
            .iter()
            .filter(|row| row.agent == AgentKind::Household(id))
            .filter_map(|row| row.record.as_ref())
            .collect()
    }

    /// Number of ticks collected
    pub fn len(&self) -> usize {
        self.model_vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.model_vars.is_empty()
    }

    pub fn clear(&mut self) {
        self.model_vars.clear();
        self.agent_vars.clear();
    }
}
