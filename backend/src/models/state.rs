//! Simulation State
//!
//! Holds the household population and the unemployed pool.
//!
//! # Critical Invariants
//!
//! 1. **Arena stability**: households are created once, indexed by creation
//!    order, and never removed; `HouseholdId(i)` always refers to `households[i]`
//! 2. **Employment partition**: at every tick boundary the unemployed pool and
//!    the firm's wage ledger are disjoint and together cover every household
//! 3. **Single writer**: only the firm's step (and initial employment seeding)
//!    mutates the pool; households receive a shared borrow and only query it

use std::collections::BTreeSet;

use crate::models::firm::WageLedger;
use crate::models::household::{Household, HouseholdId};
use crate::orchestrator::HouseholdConfig;
use crate::rng::RngManager;

/// Set of households currently without a job
///
/// Backed by an ordered set so that random picks are reproducible for a given
/// seed (iteration order never depends on hashing).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnemployedPool {
    members: BTreeSet<HouseholdId>,
}

impl UnemployedPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from explicit ids
    pub fn from_ids<I: IntoIterator<Item = HouseholdId>>(ids: I) -> Self {
        Self {
            members: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: HouseholdId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = HouseholdId> + '_ {
        self.members.iter().copied()
    }

    /// Add a household; returns false if it was already unemployed
    pub fn insert(&mut self, id: HouseholdId) -> bool {
        self.members.insert(id)
    }

    /// Remove a uniformly random member, or `None` when the pool is exhausted
    pub fn take_random(&mut self, rng: &mut RngManager) -> Option<HouseholdId> {
        if self.members.is_empty() {
            return None;
        }
        let index = rng.choose_index(self.members.len());
        let id = self.members.iter().nth(index).copied()?;
        self.members.remove(&id);
        Some(id)
    }
}

/// Complete population state
///
/// # Example
///
/// ```rust
/// use econ_simulator_core_rs::{HouseholdConfig, RngManager, SimulationState};
///
/// let mut rng = RngManager::new(1);
/// let state = SimulationState::new(4, &HouseholdConfig::default(), &mut rng);
/// assert_eq!(state.population_size(), 4);
/// assert_eq!(state.unemployed().len(), 4); // everyone starts unemployed
/// ```
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Household arena, indexed by `HouseholdId`
    households: Vec<Household>,

    /// Households without a job
    unemployed: UnemployedPool,
}

impl SimulationState {
    /// Create `population` households, all initially unemployed
    pub fn new(population: usize, config: &HouseholdConfig, rng: &mut RngManager) -> Self {
        let households: Vec<Household> = (0..population)
            .map(|i| Household::new(HouseholdId(i), config, rng))
            .collect();
        let unemployed = UnemployedPool::from_ids(households.iter().map(Household::id));

        Self {
            households,
            unemployed,
        }
    }

    /// Build state from explicit households and pool (mainly for tests)
    pub fn from_parts(households: Vec<Household>, unemployed: UnemployedPool) -> Self {
        Self {
            households,
            unemployed,
        }
    }

    pub fn population_size(&self) -> usize {
        self.households.len()
    }

    pub fn households(&self) -> &[Household] {
        &self.households
    }

    pub fn household(&self, id: HouseholdId) -> Option<&Household> {
        self.households.get(id.index())
    }

    pub fn unemployed(&self) -> &UnemployedPool {
        &self.unemployed
    }

    /// Share of the population without a job
    pub fn unemployment_rate(&self) -> f64 {
        self.unemployed.len() as f64 / self.households.len() as f64
    }

    /// Sum of realized demand over all households
    pub fn aggregate_demand(&self) -> f64 {
        self.households.iter().map(Household::demand).sum()
    }

    /// Split borrow used by the firm's step: read households, mutate the pool
    pub fn labor_market_mut(&mut self) -> (&[Household], &mut UnemployedPool) {
        (&self.households, &mut self.unemployed)
    }

    /// Split borrow used by a household's step: mutate one household, read the pool
    pub fn household_view_mut(
        &mut self,
        id: HouseholdId,
    ) -> Option<(&mut Household, &UnemployedPool)> {
        let household = self.households.get_mut(id.index())?;
        Some((household, &self.unemployed))
    }

    /// Check the employment partition against the firm's wage ledger
    pub fn employment_partition_holds(&self, ledger: &WageLedger) -> bool {
        let disjoint = self.unemployed.iter().all(|id| !ledger.contains(id));
        let covering = self
            .households
            .iter()
            .all(|h| self.unemployed.contains(h.id()) || ledger.contains(h.id()));
        let no_strangers = ledger.employees().all(|id| id.index() < self.households.len());

        disjoint && covering && no_strangers
    }
}
