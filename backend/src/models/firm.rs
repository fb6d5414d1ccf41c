//! Aggregate firm
//!
//! A single representative producer that sets output, price and wages, and
//! hires from / fires into the unemployed pool.
//!
//! # Step order
//!
//! ```text
//! determine_state → update_workforce(gap) → update_price → update_output(gap)
//! ```
//!
//! where `gap = output - aggregate_demand`. A non-positive gap is excess demand
//! (ties favour demand).
//!
//! # Wage ledger
//!
//! Wages are kept per employee in a `WageLedger` keyed by `HouseholdId`. The
//! ledger's key set *is* the set of employed households: entries are created on
//! hire, removed on fire and rewritten in place on every step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::household::{Household, HouseholdId};
use crate::models::state::UnemployedPool;
use crate::orchestrator::FirmConfig;
use crate::rng::RngManager;

/// Errors raised by the firm's step
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FirmError {
    #[error(
        "Degenerate workforce: {employees} employee(s) with productivity sum {productivity_sum}"
    )]
    DegenerateWorkforce {
        employees: usize,
        productivity_sum: f64,
    },
}

/// Binary classification of the goods market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandState {
    /// Demand meets or exceeds output (`gap <= 0`)
    ExcessDemand,
    /// Output exceeds demand (`gap > 0`)
    ExcessSupply,
}

impl DemandState {
    /// Classify an output gap
    ///
    /// # Example
    /// ```
    /// use econ_simulator_core_rs::DemandState;
    ///
    /// assert_eq!(DemandState::from_gap(0.0), DemandState::ExcessDemand);
    /// assert_eq!(DemandState::from_gap(-20.0), DemandState::ExcessDemand);
    /// assert_eq!(DemandState::from_gap(5.0), DemandState::ExcessSupply);
    /// ```
    pub fn from_gap(gap: f64) -> Self {
        if gap <= 0.0 {
            DemandState::ExcessDemand
        } else {
            DemandState::ExcessSupply
        }
    }
}

/// Wage per employed household
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WageLedger {
    wages: BTreeMap<HouseholdId, f64>,
}

impl WageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wage(&self, id: HouseholdId) -> Option<f64> {
        self.wages.get(&id).copied()
    }

    pub fn contains(&self, id: HouseholdId) -> bool {
        self.wages.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.wages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wages.is_empty()
    }

    /// Employed households in ascending id order
    pub fn employees(&self) -> impl Iterator<Item = HouseholdId> + '_ {
        self.wages.keys().copied()
    }

    /// Create or overwrite an entry
    pub fn insert(&mut self, id: HouseholdId, wage: f64) {
        self.wages.insert(id, wage);
    }

    pub fn remove(&mut self, id: HouseholdId) -> Option<f64> {
        self.wages.remove(&id)
    }

    /// Remove a uniformly random employee
    fn remove_random(&mut self, rng: &mut RngManager) -> Option<HouseholdId> {
        if self.wages.is_empty() {
            return None;
        }
        let index = rng.choose_index(self.wages.len());
        let id = self.wages.keys().nth(index).copied()?;
        self.wages.remove(&id);
        Some(id)
    }

    /// Overwrite every wage with `base_wage * productivity`
    fn rewrite(&mut self, base_wage: f64, households: &[Household]) {
        for (id, wage) in self.wages.iter_mut() {
            *wage = base_wage * households[id.index()].productivity();
        }
    }
}

/// Macro conditions the firm reacts to, computed by the scheduler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketConditions {
    pub aggregate_demand: f64,
    pub expected_inflation: f64,
    pub unemployment: f64,
    pub policy_rate: f64,
}

/// Hiring/firing activity of a single firm step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkforceChange {
    pub base_wage: f64,
    pub hired: Vec<HouseholdId>,
    pub fired: Vec<HouseholdId>,
    /// Vacancies left open because the unemployed pool ran dry
    pub unfilled: usize,
}

/// Result of `Firm::step`
#[derive(Debug, Clone, PartialEq)]
pub struct FirmStepOutcome {
    pub gap: f64,
    pub state: DemandState,
    pub workforce: WorkforceChange,
}

/// Aggregate representative firm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firm {
    output: f64,
    price: f64,
    prev_price: f64,
    wage_ledger: WageLedger,
    state: DemandState,
    /// ν₁: hiring responsiveness, recomputed at the end of every step
    hiring_responsiveness: f64,
    /// ν₂: firing responsiveness (and base for ν₁)
    firing_responsiveness: f64,
    price_adjust: f64,
    wage_adjust: f64,
    price_sensitivity: f64,
}

impl Firm {
    /// Create a firm with no employees; price starts at 1
    pub fn new(config: &FirmConfig, initial_output: f64) -> Self {
        Self {
            output: initial_output,
            price: 1.0,
            prev_price: 1.0,
            wage_ledger: WageLedger::new(),
            state: DemandState::ExcessDemand,
            hiring_responsiveness: config.firing_responsiveness,
            firing_responsiveness: config.firing_responsiveness,
            price_adjust: config.price_adjust,
            wage_adjust: config.wage_adjust,
            price_sensitivity: config.price_sensitivity,
        }
    }

    /// Seed employment at initialization
    ///
    /// Hires a random number of households in `[⌊N/2⌋, N)` from the pool and
    /// pays each `output / hired * productivity`. Returns the base wage.
    pub fn init_employment(
        &mut self,
        households: &[Household],
        pool: &mut UnemployedPool,
        rng: &mut RngManager,
    ) -> Result<f64, FirmError> {
        let population = households.len();
        let target = if population / 2 < population {
            rng.range((population / 2) as i64, population as i64) as usize
        } else {
            0
        };

        let mut hired = Vec::with_capacity(target);
        for _ in 0..target {
            match pool.take_random(rng) {
                Some(id) => hired.push(id),
                None => break,
            }
        }

        if hired.is_empty() {
            return Err(FirmError::DegenerateWorkforce {
                employees: 0,
                productivity_sum: 0.0,
            });
        }

        let base_wage = self.output / hired.len() as f64;
        for id in hired {
            self.wage_ledger
                .insert(id, base_wage * households[id.index()].productivity());
        }
        Ok(base_wage)
    }

    /// Run the full firm pipeline for one tick
    pub fn step(
        &mut self,
        market: &MarketConditions,
        households: &[Household],
        pool: &mut UnemployedPool,
        rng: &mut RngManager,
    ) -> Result<FirmStepOutcome, FirmError> {
        let gap = self.determine_state(market.aggregate_demand);
        let workforce = self.update_workforce(gap, market, households, pool, rng)?;
        self.update_price(market.expected_inflation, rng);
        self.update_output(gap, market.policy_rate, pool);

        Ok(FirmStepOutcome {
            gap,
            state: self.state,
            workforce,
        })
    }

    /// Classify the market and return the output gap
    pub fn determine_state(&mut self, aggregate_demand: f64) -> f64 {
        let gap = self.output - aggregate_demand;
        self.state = DemandState::from_gap(gap);
        gap
    }

    /// Reprice labour, then hire (excess demand) or fire (excess supply)
    pub fn update_workforce(
        &mut self,
        gap: f64,
        market: &MarketConditions,
        households: &[Household],
        pool: &mut UnemployedPool,
        rng: &mut RngManager,
    ) -> Result<WorkforceChange, FirmError> {
        let employees = self.wage_ledger.len();
        let productivity_sum: f64 = self
            .wage_ledger
            .employees()
            .map(|id| households[id.index()].productivity())
            .sum();

        if employees == 0 || productivity_sum <= 0.0 {
            return Err(FirmError::DegenerateWorkforce {
                employees,
                productivity_sum,
            });
        }

        let passthrough = 1.0 + self.price_sensitivity * market.expected_inflation;
        let mut base_wage = self.output / productivity_sum;
        let mut change = WorkforceChange::default();

        match self.state {
            DemandState::ExcessDemand => {
                base_wage *= (1.0
                    + self.wage_adjust
                        * (1.0 - self.hiring_responsiveness)
                        * (1.0 - market.unemployment)
                        * rng.next_f64())
                    * passthrough;
                self.wage_ledger.rewrite(base_wage, households);

                // Saturating cast: negative or NaN targets hire nobody
                let to_hire =
                    (self.hiring_responsiveness * -gap / self.output * employees as f64) as usize;

                for _ in 0..to_hire {
                    match pool.take_random(rng) {
                        Some(id) => {
                            self.wage_ledger
                                .insert(id, base_wage * households[id.index()].productivity());
                            change.hired.push(id);
                        }
                        None => break,
                    }
                }
                change.unfilled = to_hire - change.hired.len();
            }
            DemandState::ExcessSupply => {
                base_wage *= (1.0
                    - self.firing_responsiveness * market.unemployment * rng.next_f64())
                    * passthrough;
                self.wage_ledger.rewrite(base_wage, households);

                // At least one employee stays on the books
                let to_fire =
                    ((self.firing_responsiveness * gap / self.output * employees as f64) as usize)
                        .min(employees - 1);

                for _ in 0..to_fire {
                    if let Some(id) = self.wage_ledger.remove_random(rng) {
                        pool.insert(id);
                        change.fired.push(id);
                    }
                }
            }
        }

        change.base_wage = base_wage;
        Ok(change)
    }

    /// Pass expected inflation through to the price, plus demand-driven noise
    pub fn update_price(&mut self, expected_inflation: f64, rng: &mut RngManager) {
        self.prev_price = self.price;

        let passthrough = 1.0 + self.price_sensitivity * expected_inflation;
        let noise = self.price_adjust * rng.next_f64();

        self.price *= match self.state {
            DemandState::ExcessDemand => passthrough * (1.0 + noise),
            DemandState::ExcessSupply => passthrough * (1.0 - noise),
        };
    }

    /// Close the gap; hiring responsiveness falls with tighter policy
    pub fn update_output(&mut self, gap: f64, policy_rate: f64, pool: &UnemployedPool) {
        self.hiring_responsiveness = if pool.is_empty() {
            0.0
        } else {
            policy_rate * self.firing_responsiveness
        };

        self.output -= match self.state {
            DemandState::ExcessDemand => self.hiring_responsiveness * gap,
            DemandState::ExcessSupply => self.firing_responsiveness * gap,
        };
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn prev_price(&self) -> f64 {
        self.prev_price
    }

    pub fn state(&self) -> DemandState {
        self.state
    }

    pub fn wage_ledger(&self) -> &WageLedger {
        &self.wage_ledger
    }

    pub fn hiring_responsiveness(&self) -> f64 {
        self.hiring_responsiveness
    }

    pub fn firing_responsiveness(&self) -> f64 {
        self.firing_responsiveness
    }

    pub fn employment(&self) -> usize {
        self.wage_ledger.len()
    }

    pub fn set_output(&mut self, output: f64) {
        self.output = output;
    }

    /// Put a household on the payroll directly (scenario setup)
    pub fn hire_at(&mut self, id: HouseholdId, wage: f64) {
        self.wage_ledger.insert(id, wage);
    }
}
