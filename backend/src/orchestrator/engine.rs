//! Orchestrator Engine
//!
//! Main simulation loop: owns every agent and the macro aggregates, and
//! activates agents in a fixed order each tick.
//!
//! # Architecture
//!
//! ```text
//! For each tick t:
//! 1. unemployment      = |unemployed| / N
//! 2. inflation signals   (expected from last tick's actual, then actual, smoothed)
//! 3. aggregate demand  = Σ household demand (from last tick)
//! 4. snapshot          → data collector
//! 5. activate agents in registration order:
//!    CentralBank → CommercialBank → Firm → Household 0..N
//! 6. advance time
//! ```
//!
//! Order is load-bearing: the commercial bank must see this tick's policy
//! rate, and households must see the wage ledger and prices the firm rewrote
//! earlier in the same tick. Execution is strictly sequential.
//!
//! # Example
//!
//! ```rust
//! use econ_simulator_core_rs::{ModelConfig, Orchestrator, OrchestratorConfig};
//!
//! let config = OrchestratorConfig {
//!     rng_seed: 12345,
//!     model: ModelConfig { population_size: 10, ..ModelConfig::default() },
//!     ..OrchestratorConfig::default()
//! };
//!
//! let mut orchestrator = Orchestrator::new(config).unwrap();
//! for _ in 0..5 {
//!     let result = orchestrator.tick().unwrap();
//!     println!("Tick {}: unemployment {:.2}", result.tick, result.snapshot.unemployment);
//! }
//! assert_eq!(orchestrator.current_tick(), 5);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::inflation::InflationSignals;
use crate::core::time::{TimeManager, DEFAULT_WARMUP_TICKS};
use crate::models::bank::CommercialBank;
use crate::models::central_bank::CentralBank;
use crate::models::event::{Event, EventLog};
use crate::models::firm::{DemandState, Firm, FirmError, FirmStepOutcome, MarketConditions};
use crate::models::household::{CreditPosition, HouseholdEnvironment, HouseholdId};
use crate::models::state::SimulationState;
use crate::reporters::{DataCollector, ModelSnapshot};
use crate::rng::RngManager;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete orchestrator configuration
///
/// Every section falls back to its defaults when omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// RNG seed for deterministic simulation
    pub rng_seed: u64,

    pub model: ModelConfig,
    pub firm: FirmConfig,
    pub bank: BankConfig,
    pub household: HouseholdConfig,
}

impl OrchestratorConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| SimulationError::InvalidConfig(e.to_string()))
    }
}

/// Model-level parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Number of households (N)
    pub population_size: usize,

    /// Policy rate when smoothed inflation is on target
    pub base_rate: f64,

    /// Weight of the inflation gap in the policy rule
    pub policy_intensity: f64,

    pub inflation_target: f64,

    /// Weight households put on the central bank target when forming expectations
    pub trust: f64,

    /// EMA weight on the latest actual inflation (α)
    pub ema_smoothing: f64,

    /// Ticks of plain accumulation before inflation smoothing starts
    pub warmup_ticks: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            base_rate: 0.0,
            policy_intensity: 0.8,
            inflation_target: 0.04,
            trust: 0.8,
            ema_smoothing: 0.5,
            warmup_ticks: DEFAULT_WARMUP_TICKS,
        }
    }
}

/// Firm parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirmConfig {
    /// Amplitude of the uniform price noise
    pub price_adjust: f64,

    /// Amplitude of the uniform wage noise under excess demand
    ///
    /// Scales `(1 - ν₁)(1 - u)·U(0,1)` in place of the price sensitivity.
    pub wage_adjust: f64,

    /// ν₂: share of the relative gap acted upon when firing and cutting output
    pub firing_responsiveness: f64,

    /// Pass-through of expected inflation into prices and wages
    pub price_sensitivity: f64,
}

impl Default for FirmConfig {
    fn default() -> Self {
        Self {
            price_adjust: 0.1,
            wage_adjust: 0.6,
            firing_responsiveness: 0.2,
            price_sensitivity: 1.0,
        }
    }
}

/// Commercial bank parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// Borrowing cap as a fraction of household wealth
    pub loan_to_value: f64,
    pub loan_markup: f64,
    pub deposit_markdown: f64,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            loan_to_value: 0.5,
            loan_markup: 0.5,
            deposit_markdown: 0.1,
        }
    }
}

/// Household parameters (shared by the whole population)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdConfig {
    pub initial_ptc: f64,

    /// Sensitivity of the propensity to consume to the real deposit rate
    pub sensitivity: f64,

    /// Idiosyncratic consumption shock N(μk, σk)
    pub consumption_mean: f64,
    pub consumption_std: f64,

    /// Mean productivity growth when investing (μ1)
    pub invest_productivity_mean: f64,

    /// Mean productivity growth when not investing (μ2)
    pub idle_productivity_mean: f64,

    /// Std of productivity growth; also the std of initial productivity around 1
    pub productivity_std: f64,

    pub mean_wealth: f64,
    pub wealth_std: f64,

    /// Cost of the per-period productivity investment
    pub investment_cost: f64,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            initial_ptc: 0.8,
            sensitivity: 0.05,
            consumption_mean: 20.0,
            consumption_std: 10.0,
            invest_productivity_mean: 0.012,
            idle_productivity_mean: 0.01,
            productivity_std: 0.0115,
            mean_wealth: 100.0,
            wealth_std: 20.0,
            investment_cost: 5.0,
        }
    }
}

// ============================================================================
// Scheduling
// ============================================================================

/// Entry in the activation schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    CentralBank,
    CommercialBank,
    Firm,
    Household(HouseholdId),
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Tick number
    pub tick: usize,

    /// Macro snapshot taken before agents were activated
    pub snapshot: ModelSnapshot,

    /// Firm's classification of the goods market this tick
    pub demand_state: DemandState,

    pub num_hired: usize,
    pub num_fired: usize,

    /// Vacancies the firm could not fill
    pub num_unfilled: usize,

    /// Borrowers clamped to the loan-to-value cap
    pub num_credit_constrained: usize,
}

/// Simulation error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Firm error: {0}")]
    Firm(#[from] FirmError),

    #[error("Household not found: {0}")]
    UnknownHousehold(HouseholdId),
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Main orchestrator managing simulation state and tick loop
///
/// # Determinism
///
/// All randomness is via `rng_manager` with seeded xorshift64*.
/// Same seed + same config = identical results.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: OrchestratorConfig,

    /// Households and the unemployed pool
    state: SimulationState,

    central_bank: CentralBank,
    bank: CommercialBank,
    firm: Firm,

    /// Activation order
    schedule: Vec<AgentKind>,

    time_manager: TimeManager,
    rng_manager: RngManager,

    inflation: InflationSignals,
    unemployment: f64,
    aggregate_demand: f64,

    event_log: EventLog,
    collector: DataCollector,
}

impl Orchestrator {
    /// Create new orchestrator from configuration
    ///
    /// Draws the household population, sets output to initial aggregate
    /// demand and seeds employment with between half and all-but-one of the
    /// population.
    pub fn new(config: OrchestratorConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let model = &config.model;
        let mut rng_manager = RngManager::new(config.rng_seed);

        let central_bank =
            CentralBank::new(model.base_rate, model.policy_intensity, model.inflation_target);
        let bank = CommercialBank::new(&config.bank, central_bank.rate());
        let mut firm = Firm::new(&config.firm, model.population_size as f64);

        let mut state =
            SimulationState::new(model.population_size, &config.household, &mut rng_manager);

        let aggregate_demand = state.aggregate_demand();
        firm.set_output(aggregate_demand);

        let base_wage = {
            let (households, pool) = state.labor_market_mut();
            firm.init_employment(households, pool, &mut rng_manager)?
        };

        let mut schedule = vec![
            AgentKind::CentralBank,
            AgentKind::CommercialBank,
            AgentKind::Firm,
        ];
        schedule.extend(state.households().iter().map(|h| AgentKind::Household(h.id())));

        let mut event_log = EventLog::new();
        event_log.log(Event::WorkforceSeeded {
            tick: 0,
            employed: firm.employment(),
            base_wage,
        });

        let inflation = InflationSignals::new(
            model.inflation_target,
            model.trust,
            model.ema_smoothing,
            model.warmup_ticks,
        );
        let unemployment = state.unemployment_rate();

        Ok(Self {
            time_manager: TimeManager::new(model.warmup_ticks),
            config,
            state,
            central_bank,
            bank,
            firm,
            schedule,
            rng_manager,
            inflation,
            unemployment,
            aggregate_demand,
            event_log,
            collector: DataCollector::new(),
        })
    }

    /// Validate configuration
    fn validate_config(config: &OrchestratorConfig) -> Result<(), SimulationError> {
        let invalid = |msg: &str| Err(SimulationError::InvalidConfig(msg.to_string()));
        let unit = |x: f64| (0.0..=1.0).contains(&x);

        let model = &config.model;
        if model.population_size < 2 {
            return invalid("population_size must be >= 2");
        }
        if model.warmup_ticks == 0 {
            return invalid("warmup_ticks must be > 0");
        }
        if !unit(model.trust) {
            return invalid("trust must be in [0, 1]");
        }
        if !unit(model.ema_smoothing) {
            return invalid("ema_smoothing must be in [0, 1]");
        }

        let household = &config.household;
        if !unit(household.initial_ptc) {
            return invalid("initial_ptc must be in [0, 1]");
        }
        if household.consumption_std < 0.0
            || household.productivity_std < 0.0
            || household.wealth_std < 0.0
        {
            return invalid("household standard deviations must be >= 0");
        }
        if household.investment_cost < 0.0 {
            return invalid("investment_cost must be >= 0");
        }

        if config.bank.loan_to_value < 0.0 {
            return invalid("loan_to_value must be >= 0");
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Ticks completed so far
    pub fn current_tick(&self) -> usize {
        self.time_manager.current_tick()
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable state access for scenario setup in tests
    ///
    /// Direct mutation bypasses orchestrator invariants. Use with caution.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn central_bank(&self) -> &CentralBank {
        &self.central_bank
    }

    pub fn bank(&self) -> &CommercialBank {
        &self.bank
    }

    pub fn firm(&self) -> &Firm {
        &self.firm
    }

    pub fn inflation(&self) -> &InflationSignals {
        &self.inflation
    }

    /// Unemployment ratio computed at the start of the last tick
    pub fn unemployment(&self) -> f64 {
        self.unemployment
    }

    /// Aggregate demand computed at the start of the last tick
    pub fn aggregate_demand(&self) -> f64 {
        self.aggregate_demand
    }

    pub fn population_size(&self) -> usize {
        self.state.population_size()
    }

    pub fn schedule(&self) -> &[AgentKind] {
        &self.schedule
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn collector(&self) -> &DataCollector {
        &self.collector
    }

    /// Unemployed pool and wage ledger partition the population
    pub fn employment_partition_holds(&self) -> bool {
        self.state.employment_partition_holds(self.firm.wage_ledger())
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one simulation tick
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        let tick = self.current_tick();

        // STEP 1-3: MACRO AGGREGATES FROM THE PREVIOUS PERIOD
        self.unemployment = self.state.unemployment_rate();
        self.inflation.update(
            self.time_manager.phase(),
            self.firm.price(),
            self.firm.prev_price(),
        );
        self.aggregate_demand = self.state.aggregate_demand();

        // STEP 4: SNAPSHOT
        let snapshot = ModelSnapshot::capture(self);
        self.collector
            .collect(snapshot.clone(), &self.schedule, &self.state);

        // STEP 5: SEQUENTIAL ACTIVATION
        let mut result = TickResult {
            tick,
            snapshot,
            demand_state: self.firm.state(),
            num_hired: 0,
            num_fired: 0,
            num_unfilled: 0,
            num_credit_constrained: 0,
        };

        for index in 0..self.schedule.len() {
            let kind = self.schedule[index];
            self.activate(kind, tick, &mut result)?;
        }

        // STEP 6: ADVANCE TIME
        self.time_manager.advance_tick();

        Ok(result)
    }

    /// Execute `ticks` ticks, stopping at the first error
    pub fn run(&mut self, ticks: usize) -> Result<Vec<TickResult>, SimulationError> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    /// Dispatch a single agent's step
    fn activate(
        &mut self,
        kind: AgentKind,
        tick: usize,
        result: &mut TickResult,
    ) -> Result<(), SimulationError> {
        match kind {
            AgentKind::CentralBank => {
                let smoothed_inflation = self.inflation.smoothed();
                let rate = self.central_bank.set_rate(smoothed_inflation);
                self.log_event(Event::PolicyRateSet {
                    tick,
                    rate,
                    smoothed_inflation,
                });
            }
            AgentKind::CommercialBank => {
                self.bank.update_rates(self.central_bank.rate());
                self.log_event(Event::BankRatesUpdated {
                    tick,
                    loan_rate: self.bank.loan_rate(),
                    deposit_rate: self.bank.deposit_rate(),
                });
            }
            AgentKind::Firm => {
                let market = MarketConditions {
                    aggregate_demand: self.aggregate_demand,
                    expected_inflation: self.inflation.expected(),
                    unemployment: self.unemployment,
                    policy_rate: self.central_bank.rate(),
                };

                let outcome = {
                    let (households, pool) = self.state.labor_market_mut();
                    self.firm
                        .step(&market, households, pool, &mut self.rng_manager)?
                };

                result.demand_state = outcome.state;
                result.num_hired = outcome.workforce.hired.len();
                result.num_fired = outcome.workforce.fired.len();
                result.num_unfilled = outcome.workforce.unfilled;
                self.log_firm_step(tick, &outcome);
            }
            AgentKind::Household(id) => {
                let expected_inflation = self.inflation.expected();
                let (household, unemployed) = self
                    .state
                    .household_view_mut(id)
                    .ok_or(SimulationError::UnknownHousehold(id))?;
                let env = HouseholdEnvironment {
                    bank: &self.bank,
                    firm: &self.firm,
                    unemployed,
                    expected_inflation,
                };
                let credit = household.step(&env, &mut self.rng_manager);

                if let CreditPosition::Borrower {
                    investment_dropped,
                    constrained,
                } = credit.position
                {
                    if investment_dropped {
                        self.log_event(Event::InvestmentDropped {
                            tick,
                            household_id: id,
                        });
                    }
                    if constrained {
                        result.num_credit_constrained += 1;
                        self.log_event(Event::CreditConstrained {
                            tick,
                            household_id: id,
                            granted: credit.given_credit,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Event Logging
    // ========================================================================

    fn log_event(&mut self, event: Event) {
        self.event_log.log(event);
    }

    fn log_firm_step(&mut self, tick: usize, outcome: &FirmStepOutcome) {
        self.log_event(Event::DemandStateDetermined {
            tick,
            gap: outcome.gap,
            state: outcome.state,
        });

        for &household_id in &outcome.workforce.hired {
            let wage = self
                .firm
                .wage_ledger()
                .wage(household_id)
                .unwrap_or_default();
            self.log_event(Event::Hired {
                tick,
                household_id,
                wage,
            });
        }
        for &household_id in &outcome.workforce.fired {
            self.log_event(Event::Fired { tick, household_id });
        }
        if outcome.workforce.unfilled > 0 {
            self.log_event(Event::HiringStalled {
                tick,
                unfilled: outcome.workforce.unfilled,
            });
        }

        self.log_event(Event::PriceUpdated {
            tick,
            prev_price: self.firm.prev_price(),
            price: self.firm.price(),
        });
        self.log_event(Event::OutputUpdated {
            tick,
            output: self.firm.output(),
            hiring_responsiveness: self.firm.hiring_responsiveness(),
        });
    }
}
