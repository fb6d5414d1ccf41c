//! Household agent
//!
//! Each household earns a wage (when employed), plans consumption, saves or
//! borrows through the commercial bank, invests in its own productivity and
//! adapts its propensity to consume to inflation expectations.
//!
//! # Step order
//!
//! ```text
//! plan_consumption → get_paid → credit_operations → invest
//!   → consume(given_credit) → update_wealth(interest) → update_ptc
//! ```
//!
//! Households are activated after the firm, so `get_paid` reads the wage
//! ledger the firm rewrote earlier in the same tick, and `update_ptc` sees the
//! firm's freshly updated price.

use serde::{Deserialize, Serialize};

use crate::models::bank::CommercialBank;
use crate::models::firm::{Firm, WageLedger};
use crate::models::state::UnemployedPool;
use crate::orchestrator::HouseholdConfig;
use crate::rng::RngManager;

/// Index of a household in the population arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HouseholdId(pub usize);

impl HouseholdId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for HouseholdId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HH_{:05}", self.0)
    }
}

/// Whether a household saved or borrowed this period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CreditPosition {
    /// Credit demand ≤ 0: surplus deposited at the bank
    Saver,
    /// Credit demand > 0: loan requested
    Borrower {
        /// Investment was abandoned to fit under the loan-to-value cap
        investment_dropped: bool,
        /// Loan was clamped to the loan-to-value cap
        constrained: bool,
    },
}

/// Result of `Household::credit_operations`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditOutcome {
    /// Credit demand after investment drop and clamping (≤ 0 for savers)
    pub given_credit: f64,
    /// Cashflow from the bank, credited to wealth at the end of the step
    pub interest: f64,
    pub position: CreditPosition,
}

/// Read-only view of the rest of the economy during a household's step
#[derive(Debug, Clone, Copy)]
pub struct HouseholdEnvironment<'a> {
    pub bank: &'a CommercialBank,
    pub firm: &'a Firm,
    pub unemployed: &'a UnemployedPool,
    pub expected_inflation: f64,
}

/// A single household
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    id: HouseholdId,
    wealth: f64,
    income: f64,
    productivity: f64,
    /// Propensity to consume out of income, always in [0, 1] after a step
    ptc: f64,
    desired_consumption: f64,
    /// Investment planned for the current period (0 once dropped)
    investment_cost: f64,
    /// Realized consumption demand
    demand: f64,
    params: HouseholdConfig,
}

impl Household {
    /// Draw a new household: productivity ~ N(1, σ), wealth ~ N(mean, std),
    /// initial desired consumption ~ N(μk, σk)
    pub fn new(id: HouseholdId, params: &HouseholdConfig, rng: &mut RngManager) -> Self {
        let productivity = rng.normal(1.0, params.productivity_std);
        let wealth = rng.normal(params.mean_wealth, params.wealth_std);
        let desired_consumption = rng.normal(params.consumption_mean, params.consumption_std);

        Self {
            id,
            wealth,
            income: 0.0,
            productivity,
            ptc: params.initial_ptc,
            desired_consumption,
            investment_cost: params.investment_cost,
            demand: desired_consumption,
            params: *params,
        }
    }

    /// Run the full household pipeline for one tick
    pub fn step(&mut self, env: &HouseholdEnvironment<'_>, rng: &mut RngManager) -> CreditOutcome {
        self.plan_consumption(rng);
        self.get_paid(env.unemployed, env.firm.wage_ledger());
        let credit = self.credit_operations(env.bank);
        self.invest(rng);
        self.consume(credit.given_credit);
        self.update_wealth(credit.interest);
        self.update_ptc(
            env.expected_inflation,
            env.bank.deposit_rate(),
            env.firm.prev_price(),
            env.firm.price(),
        );
        credit
    }

    /// Desired consumption out of last period's income plus an idiosyncratic shock
    pub fn plan_consumption(&mut self, rng: &mut RngManager) {
        let shock = rng.normal(self.params.consumption_mean, self.params.consumption_std);
        self.desired_consumption = self.ptc * self.income + shock;
    }

    /// Collect this period's wage (zero when unemployed) into wealth
    pub fn get_paid(&mut self, unemployed: &UnemployedPool, ledger: &WageLedger) {
        self.income = if unemployed.contains(self.id) {
            0.0
        } else {
            ledger.wage(self.id).unwrap_or(0.0)
        };
        self.wealth += self.income;
    }

    /// Save the surplus or borrow the shortfall, respecting the loan-to-value cap
    pub fn credit_operations(&mut self, bank: &CommercialBank) -> CreditOutcome {
        let mut credit_demand = self.desired_consumption + self.investment_cost - self.wealth;

        if credit_demand <= 0.0 {
            return CreditOutcome {
                given_credit: credit_demand,
                interest: bank.store(credit_demand),
                position: CreditPosition::Saver,
            };
        }

        let ceiling = bank.loan_to_value() * self.wealth;
        let mut investment_dropped = false;
        let mut constrained = false;

        if credit_demand > ceiling {
            investment_dropped = self.investment_cost != 0.0;
            credit_demand -= self.investment_cost;
            self.investment_cost = 0.0;

            if credit_demand > ceiling {
                credit_demand = ceiling;
                constrained = true;
            }
        }

        CreditOutcome {
            given_credit: credit_demand,
            interest: bank.lend(credit_demand),
            position: CreditPosition::Borrower {
                investment_dropped,
                constrained,
            },
        }
    }

    /// Productivity growth; investing shifts the growth distribution
    pub fn invest(&mut self, rng: &mut RngManager) {
        let mean = if self.is_investing() {
            self.params.invest_productivity_mean
        } else {
            self.params.idle_productivity_mean
        };
        self.productivity *= 1.0 + rng.normal(mean, self.params.productivity_std);
    }

    /// Realize consumption demand; borrowers may be limited by what they can fund
    pub fn consume(&mut self, given_credit: f64) {
        self.demand = if given_credit <= 0.0 {
            self.desired_consumption
        } else {
            self.desired_consumption
                .min(self.wealth + given_credit - self.investment_cost)
        };
    }

    pub fn update_wealth(&mut self, interest: f64) {
        self.wealth += interest - self.demand;
    }

    /// Adapt the propensity to consume to real deposit returns and price moves
    pub fn update_ptc(
        &mut self,
        expected_inflation: f64,
        deposit_rate: f64,
        prev_price: f64,
        price: f64,
    ) {
        self.ptc *= (1.0 + self.params.sensitivity * (expected_inflation - deposit_rate))
            * (1.0 + 0.01 * (prev_price - price));
        self.ptc = self.ptc.clamp(0.0, 1.0);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> HouseholdId {
        self.id
    }

    pub fn wealth(&self) -> f64 {
        self.wealth
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn productivity(&self) -> f64 {
        self.productivity
    }

    pub fn ptc(&self) -> f64 {
        self.ptc
    }

    pub fn desired_consumption(&self) -> f64 {
        self.desired_consumption
    }

    pub fn investment_cost(&self) -> f64 {
        self.investment_cost
    }

    pub fn is_investing(&self) -> bool {
        self.investment_cost != 0.0
    }

    pub fn demand(&self) -> f64 {
        self.demand
    }

    // Test and scenario setup

    pub fn set_wealth(&mut self, wealth: f64) {
        self.wealth = wealth;
    }

    pub fn set_productivity(&mut self, productivity: f64) {
        self.productivity = productivity;
    }

    pub fn set_ptc(&mut self, ptc: f64) {
        self.ptc = ptc;
    }

    pub fn set_desired_consumption(&mut self, desired_consumption: f64) {
        self.desired_consumption = desired_consumption;
    }

    pub fn set_income(&mut self, income: f64) {
        self.income = income;
    }
}
