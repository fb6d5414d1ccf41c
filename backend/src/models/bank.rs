//! Commercial bank
//!
//! Aggregate representative bank. Every tick it re-derives its rates from the
//! central bank's policy rate:
//!
//! ```text
//! loan_rate    = policy_rate * (1 + loan_markup)
//! deposit_rate = policy_rate * (1 - deposit_markdown)
//! ```
//!
//! `lend` and `store` return the cashflow credited to a household's wealth at
//! the end of its step. The bank performs no bounds checking: the loan-to-value
//! cap is enforced by the borrower (see `Household::credit_operations`).

use serde::{Deserialize, Serialize};

use crate::orchestrator::BankConfig;

/// Aggregate commercial bank
///
/// # Example
/// ```
/// use econ_simulator_core_rs::{BankConfig, CommercialBank};
///
/// let config = BankConfig { loan_to_value: 0.5, loan_markup: 0.5, deposit_markdown: 0.1 };
/// let bank = CommercialBank::new(&config, 0.10);
/// assert!((bank.loan_rate() - 0.15).abs() < 1e-12);
/// assert!((bank.deposit_rate() - 0.09).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialBank {
    loan_rate: f64,
    deposit_rate: f64,
    loan_to_value: f64,
    loan_markup: f64,
    deposit_markdown: f64,
}

impl CommercialBank {
    /// Create a bank with rates already derived from `policy_rate`
    pub fn new(config: &BankConfig, policy_rate: f64) -> Self {
        let mut bank = Self {
            loan_rate: 0.0,
            deposit_rate: 0.0,
            loan_to_value: config.loan_to_value,
            loan_markup: config.loan_markup,
            deposit_markdown: config.deposit_markdown,
        };
        bank.update_rates(policy_rate);
        bank
    }

    /// Derive loan and deposit rates from the policy rate
    pub fn update_rates(&mut self, policy_rate: f64) {
        self.loan_rate = policy_rate * (1.0 + self.loan_markup);
        self.deposit_rate = policy_rate * (1.0 - self.deposit_markdown);
    }

    /// Debt plus interest for borrowing `amount` (negative cashflow for a borrower)
    pub fn lend(&self, amount: f64) -> f64 {
        -amount * (1.0 + self.loan_rate)
    }

    /// Savings plus interest for a saver; `amount` is the (non-positive) credit demand
    pub fn store(&self, amount: f64) -> f64 {
        -amount * (1.0 + self.deposit_rate)
    }

    pub fn loan_rate(&self) -> f64 {
        self.loan_rate
    }

    pub fn deposit_rate(&self) -> f64 {
        self.deposit_rate
    }

    pub fn loan_to_value(&self) -> f64 {
        self.loan_to_value
    }
}
