//! Central bank
//!
//! Sets the policy rate with an inflation-gap (Taylor-like) rule:
//!
//! ```text
//! rate = base_rate + intensity * (smoothed_inflation - inflation_target)
//! ```
//!
//! The central bank is activated first in every tick, so the commercial bank,
//! the firm and households all observe this tick's policy rate.

use serde::{Deserialize, Serialize};

/// The monetary authority of the economy
///
/// # Example
/// ```
/// use econ_simulator_core_rs::CentralBank;
///
/// let mut cb = CentralBank::new(0.05, 0.0, 0.04);
/// cb.set_rate(0.30);
/// assert_eq!(cb.rate(), 0.05); // zero intensity: policy is inert
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralBank {
    rate: f64,
    base_rate: f64,
    intensity: f64,
    inflation_target: f64,
}

impl CentralBank {
    /// Create a central bank; the initial rate assumes zero smoothed inflation
    pub fn new(base_rate: f64, intensity: f64, inflation_target: f64) -> Self {
        let mut cb = Self {
            rate: base_rate,
            base_rate,
            intensity,
            inflation_target,
        };
        cb.set_rate(0.0);
        cb
    }

    /// Recompute the policy rate from smoothed inflation and return it
    pub fn set_rate(&mut self, smoothed_inflation: f64) -> f64 {
        self.rate = self.base_rate + self.intensity * (smoothed_inflation - self.inflation_target);
        self.rate
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn base_rate(&self) -> f64 {
        self.base_rate
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn inflation_target(&self) -> f64 {
        self.inflation_target
    }
}
