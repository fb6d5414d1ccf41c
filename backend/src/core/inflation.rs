//! Inflation signals
//!
//! Three signals are derived from the firm's price path once per tick:
//!
//! - **actual**: `(price - prev_price) / prev_price`
//! - **expected**: adaptive expectation anchored on the central bank target,
//!   `trust * target + (1 - trust) * actual`, formed from the *previous*
//!   tick's actual inflation
//! - **smoothed**: tracks `actual` during the warm-up window, is seeded with
//!   the window mean when the window closes, then follows an EMA

use serde::{Deserialize, Serialize};

use super::time::WarmupPhase;

/// Inflation signals observed by the central bank, the firm and households
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationSignals {
    actual: f64,
    smoothed: f64,
    expected: f64,
    /// Sum of actual inflation over the warm-up window
    warmup_sum: f64,
    warmup_ticks: usize,
    ema_smoothing: f64,
    trust: f64,
    target: f64,
}

impl InflationSignals {
    /// All signals start at zero
    pub fn new(target: f64, trust: f64, ema_smoothing: f64, warmup_ticks: usize) -> Self {
        Self {
            actual: 0.0,
            smoothed: 0.0,
            expected: 0.0,
            warmup_sum: 0.0,
            warmup_ticks,
            ema_smoothing,
            trust,
            target,
        }
    }

    /// Recompute all three signals from the firm's last price move
    pub fn update(&mut self, phase: WarmupPhase, price: f64, prev_price: f64) {
        self.expected = self.trust * self.target + (1.0 - self.trust) * self.actual;

        self.actual = (price - prev_price) / prev_price;

        match phase {
            WarmupPhase::Accumulating => {
                self.smoothed = self.actual;
                self.warmup_sum += self.actual;
            }
            WarmupPhase::Closing => {
                self.smoothed = self.warmup_sum / self.warmup_ticks as f64;
            }
            WarmupPhase::Smoothing => {
                self.smoothed =
                    self.ema_smoothing * self.actual + (1.0 - self.ema_smoothing) * self.smoothed;
            }
        }
    }

    pub fn actual(&self) -> f64 {
        self.actual
    }

    pub fn smoothed(&self) -> f64 {
        self.smoothed
    }

    pub fn expected(&self) -> f64 {
        self.expected
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}
