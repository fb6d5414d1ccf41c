//! Time management for the simulation
//!
//! The economy advances in discrete ticks (one tick = one period). Besides the
//! tick counter, the only time-dependent behaviour is the inflation warm-up
//! window: smoothed inflation is not exponentially averaged until enough
//! periods have been observed.

use serde::{Deserialize, Serialize};

/// Default length of the inflation warm-up window (ticks)
pub const DEFAULT_WARMUP_TICKS: usize = 20;

/// Where the current tick falls relative to the warm-up window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarmupPhase {
    /// `tick < window`: observations are accumulated
    Accumulating,
    /// `tick == window`: smoothed signal is seeded with the accumulated mean
    Closing,
    /// `tick > window`: exponential smoothing
    Smoothing,
}

/// Manages simulation time in discrete ticks
///
/// # Example
/// ```
/// use econ_simulator_core_rs::{TimeManager, WarmupPhase};
///
/// let mut time = TimeManager::new(2);
/// assert_eq!(time.phase(), WarmupPhase::Accumulating);
///
/// time.advance_tick();
/// time.advance_tick();
/// assert_eq!(time.current_tick(), 2);
/// assert_eq!(time.phase(), WarmupPhase::Closing);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// Ticks completed since simulation start
    current_tick: usize,
    /// Length of the inflation warm-up window
    warmup_ticks: usize,
}

impl TimeManager {
    /// Create a new TimeManager
    ///
    /// # Panics
    /// Panics if `warmup_ticks == 0` (configuration validation rejects it first)
    pub fn new(warmup_ticks: usize) -> Self {
        assert!(warmup_ticks > 0, "warmup_ticks must be positive");
        Self {
            current_tick: 0,
            warmup_ticks,
        }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Ticks completed so far
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Warm-up phase of the current tick
    pub fn phase(&self) -> WarmupPhase {
        use std::cmp::Ordering;

        match self.current_tick.cmp(&self.warmup_ticks) {
            Ordering::Less => WarmupPhase::Accumulating,
            Ordering::Equal => WarmupPhase::Closing,
            Ordering::Greater => WarmupPhase::Smoothing,
        }
    }
}
