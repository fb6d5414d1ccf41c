//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: Every stochastic draw in the economy (price noise, wage noise,
//! hiring/firing picks, consumption shocks, investment outcomes) MUST go
//! through this module.

mod xorshift;

pub use xorshift::RngManager;
