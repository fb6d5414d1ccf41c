//! Python bindings (PyO3)
//!
//! Exposes the engine to an external dashboard: configuration goes in as
//! nested dicts, reporter rows come out as dicts.

pub mod model;
pub mod types;
