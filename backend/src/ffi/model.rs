//! PyO3 wrapper for the Orchestrator

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{agent_row_to_py, parse_orchestrator_config, snapshot_to_py, tick_result_to_py};
use crate::orchestrator::Orchestrator;

/// Python wrapper for the simulation
///
/// # Example (from Python)
///
/// ```python
/// from econ_simulator_core_rs import Model
///
/// model = Model({"rng_seed": 0, "model": {"population_size": 1000}})
/// model.run(50)
/// rows = model.model_vars()
/// print(rows[-1]["Gini"])
/// ```
#[pyclass(name = "Model")]
pub struct PyModel {
    inner: Orchestrator,
}

fn runtime_error(context: &str, err: impl std::fmt::Display) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!("{}: {}", context, err))
}

#[pymethods]
impl PyModel {
    /// Create a new model from a (possibly empty) configuration dict
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let rust_config = match config {
            Some(dict) => parse_orchestrator_config(dict)?,
            None => Default::default(),
        };

        let inner = Orchestrator::new(rust_config)
            .map_err(|e| runtime_error("Failed to create model", e))?;

        Ok(PyModel { inner })
    }

    /// Execute one tick and return its summary dict
    fn step(&mut self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let result = self
            .inner
            .tick()
            .map_err(|e| runtime_error("Tick execution failed", e))?;

        tick_result_to_py(py, &result)
    }

    /// Execute `ticks` ticks
    fn run(&mut self, ticks: usize) -> PyResult<()> {
        self.inner
            .run(ticks)
            .map(|_| ())
            .map_err(|e| runtime_error("Run failed", e))
    }

    fn current_tick(&self) -> usize {
        self.inner.current_tick()
    }

    /// Model reporter rows collected so far
    fn model_vars(&self, py: Python<'_>) -> PyResult<Py<PyList>> {
        let list = PyList::empty_bound(py);
        for snapshot in self.inner.collector().model_vars() {
            list.append(snapshot_to_py(py, snapshot)?)?;
        }
        Ok(list.unbind())
    }

    /// Agent reporter rows collected so far
    fn agent_vars(&self, py: Python<'_>) -> PyResult<Py<PyList>> {
        let list = PyList::empty_bound(py);
        for row in self.inner.collector().agent_vars() {
            list.append(agent_row_to_py(py, row)?)?;
        }
        Ok(list.unbind())
    }

    /// Whether the unemployed pool and wage ledger partition the population
    fn employment_partition_holds(&self) -> bool {
        self.inner.employment_partition_holds()
    }
}
