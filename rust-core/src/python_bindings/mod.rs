//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use crate::error::DspError;

mod filter_bindings;
mod spectrum_bindings;
mod estimator_bindings;

impl From<DspError> for PyErr {
    fn from(err: DspError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn breath_rate(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<filter_bindings::PyLowpassFilter>()?;
    m.add_class::<estimator_bindings::PyRespiratoryRateEstimator>()?;

    m.add_function(wrap_pyfunction!(estimator_bindings::estimate_respiratory_rate, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::welch_psd, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::envelope, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::resample, m)?)?;

    // Add WindowType enum
    m.add_class::<filter_bindings::PyWindowType>()?;

    Ok(())
}
