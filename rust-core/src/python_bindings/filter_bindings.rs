//! Python bindings for Butterworth design and zero-phase filtering

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::filters::{LowpassFilter, WindowType};

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Blackman => WindowType::Blackman,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

/// Butterworth lowpass exposed to Python
#[pyclass(name = "LowpassFilter")]
pub struct PyLowpassFilter {
    filter: LowpassFilter,
}

#[pymethods]
impl PyLowpassFilter {
    /// Design a Butterworth lowpass filter
    ///
    /// Args:
    ///     order: Number of poles
    ///     cutoff_hz: Cutoff frequency in Hz
    ///     sample_rate: Sample rate in Hz
    #[new]
    #[pyo3(signature = (order=4, cutoff_hz=2.0, sample_rate=1000.0))]
    fn new(order: usize, cutoff_hz: f64, sample_rate: f64) -> PyResult<Self> {
        Ok(Self {
            filter: LowpassFilter::design(order, cutoff_hz, sample_rate)?,
        })
    }

    /// Zero-phase filter a signal
    ///
    /// Args:
    ///     signal: Input samples as numpy array
    ///
    /// Returns:
    ///     Filtered samples (same length)
    fn apply<'py>(&self, py: Python<'py>, signal: PyReadonlyArray1<f64>) -> PyResult<&'py PyArray1<f64>> {
        let output = self.filter.apply(signal.as_slice()?)?;
        Ok(PyArray1::from_vec(py, output))
    }

    /// Feedforward coefficients b
    fn b<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.filter.coefficients().b())
    }

    /// Feedback coefficients a (a[0] == 1)
    fn a<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.filter.coefficients().a())
    }

    fn cutoff_hz(&self) -> f64 {
        self.filter.cutoff_hz()
    }

    fn sample_rate(&self) -> f64 {
        self.filter.sample_rate()
    }
}
