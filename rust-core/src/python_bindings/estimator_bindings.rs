//! Python bindings for the respiratory rate estimator

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::pipeline::{self, EstimatorConfig, RespiratoryRateEstimator, SampleBuffer};
use crate::spectrum::{PeakPolicy, WelchConfig};

/// Estimate the respiratory frequency (Hz) with the default configuration
///
/// Args:
///     samples: Raw samples as numpy array
///     source_rate_hz: Sample rate of `samples` in Hz
#[pyfunction]
pub fn estimate_respiratory_rate(samples: PyReadonlyArray1<f64>, source_rate_hz: f64) -> PyResult<f64> {
    Ok(pipeline::estimate_respiratory_rate(samples.as_slice()?, source_rate_hz)?)
}

/// Configurable estimator exposed to Python
#[pyclass(name = "RespiratoryRateEstimator", unsendable)]
pub struct PyRespiratoryRateEstimator {
    estimator: RespiratoryRateEstimator,
}

#[pymethods]
impl PyRespiratoryRateEstimator {
    /// Create a new estimator
    ///
    /// Args:
    ///     intermediate_rate_hz: Envelope extraction rate
    ///     cutoff_hz: Envelope lowpass cutoff
    ///     filter_order: Butterworth order
    ///     analysis_rate_hz: PSD rate
    ///     segment_len: PSD segment length (default: whole analysis buffer)
    ///     band: Optional (min_hz, max_hz) restricting the peak search
    ///     trace_stages: Log every stage at debug level
    #[new]
    #[pyo3(signature = (
        intermediate_rate_hz=1000.0,
        cutoff_hz=2.0,
        filter_order=4,
        analysis_rate_hz=10.0,
        segment_len=None,
        band=None,
        trace_stages=false
    ))]
    fn new(
        intermediate_rate_hz: f64,
        cutoff_hz: f64,
        filter_order: usize,
        analysis_rate_hz: f64,
        segment_len: Option<usize>,
        band: Option<(f64, f64)>,
        trace_stages: bool,
    ) -> PyResult<Self> {
        let peak_policy = match band {
            Some((min_hz, max_hz)) => PeakPolicy::LocalMaximumInBand { min_hz, max_hz },
            None => PeakPolicy::GlobalMaximum,
        };
        let config = EstimatorConfig {
            intermediate_rate_hz,
            filter_order,
            cutoff_hz,
            analysis_rate_hz,
            welch: WelchConfig {
                segment_len,
                ..WelchConfig::default()
            },
            peak_policy,
            trace_stages,
        };

        Ok(Self {
            estimator: RespiratoryRateEstimator::new(config)?,
        })
    }

    /// Estimate the respiratory frequency in Hz
    fn estimate(&mut self, samples: PyReadonlyArray1<f64>, source_rate_hz: f64) -> PyResult<f64> {
        let buffer = SampleBuffer::from_slice(samples.as_slice()?, source_rate_hz)?;
        Ok(self.estimator.estimate(&buffer)?.frequency_hz)
    }

    /// Estimate and return (frequency_hz, breaths_per_minute, freqs, psd)
    fn estimate_detailed<'py>(
        &mut self,
        py: Python<'py>,
        samples: PyReadonlyArray1<f64>,
        source_rate_hz: f64,
    ) -> PyResult<(f64, f64, &'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let buffer = SampleBuffer::from_slice(samples.as_slice()?, source_rate_hz)?;
        let (estimate, psd) = self.estimator.estimate_detailed(&buffer)?;

        Ok((
            estimate.frequency_hz,
            estimate.breaths_per_minute(),
            PyArray1::from_slice(py, psd.frequencies()),
            PyArray1::from_slice(py, psd.power()),
        ))
    }
}
