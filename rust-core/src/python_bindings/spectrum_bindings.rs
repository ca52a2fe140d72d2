//! Python bindings for the spectral stages

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::spectrum::{self, FftEngine, WelchConfig};
use super::filter_bindings::PyWindowType;

/// Welch power spectral density
///
/// Args:
///     signal: Input signal as numpy array
///     sample_rate: Sample rate in Hz
///     segment_len: Segment length (default: whole signal)
///     window_type: Segment window (default: Hann)
///
/// Returns:
///     Tuple of (frequencies, psd) numpy arrays
#[pyfunction]
#[pyo3(signature = (signal, sample_rate, segment_len=None, window_type=PyWindowType::Hann))]
pub fn welch_psd<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    sample_rate: f64,
    segment_len: Option<usize>,
    window_type: PyWindowType,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let config = WelchConfig {
        segment_len,
        window: window_type.into(),
        ..WelchConfig::default()
    };

    let mut fft = FftEngine::new();
    let psd = spectrum::welch(&mut fft, signal.as_slice()?, sample_rate, &config)?;

    Ok((
        PyArray1::from_slice(py, psd.frequencies()),
        PyArray1::from_slice(py, psd.power()),
    ))
}

/// Analytic-signal envelope
#[pyfunction]
pub fn envelope<'py>(py: Python<'py>, signal: PyReadonlyArray1<f64>) -> PyResult<&'py PyArray1<f64>> {
    let mut fft = FftEngine::new();
    let output = spectrum::envelope(&mut fft, signal.as_slice()?)?;
    Ok(PyArray1::from_vec(py, output))
}

/// Frequency-domain resampling to `target_len` samples
#[pyfunction]
pub fn resample<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    target_len: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let mut fft = FftEngine::new();
    let output = spectrum::resample(&mut fft, signal.as_slice()?, target_len)?;
    Ok(PyArray1::from_vec(py, output))
}
