//! Tapering applied to the filtered envelope before the final resampling
//!
//! Reduces edge artifacts that the periodic FFT interpolation would
//! otherwise smear across the analysis band.

use crate::filters::windows::{generate_window, WindowSymmetry, WindowType};

/// Symmetric Hann window: w[i] = 0.5*(1 - cos(2πi/(N-1))), w = [1.0] for N = 1
pub fn hann_window(length: usize) -> Vec<f64> {
    generate_window(WindowType::Hann, length, WindowSymmetry::Symmetric)
}

/// Apply a symmetric window to a signal
///
/// # Returns
/// Windowed copy of the signal; the input is left untouched
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let window = generate_window(window_type, signal.len(), WindowSymmetry::Symmetric);

    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

/// Apply the Hann taper used by the estimator
pub fn apply_hann(signal: &[f64]) -> Vec<f64> {
    apply_window(signal, WindowType::Hann)
}
