//! Window functions for envelope tapering and spectral analysis

use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/D)
    /// Sidelobe attenuation: ~31 dB, zero at both ends (symmetric form)
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/D)
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/D) + 0.08*cos(4πn/D)
    Blackman,

    /// Rectangular window (no windowing)
    Rectangular,
}

/// Denominator convention for the cosine terms.
///
/// `Symmetric` uses D = M-1 and is the taper applied to the whole envelope.
/// `Periodic` uses D = M, the form used for spectral segments (it is the
/// symmetric window of length M+1 with the last sample dropped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSymmetry {
    Symmetric,
    Periodic,
}

impl WindowType {
    /// Window value at index `n` given the cosine denominator `d`
    fn value(&self, n: usize, d: f64) -> f64 {
        let angle = 2.0 * PI * n as f64 / d;
        match self {
            WindowType::Hann => 0.5 - 0.5 * angle.cos(),
            WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
            WindowType::Blackman => 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos(),
            WindowType::Rectangular => 1.0,
        }
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
/// * `symmetry` - Cosine denominator convention
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1. A length-1 window is
/// `[1.0]` for every type; a length-0 window is empty.
pub fn generate_window(window_type: WindowType, length: usize, symmetry: WindowSymmetry) -> Vec<f64> {
    match length {
        0 => return Vec::new(),
        1 => return vec![1.0],
        _ => {}
    }

    let d = match symmetry {
        WindowSymmetry::Symmetric => (length - 1) as f64,
        WindowSymmetry::Periodic => length as f64,
    };

    (0..length).map(|n| window_type.value(n, d)).collect()
}

/// Sum of squared window coefficients (window energy)
pub fn window_energy(window: &[f64]) -> f64 {
    window.iter().map(|&w| w * w).sum()
}
