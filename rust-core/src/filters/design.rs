//! Butterworth IIR lowpass design
//!
//! Analog prototype poles on the unit circle, scaled to the prewarped cutoff
//! and mapped to the z-plane with the bilinear transform.

use crate::error::{check_sample_rate, DspError, DspResult};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Transfer function coefficients of a digital IIR filter
///
/// H(z) = (b[0] + b[1] z^-1 + ... ) / (a[0] + a[1] z^-1 + ... )
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl FilterCoefficients {
    /// Build from raw feedforward/feedback sequences.
    ///
    /// Both sequences must be non-empty with equal length and `a[0] != 0`.
    /// The coefficients are normalized so that `a[0] == 1`.
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> DspResult<Self> {
        if b.is_empty() || b.len() != a.len() {
            return Err(DspError::InvalidLength { stage: "filter coefficients", len: b.len() });
        }
        let a0 = a[0];
        if a0 == 0.0 || !a0.is_finite() {
            return Err(DspError::InvalidLength { stage: "filter coefficients", len: 0 });
        }

        Ok(Self {
            b: b.iter().map(|&v| v / a0).collect(),
            a: a.iter().map(|&v| v / a0).collect(),
        })
    }

    /// Feedforward (numerator) coefficients
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Feedback (denominator) coefficients, `a[0] == 1`
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Filter order (number of poles)
    pub fn order(&self) -> usize {
        self.a.len() - 1
    }

    /// Gain at DC: sum(b) / sum(a)
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }

    /// Magnitude response at `freq_hz` for a filter running at `sample_rate`
    pub fn magnitude_at(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / sample_rate;
        let eval = |coeffs: &[f64]| {
            coeffs
                .iter()
                .enumerate()
                .map(|(n, &c)| c * Complex64::from_polar(1.0, -omega * n as f64))
                .sum::<Complex64>()
        };
        (eval(&self.b) / eval(&self.a)).norm()
    }
}

/// Design a digital Butterworth lowpass filter
///
/// # Arguments
/// * `order` - Number of poles (k >= 1)
/// * `cutoff_hz` - -3 dB frequency, 0 < fc < fs/2
/// * `sample_rate` - Sampling rate of the signal the filter will run on
///
/// # Returns
/// Coefficients with `b.len() == a.len() == order + 1` and unit DC gain
pub fn design_butterworth_lowpass(order: usize, cutoff_hz: f64, sample_rate: f64) -> DspResult<FilterCoefficients> {
    let sample_rate = check_sample_rate(sample_rate)?;
    if order < 1 {
        return Err(DspError::InvalidOrder(order));
    }

    let nyquist_hz = sample_rate / 2.0;
    if !(cutoff_hz > 0.0 && cutoff_hz < nyquist_hz) {
        return Err(DspError::InvalidCutoff { cutoff_hz, nyquist_hz });
    }

    // Normalized cutoff (1.0 = Nyquist), designed against fs = 2
    let wn = cutoff_hz / nyquist_hz;
    let fs2 = 4.0;
    let warped = fs2 * (PI * wn / 2.0).tan();

    // Analog prototype poles, left half-plane, scaled to the warped cutoff
    let k = order as f64;
    let analog_poles: Vec<Complex64> = (0..order)
        .map(|i| {
            let m = -(k - 1.0) + 2.0 * i as f64;
            -Complex64::from_polar(1.0, PI * m / (2.0 * k)) * warped
        })
        .collect();

    // Bilinear transform: z = (fs2 + s) / (fs2 - s), zeros at infinity land on z = -1
    let digital_poles: Vec<Complex64> = analog_poles
        .iter()
        .map(|&p| (fs2 + p) / (fs2 - p))
        .collect();
    let denominator: Complex64 = analog_poles.iter().map(|&p| fs2 - p).product();
    let gain = warped.powi(order as i32) / denominator.re;

    let zeros = vec![Complex64::new(-1.0, 0.0); order];
    let b: Vec<f64> = poly(&zeros).iter().map(|c| c.re * gain).collect();
    let a: Vec<f64> = poly(&digital_poles).iter().map(|c| c.re).collect();

    FilterCoefficients::new(b, a)
}

/// Monic polynomial coefficients (highest power first) from its roots
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }
    coeffs
}
