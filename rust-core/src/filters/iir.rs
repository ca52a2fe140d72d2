//! IIR filtering and zero-phase (forward-backward) application
//!
//! Direct form II transposed recursion with steady-state initial conditions,
//! applied forward and backward over an odd-reflected extension of the input.

use super::design::{design_butterworth_lowpass, FilterCoefficients};
use crate::error::{DspError, DspResult};

/// Run the filter over `input` starting from delay-line state `zi`
///
/// # Arguments
/// * `coeffs` - Normalized filter coefficients (`a[0] == 1`)
/// * `input` - Input samples
/// * `zi` - Initial state, length `order` (zeros if `None`)
///
/// # Returns
/// Filtered output (same length as input)
pub fn lfilter(coeffs: &FilterCoefficients, input: &[f64], zi: Option<&[f64]>) -> Vec<f64> {
    let b = coeffs.b();
    let a = coeffs.a();
    let order = coeffs.order();

    let mut state = vec![0.0; order];
    if let Some(zi) = zi {
        let n = zi.len().min(order);
        state[..n].copy_from_slice(&zi[..n]);
    }

    let mut output = Vec::with_capacity(input.len());
    for &x in input {
        let y = b[0] * x + state.first().copied().unwrap_or(0.0);

        // z[i] = b[i+1] x + z[i+1] - a[i+1] y
        for i in 0..order {
            let next = if i + 1 < order { state[i + 1] } else { 0.0 };
            state[i] = b[i + 1] * x + next - a[i + 1] * y;
        }

        output.push(y);
    }

    output
}

/// Initial state that puts the filter in steady state for a unit step
///
/// Scaling the result by the first input sample suppresses the start-up
/// transient for signals that begin away from zero.
pub fn lfilter_zi(coeffs: &FilterCoefficients) -> Vec<f64> {
    let b = coeffs.b();
    let a = coeffs.a();
    let order = coeffs.order();
    if order == 0 {
        return Vec::new();
    }

    // zi = A zi + B, solved in closed form for the companion matrix A
    let rhs: Vec<f64> = (1..=order).map(|k| b[k] - a[k] * b[0]).collect();
    let a_sum: f64 = a.iter().sum();

    let mut zi = vec![0.0; order];
    zi[0] = rhs.iter().sum::<f64>() / a_sum;

    let mut asum = 1.0;
    let mut csum = 0.0;
    for k in 1..order {
        asum += a[k];
        csum += rhs[k - 1];
        zi[k] = asum * zi[0] - csum;
    }

    zi
}

/// Odd reflection about both end points: 2*x[0] - x[pad..0], x, 2*x[-1] - x[-2..]
fn odd_extension(input: &[f64], pad: usize) -> Vec<f64> {
    let n = input.len();
    let first = input[0];
    let last = input[n - 1];

    let mut extended = Vec::with_capacity(n + 2 * pad);
    extended.extend((1..=pad).rev().map(|i| 2.0 * first - input[i]));
    extended.extend_from_slice(input);
    extended.extend((1..=pad).map(|i| 2.0 * last - input[n - 1 - i]));
    extended
}

/// Zero-phase forward-backward filtering
///
/// # Arguments
/// * `coeffs` - Filter coefficients
/// * `input` - Input samples (non-empty)
///
/// # Returns
/// Filtered samples, same length as input, with no group delay
///
/// The input is extended by `3 * (order + 1)` odd-reflected samples at each
/// end (fewer when the input is too short) and trimmed afterwards.
pub fn filtfilt(coeffs: &FilterCoefficients, input: &[f64]) -> DspResult<Vec<f64>> {
    if input.is_empty() {
        return Err(DspError::InvalidLength { stage: "filtfilt", len: 0 });
    }

    let default_pad = 3 * coeffs.a().len().max(coeffs.b().len());
    let pad = default_pad.min(input.len() - 1);
    if pad < default_pad {
        log::warn!(
            "filtfilt: input of {} samples is shorter than the edge padding, clamping pad to {}",
            input.len(),
            pad
        );
    }

    let extended = odd_extension(input, pad);
    let zi = lfilter_zi(coeffs);

    // Forward pass
    let x0 = extended[0];
    let forward_zi: Vec<f64> = zi.iter().map(|&z| z * x0).collect();
    let mut forward = lfilter(coeffs, &extended, Some(&forward_zi));

    // Backward pass over the reversed forward output
    forward.reverse();
    let y0 = forward[0];
    let backward_zi: Vec<f64> = zi.iter().map(|&z| z * y0).collect();
    let mut backward = lfilter(coeffs, &forward, Some(&backward_zi));
    backward.reverse();

    Ok(backward[pad..pad + input.len()].to_vec())
}

/// Butterworth lowpass stage with zero-phase application
#[derive(Debug, Clone, PartialEq)]
pub struct LowpassFilter {
    coefficients: FilterCoefficients,
    cutoff_hz: f64,
    sample_rate: f64,
}

impl LowpassFilter {
    /// Design the filter once; the coefficients are reused for every signal.
    pub fn design(order: usize, cutoff_hz: f64, sample_rate: f64) -> DspResult<Self> {
        let coefficients = design_butterworth_lowpass(order, cutoff_hz, sample_rate)?;
        Ok(Self {
            coefficients,
            cutoff_hz,
            sample_rate,
        })
    }

    /// Zero-phase filter a complete buffer
    pub fn apply(&self, signal: &[f64]) -> DspResult<Vec<f64>> {
        filtfilt(&self.coefficients, signal)
    }

    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coefficients
    }

    pub fn cutoff_hz(&self) -> f64 {
        self.cutoff_hz
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}
