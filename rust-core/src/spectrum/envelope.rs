//! Amplitude envelope via the analytic signal
//!
//! Negative frequencies are removed in the FFT domain (positive ones doubled,
//! DC and the even-length Nyquist bin kept once), and the magnitude of the
//! inverse transform is the instantaneous amplitude.

use super::fft::FourierTransform;
use crate::error::{DspError, DspResult};
use num_complex::Complex64;

/// Analytic signal x + j*H{x} of a real sequence
pub fn analytic_signal<T: FourierTransform + ?Sized>(fft: &mut T, signal: &[f64]) -> DspResult<Vec<Complex64>> {
    let n = signal.len();
    if n == 0 {
        return Err(DspError::InvalidLength { stage: "envelope", len: 0 });
    }

    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    fft.forward(&mut buffer);

    // Weights: h[0] = 1, h[1..ceil(n/2)] = 2, h[n/2] = 1 for even n, 0 above
    let positive_end = (n + 1) / 2;
    for (k, bin) in buffer.iter_mut().enumerate() {
        let weight = if k == 0 || (n % 2 == 0 && k == n / 2) {
            1.0
        } else if k < positive_end {
            2.0
        } else {
            0.0
        };
        *bin *= weight;
    }

    fft.inverse(&mut buffer);
    let scale = 1.0 / n as f64;
    for value in buffer.iter_mut() {
        *value *= scale;
    }

    Ok(buffer)
}

/// Instantaneous amplitude |x + j*H{x}|, same length as the input
pub fn envelope<T: FourierTransform + ?Sized>(fft: &mut T, signal: &[f64]) -> DspResult<Vec<f64>> {
    Ok(analytic_signal(fft, signal)?.iter().map(|c| c.norm()).collect())
}
