//! Frequency-domain resampling
//!
//! The spectrum of the whole buffer is truncated or zero-padded to the new
//! length and transformed back, so the output is the band-limited periodic
//! interpolation of the input.

use super::fft::{FftEngine, FourierTransform};
use crate::error::{check_sample_rate, DspError, DspResult};
use num_complex::Complex64;

/// Resample `signal` to exactly `target_len` samples
///
/// # Arguments
/// * `fft` - Transform backend
/// * `signal` - Input samples (N > 0)
/// * `target_len` - Output length (M > 0)
pub fn resample<T: FourierTransform + ?Sized>(
    fft: &mut T,
    signal: &[f64],
    target_len: usize,
) -> DspResult<Vec<f64>> {
    let n_in = signal.len();
    if n_in == 0 {
        return Err(DspError::InvalidLength { stage: "resample", len: n_in });
    }
    if target_len == 0 {
        return Err(DspError::InvalidLength { stage: "resample", len: target_len });
    }

    let spectrum = fft.forward_real(signal)?;

    // Keep the bins both lengths can represent
    let shared = n_in.min(target_len);
    let kept = shared / 2 + 1;
    let mut resized = vec![Complex64::new(0.0, 0.0); FftEngine::num_bins(target_len)];
    resized[..kept].copy_from_slice(&spectrum[..kept]);

    // The shared Nyquist bin carries both signs when downsampling and must
    // be split between them when upsampling
    if shared % 2 == 0 {
        if target_len < n_in {
            resized[shared / 2] *= 2.0;
        } else if n_in < target_len {
            resized[shared / 2] *= 0.5;
        }
    }

    let output = fft.inverse_real(&resized, target_len)?;
    let scale = 1.0 / n_in as f64;

    Ok(output.into_iter().map(|y| y * scale).collect())
}

/// Output length for a rate conversion: round(N * to / from)
pub fn target_length(len: usize, from_hz: f64, to_hz: f64) -> DspResult<usize> {
    let from_hz = check_sample_rate(from_hz)?;
    let to_hz = check_sample_rate(to_hz)?;
    Ok((len as f64 * to_hz / from_hz).round() as usize)
}

/// Resample from one sampling rate to another
pub fn resample_to_rate<T: FourierTransform + ?Sized>(
    fft: &mut T,
    signal: &[f64],
    from_hz: f64,
    to_hz: f64,
) -> DspResult<Vec<f64>> {
    if signal.is_empty() {
        return Err(DspError::InvalidLength { stage: "resample", len: 0 });
    }
    let target_len = target_length(signal.len(), from_hz, to_hz)?;
    resample(fft, signal, target_len)
}
