//! FFT engine using realfft for real-valued signals and rustfft for complex ones
//!
//! Plans are cached by the planners, so one engine can serve every stage of
//! a pipeline run regardless of the buffer lengths involved.

use crate::error::{DspError, DspResult};
use num_complex::Complex64;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};

/// Forward/inverse transform capability used by the pipeline stages
///
/// Both inverse transforms are unnormalized: the caller divides by the
/// transform length.
pub trait FourierTransform {
    /// Real-input FFT, returning the `len/2 + 1` non-negative frequency bins
    fn forward_real(&mut self, signal: &[f64]) -> DspResult<Vec<Complex64>>;

    /// Inverse of `forward_real` for an output of `len` samples
    ///
    /// `spectrum` must hold `len/2 + 1` bins. The imaginary parts of the DC
    /// bin and (for even `len`) the Nyquist bin are ignored.
    fn inverse_real(&mut self, spectrum: &[Complex64], len: usize) -> DspResult<Vec<f64>>;

    /// In-place complex forward FFT
    fn forward(&mut self, buffer: &mut [Complex64]);

    /// In-place complex inverse FFT
    fn inverse(&mut self, buffer: &mut [Complex64]);
}

/// FFT engine backed by realfft/rustfft planners
pub struct FftEngine {
    real_planner: RealFftPlanner<f64>,
    complex_planner: FftPlanner<f64>,
}

impl FftEngine {
    pub fn new() -> Self {
        Self {
            real_planner: RealFftPlanner::<f64>::new(),
            complex_planner: FftPlanner::<f64>::new(),
        }
    }

    /// Number of bins produced by a real FFT of `len` samples
    pub fn num_bins(len: usize) -> usize {
        len / 2 + 1
    }

    /// Frequency of each real-FFT bin in Hz: k * fs / len for k = 0..=len/2
    pub fn frequency_axis(len: usize, sample_rate: f64) -> Vec<f64> {
        (0..Self::num_bins(len))
            .map(|k| k as f64 * sample_rate / len as f64)
            .collect()
    }
}

impl Default for FftEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FourierTransform for FftEngine {
    fn forward_real(&mut self, signal: &[f64]) -> DspResult<Vec<Complex64>> {
        if signal.is_empty() {
            return Err(DspError::InvalidLength { stage: "fft", len: 0 });
        }

        let r2c = self.real_planner.plan_fft_forward(signal.len());
        let mut input = signal.to_vec();
        let mut output = r2c.make_output_vec();

        r2c.process(&mut input, &mut output)
            .map_err(|e| DspError::Transform(e.to_string()))?;

        Ok(output)
    }

    fn inverse_real(&mut self, spectrum: &[Complex64], len: usize) -> DspResult<Vec<f64>> {
        if len == 0 || spectrum.len() != Self::num_bins(len) {
            return Err(DspError::InvalidLength { stage: "inverse fft", len });
        }

        let c2r = self.real_planner.plan_fft_inverse(len);
        let mut input = spectrum.to_vec();
        input[0].im = 0.0;
        if len % 2 == 0 {
            input[len / 2].im = 0.0;
        }
        let mut output = c2r.make_output_vec();

        c2r.process(&mut input, &mut output)
            .map_err(|e| DspError::Transform(e.to_string()))?;

        Ok(output)
    }

    fn forward(&mut self, buffer: &mut [Complex64]) {
        if buffer.is_empty() {
            return;
        }
        let fft = self.complex_planner.plan_fft_forward(buffer.len());
        fft.process(buffer);
    }

    fn inverse(&mut self, buffer: &mut [Complex64]) {
        if buffer.is_empty() {
            return;
        }
        let ifft = self.complex_planner.plan_fft_inverse(buffer.len());
        ifft.process(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new();

        let spectrum = fft.forward_real(&[1.0; 100]).unwrap();
        assert_eq!(spectrum.len(), 51);

        // DC bin holds the sum, every other bin is empty
        assert!((spectrum[0].norm() - 100.0).abs() < 1e-9);
        assert!(spectrum[10].norm() < 1e-9);
    }

    #[test]
    fn test_fft_sine_wave() {
        let mut fft = FftEngine::new();

        // Exactly 32 cycles in 1024 samples
        let signal: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * 32.0 * n as f64 / 1024.0).sin())
            .collect();

        let spectrum = fft.forward_real(&signal).unwrap();
        let (peak_bin, peak) = spectrum
            .iter()
            .enumerate()
            .map(|(k, c)| (k, c.norm()))
            .fold((0, 0.0), |(bk, bv), (k, v)| if v > bv { (k, v) } else { (bk, bv) });

        assert_eq!(peak_bin, 32);
        // Peak magnitude is N/2 for a unit sine
        assert!((peak - 512.0).abs() < 1e-6);
    }

    #[test]
    fn test_real_round_trip_odd_and_even() {
        let mut fft = FftEngine::new();

        for len in [7usize, 8, 1] {
            let signal: Vec<f64> = (0..len).map(|n| (n as f64 * 0.7).cos() + 0.1 * n as f64).collect();
            let spectrum = fft.forward_real(&signal).unwrap();
            let restored = fft.inverse_real(&spectrum, len).unwrap();

            for (r, s) in restored.iter().zip(signal.iter()) {
                assert!((*r / len as f64 - *s).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_complex_round_trip() {
        let mut fft = FftEngine::new();
        let original: Vec<Complex64> = (0..12).map(|n| Complex64::new(n as f64, -(n as f64) / 2.0)).collect();

        let mut buffer = original.clone();
        fft.forward(&mut buffer);
        fft.inverse(&mut buffer);

        for (b, o) in buffer.iter().zip(original.iter()) {
            assert!((*b / 12.0 - *o).norm() < 1e-10);
        }
    }

    #[test]
    fn test_invalid_lengths() {
        let mut fft = FftEngine::new();
        assert!(fft.forward_real(&[]).is_err());
        assert!(fft.inverse_real(&[Complex64::new(1.0, 0.0)], 0).is_err());
        assert!(fft.inverse_real(&[Complex64::new(1.0, 0.0)], 4).is_err());
    }

    #[test]
    fn test_frequency_axis() {
        let freqs = FftEngine::frequency_axis(1024, 48000.0);

        assert_eq!(freqs.len(), 513);
        assert_eq!(freqs[0], 0.0);
        assert!((freqs[512] - 24000.0).abs() < 1e-9);
    }
}
