//! Power spectral density by Welch's averaged periodogram
//!
//! Segments of length L (stepping by L - overlap) are detrended, windowed and
//! transformed; their scaled squared magnitudes are averaged into a one-sided
//! density in power per Hz.

use super::fft::{FftEngine, FourierTransform};
use crate::error::{check_sample_rate, DspError, DspResult};
use crate::filters::windows::{generate_window, window_energy, WindowSymmetry, WindowType};

/// Per-segment trend removal before windowing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detrend {
    /// Keep the segment as is
    None,
    /// Subtract the segment mean
    Constant,
}

/// Welch estimator parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WelchConfig {
    /// Segment length L; `None` uses the whole signal (single periodogram)
    pub segment_len: Option<usize>,

    /// Samples shared by consecutive segments; `None` means L / 2
    pub overlap: Option<usize>,

    /// Segment window (periodic form)
    pub window: WindowType,

    /// Trend removal applied to each segment
    pub detrend: Detrend,
}

impl Default for WelchConfig {
    fn default() -> Self {
        Self {
            segment_len: None,
            overlap: None,
            window: WindowType::Hann,
            detrend: Detrend::Constant,
        }
    }
}

/// One-sided power spectral density
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralEstimate {
    frequencies: Vec<f64>,
    power: Vec<f64>,
}

impl SpectralEstimate {
    /// Pair frequency bins with power values
    ///
    /// Both sequences must have equal length; frequencies must start at 0 and
    /// increase strictly.
    pub fn new(frequencies: Vec<f64>, power: Vec<f64>) -> DspResult<Self> {
        if frequencies.len() != power.len() {
            return Err(DspError::InvalidLength { stage: "spectral estimate", len: power.len() });
        }
        let ascending = frequencies.windows(2).all(|w| w[1] > w[0]);
        let starts_at_zero = frequencies.first().map_or(true, |&f| f == 0.0);
        if !ascending || !starts_at_zero {
            return Err(DspError::InvalidLength { stage: "spectral estimate", len: frequencies.len() });
        }

        Ok(Self { frequencies, power })
    }

    /// Frequency bins in Hz, ascending from 0
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Power density per bin (units² / Hz)
    pub fn power(&self) -> &[f64] {
        &self.power
    }

    pub fn len(&self) -> usize {
        self.power.len()
    }

    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }

    /// Bin spacing in Hz (0 for fewer than two bins)
    pub fn resolution_hz(&self) -> f64 {
        match self.frequencies.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Integral of the density over frequency (rectangle rule)
    pub fn total_power(&self) -> f64 {
        self.power.iter().sum::<f64>() * self.resolution_hz()
    }
}

/// Welch PSD of `signal` sampled at `sample_rate`
///
/// # Arguments
/// * `fft` - Transform backend
/// * `signal` - Input samples
/// * `sample_rate` - Sampling rate in Hz
/// * `config` - Segment length, overlap, window and detrend settings
///
/// # Returns
/// `L/2 + 1` bins at `k * fs / L`
pub fn welch<T: FourierTransform + ?Sized>(
    fft: &mut T,
    signal: &[f64],
    sample_rate: f64,
    config: &WelchConfig,
) -> DspResult<SpectralEstimate> {
    let sample_rate = check_sample_rate(sample_rate)?;
    let signal_len = signal.len();

    let segment_len = config.segment_len.unwrap_or(signal_len);
    if segment_len < 1 || segment_len > signal_len {
        return Err(DspError::InvalidSegmentLength { segment_len, signal_len });
    }

    let overlap = config.overlap.unwrap_or(segment_len / 2);
    if overlap >= segment_len {
        return Err(DspError::InvalidSegmentLength { segment_len, signal_len });
    }
    let step = segment_len - overlap;
    let num_segments = (signal_len - overlap) / step;

    let window = generate_window(config.window, segment_len, WindowSymmetry::Periodic);
    let scale = 1.0 / (sample_rate * window_energy(&window));
    let num_bins = FftEngine::num_bins(segment_len);

    let mut power = vec![0.0; num_bins];
    let mut segment = vec![0.0; segment_len];

    for index in 0..num_segments {
        let start = index * step;
        segment.copy_from_slice(&signal[start..start + segment_len]);

        if config.detrend == Detrend::Constant {
            let mean = segment.iter().sum::<f64>() / segment_len as f64;
            segment.iter_mut().for_each(|s| *s -= mean);
        }
        for (s, &w) in segment.iter_mut().zip(window.iter()) {
            *s *= w;
        }

        let spectrum = fft.forward_real(&segment)?;
        for (p, bin) in power.iter_mut().zip(spectrum.iter()) {
            *p += bin.norm_sqr();
        }
    }

    // One-sided: fold the negative frequencies into every bin except DC and
    // the Nyquist bin of an even-length segment
    let folded_end = if segment_len % 2 == 0 { num_bins - 1 } else { num_bins };
    for (k, p) in power.iter_mut().enumerate() {
        *p *= scale / num_segments as f64;
        if k > 0 && k < folded_end {
            *p *= 2.0;
        }
    }

    SpectralEstimate::new(FftEngine::frequency_axis(segment_len, sample_rate), power)
}
