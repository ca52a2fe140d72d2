//! Input buffer for one estimator run

use crate::error::{check_sample_rate, DspError, DspResult};

/// Fixed-length block of amplitude samples with its sampling rate
///
/// Never empty; the rate is finite and positive.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl SampleBuffer {
    /// Take ownership of `samples` captured at `sample_rate` Hz
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> DspResult<Self> {
        if samples.is_empty() {
            return Err(DspError::InvalidLength { stage: "sample buffer", len: 0 });
        }
        let sample_rate = check_sample_rate(sample_rate)?;

        Ok(Self { samples, sample_rate })
    }

    /// Copy samples from a borrowed slice
    pub fn from_slice(samples: &[f64], sample_rate: f64) -> DspResult<Self> {
        Self::new(samples.to_vec(), sample_rate)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sampling rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True only for a buffer with no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length of the observation window in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }
}
