//! Error type shared by every pipeline stage

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("{stage}: invalid length {len}")]
    InvalidLength { stage: &'static str, len: usize },

    #[error("Cutoff {cutoff_hz} Hz must lie strictly between 0 and the Nyquist frequency ({nyquist_hz} Hz)")]
    InvalidCutoff { cutoff_hz: f64, nyquist_hz: f64 },

    #[error("Filter order must be at least 1 (got {0})")]
    InvalidOrder(usize),

    #[error("Segment length {segment_len} is outside [1, {signal_len}]")]
    InvalidSegmentLength { segment_len: usize, signal_len: usize },

    #[error("Spectral estimate has no bins")]
    EmptyInput,

    #[error("Sample rate must be finite and positive (got {0} Hz)")]
    InvalidSampleRate(f64),

    #[error("FFT failed: {0}")]
    Transform(String),
}

pub type DspResult<T> = Result<T, DspError>;

/// Reject rates that are zero, negative, NaN or infinite.
pub(crate) fn check_sample_rate(rate_hz: f64) -> DspResult<f64> {
    if rate_hz.is_finite() && rate_hz > 0.0 {
        Ok(rate_hz)
    } else {
        Err(DspError::InvalidSampleRate(rate_hz))
    }
}
