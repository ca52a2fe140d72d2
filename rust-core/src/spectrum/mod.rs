//! Spectral stages: FFT backend, resampling, envelope, tapering, PSD and peak picking

pub mod fft;
pub mod resample;
pub mod envelope;
pub mod windowing;
pub mod welch;
pub mod peaks;

pub use fft::{FftEngine, FourierTransform};
pub use resample::{resample, resample_to_rate};
pub use envelope::envelope;
pub use windowing::{apply_hann, hann_window};
pub use welch::{welch, Detrend, SpectralEstimate, WelchConfig};
pub use peaks::{dominant_frequency, select_peak, Peak, PeakPolicy};
