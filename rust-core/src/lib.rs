//! Breath Rate - respiratory rate estimation core
//!
//! Batch DSP pipeline that turns one buffer of acoustic or motion samples
//! into the dominant slow frequency of its amplitude envelope, with optional
//! Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod error;
pub mod filters;
pub mod spectrum;
pub mod pipeline;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{DspError, DspResult};
pub use filters::{FilterCoefficients, LowpassFilter, WindowType};
pub use spectrum::{FftEngine, FourierTransform, PeakPolicy, SpectralEstimate, WelchConfig};
pub use pipeline::{
    estimate_respiratory_rate, EstimatorConfig, RespiratoryRateEstimate, RespiratoryRateEstimator,
    SampleBuffer,
};
