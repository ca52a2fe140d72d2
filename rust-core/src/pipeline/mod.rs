//! End-to-end respiratory rate estimation over one sample buffer

pub mod buffer;
pub mod estimator;

pub use buffer::SampleBuffer;
pub use estimator::{
    estimate_respiratory_rate, EstimatorConfig, RespiratoryRateEstimate, RespiratoryRateEstimator,
};
