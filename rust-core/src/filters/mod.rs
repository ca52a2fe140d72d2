//! Window generation, Butterworth design and zero-phase IIR filtering

pub mod windows;
pub mod design;
pub mod iir;

pub use windows::{WindowType, WindowSymmetry, generate_window};
pub use design::{FilterCoefficients, design_butterworth_lowpass};
pub use iir::{LowpassFilter, filtfilt, lfilter, lfilter_zi};
