//! Respiratory rate estimator - the complete batch pipeline
//!
//! raw samples -> resample to the intermediate rate -> envelope -> lowpass
//! (zero-phase) -> Hann taper -> resample to the analysis rate -> Welch PSD
//! -> dominant frequency

use super::buffer::SampleBuffer;
use crate::error::{check_sample_rate, DspResult};
use crate::filters::iir::LowpassFilter;
use crate::spectrum::envelope::envelope;
use crate::spectrum::fft::{FftEngine, FourierTransform};
use crate::spectrum::peaks::{select_peak, PeakPolicy};
use crate::spectrum::resample::{resample, target_length};
use crate::spectrum::welch::{welch, SpectralEstimate, WelchConfig};
use crate::spectrum::windowing::apply_hann;
use std::sync::OnceLock;

/// Estimator configuration
///
/// Defaults match the deployed breathing monitor: 1 kHz envelope rate,
/// 4th-order 2 Hz Butterworth, 10 Hz analysis rate, single-segment
/// periodogram over the whole analysis buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Rate of the first resampling, before envelope extraction (Hz)
    pub intermediate_rate_hz: f64,

    /// Butterworth order
    pub filter_order: usize,

    /// Lowpass cutoff applied to the envelope (Hz)
    pub cutoff_hz: f64,

    /// Rate of the final resampling, before spectral analysis (Hz)
    pub analysis_rate_hz: f64,

    /// PSD settings
    pub welch: WelchConfig,

    /// Dominant-bin selection
    pub peak_policy: PeakPolicy,

    /// Log every stage's output length and range at debug level
    pub trace_stages: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            intermediate_rate_hz: 1000.0,
            filter_order: 4,
            cutoff_hz: 2.0,
            analysis_rate_hz: 10.0,
            welch: WelchConfig::default(),
            peak_policy: PeakPolicy::GlobalMaximum,
            trace_stages: false,
        }
    }
}

/// Result of one estimator run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespiratoryRateEstimate {
    /// Dominant slow frequency of the envelope (Hz)
    pub frequency_hz: f64,

    /// PSD value at that frequency
    pub power: f64,
}

impl RespiratoryRateEstimate {
    pub fn breaths_per_minute(&self) -> f64 {
        self.frequency_hz * 60.0
    }
}

/// Batch respiratory rate estimator
///
/// The lowpass coefficients are designed once at construction and reused by
/// every call to [`estimate`](Self::estimate).
pub struct RespiratoryRateEstimator<T: FourierTransform = FftEngine> {
    config: EstimatorConfig,
    lowpass: LowpassFilter,
    fft: T,
}

impl RespiratoryRateEstimator<FftEngine> {
    /// Create an estimator backed by the realfft/rustfft engine
    pub fn new(config: EstimatorConfig) -> DspResult<Self> {
        Self::with_transform(config, FftEngine::new())
    }
}

impl<T: FourierTransform> RespiratoryRateEstimator<T> {
    /// Create an estimator with a custom transform backend
    pub fn with_transform(config: EstimatorConfig, fft: T) -> DspResult<Self> {
        let lowpass = LowpassFilter::design(config.filter_order, config.cutoff_hz, config.intermediate_rate_hz)?;
        Self::with_parts(config, lowpass, fft)
    }

    fn with_parts(config: EstimatorConfig, lowpass: LowpassFilter, fft: T) -> DspResult<Self> {
        check_sample_rate(config.analysis_rate_hz)?;
        Ok(Self { config, lowpass, fft })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn lowpass(&self) -> &LowpassFilter {
        &self.lowpass
    }

    /// Estimate the dominant slow frequency of `buffer`
    pub fn estimate(&mut self, buffer: &SampleBuffer) -> DspResult<RespiratoryRateEstimate> {
        self.estimate_detailed(buffer).map(|(estimate, _)| estimate)
    }

    /// Estimate and also return the spectrum the peak was picked from
    pub fn estimate_detailed(&mut self, buffer: &SampleBuffer) -> DspResult<(RespiratoryRateEstimate, SpectralEstimate)> {
        log::debug!(
            "Estimating respiratory rate: {} samples at {} Hz ({:.2} s)",
            buffer.len(),
            buffer.sample_rate(),
            buffer.duration_secs()
        );

        let intermediate_len = target_length(buffer.len(), buffer.sample_rate(), self.config.intermediate_rate_hz)?;
        let intermediate = resample(&mut self.fft, buffer.samples(), intermediate_len)?;
        self.trace_stage("resampled", &intermediate);

        let env = envelope(&mut self.fft, &intermediate)?;
        self.trace_stage("envelope", &env);

        let filtered = self.lowpass.apply(&env)?;
        self.trace_stage("lowpass", &filtered);

        let tapered = apply_hann(&filtered);
        self.trace_stage("hann", &tapered);

        let analysis_len = target_length(tapered.len(), self.config.intermediate_rate_hz, self.config.analysis_rate_hz)?;
        let analysis = resample(&mut self.fft, &tapered, analysis_len)?;
        self.trace_stage("analysis", &analysis);

        // Rate actually represented by the rounded analysis length
        let analysis_rate = analysis.len() as f64 / buffer.duration_secs();
        let psd = welch(&mut self.fft, &analysis, analysis_rate, &self.config.welch)?;

        let peak = select_peak(&psd, self.config.peak_policy)?;
        let estimate = RespiratoryRateEstimate {
            frequency_hz: peak.frequency_hz,
            power: peak.power,
        };

        log::debug!(
            "Dominant frequency {:.3} Hz ({:.1} breaths/min) from {} PSD bins",
            estimate.frequency_hz,
            estimate.breaths_per_minute(),
            psd.len()
        );

        Ok((estimate, psd))
    }

    fn trace_stage(&self, stage: &str, samples: &[f64]) {
        if !self.config.trace_stages {
            return;
        }
        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| (lo.min(s), hi.max(s)));
        log::debug!("{}: {} samples, range [{:.4}, {:.4}]", stage, samples.len(), min, max);
    }
}

static DEFAULT_LOWPASS: OnceLock<DspResult<LowpassFilter>> = OnceLock::new();

/// Lowpass of the default configuration, designed on first use
fn default_lowpass() -> DspResult<LowpassFilter> {
    DEFAULT_LOWPASS
        .get_or_init(|| {
            let config = EstimatorConfig::default();
            LowpassFilter::design(config.filter_order, config.cutoff_hz, config.intermediate_rate_hz)
        })
        .clone()
}

/// Estimate the respiratory frequency (Hz) of `samples` captured at
/// `source_rate_hz`, using the default configuration
pub fn estimate_respiratory_rate(samples: &[f64], source_rate_hz: f64) -> DspResult<f64> {
    let buffer = SampleBuffer::from_slice(samples, source_rate_hz)?;
    let config = EstimatorConfig::default();
    let lowpass = default_lowpass()?;

    let mut estimator = RespiratoryRateEstimator::with_parts(config, lowpass, FftEngine::new())?;
    Ok(estimator.estimate(&buffer)?.frequency_hz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DspError;
    use crate::spectrum::welch::Detrend;
    use num_complex::Complex64;
    use std::f64::consts::PI;

    /// Transform wrapper that counts calls
    struct CountingTransform {
        inner: FftEngine,
        calls: usize,
    }

    impl FourierTransform for CountingTransform {
        fn forward_real(&mut self, signal: &[f64]) -> DspResult<Vec<Complex64>> {
            self.calls += 1;
            self.inner.forward_real(signal)
        }

        fn inverse_real(&mut self, spectrum: &[Complex64], len: usize) -> DspResult<Vec<f64>> {
            self.calls += 1;
            self.inner.inverse_real(spectrum, len)
        }

        fn forward(&mut self, buffer: &mut [Complex64]) {
            self.calls += 1;
            self.inner.forward(buffer)
        }

        fn inverse(&mut self, buffer: &mut [Complex64]) {
            self.calls += 1;
            self.inner.inverse(buffer)
        }
    }

    /// Carrier at `carrier_hz` amplitude-modulated by depth + swing*sin(2π f t)
    fn breathing_signal(
        sample_rate: f64,
        seconds: f64,
        carrier_hz: f64,
        breath_hz: f64,
        depth: f64,
        swing: f64,
    ) -> Vec<f64> {
        let len = (sample_rate * seconds) as usize;
        (0..len)
            .map(|n| {
                let t = n as f64 / sample_rate;
                let amplitude = depth + swing * (2.0 * PI * breath_hz * t).sin();
                amplitude * (2.0 * PI * carrier_hz * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_detects_breathing_on_audio_carrier() {
        // 20 s at 24 kHz; 0.05 Hz bins after the 10 Hz analysis resampling
        let samples = breathing_signal(24_000.0, 20.0, 200.0, 0.3, 0.5, 0.5);
        let rate = estimate_respiratory_rate(&samples, 24_000.0).unwrap();

        assert!((rate - 0.3).abs() <= 0.05, "estimated {} Hz", rate);
    }

    #[test]
    fn test_silence_reports_dc() {
        let samples = vec![0.0; 5000];

        let mut estimator = RespiratoryRateEstimator::new(EstimatorConfig::default()).unwrap();
        let buffer = SampleBuffer::from_slice(&samples, 24_000.0).unwrap();
        let (estimate, psd) = estimator.estimate_detailed(&buffer).unwrap();

        assert_eq!(estimate.frequency_hz, 0.0);
        assert_eq!(estimate.power, 0.0);
        assert!(psd.power().iter().all(|&p| p == 0.0));

        assert_eq!(estimate_respiratory_rate(&samples, 24_000.0).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_input_fails_before_any_fft() {
        assert_eq!(
            estimate_respiratory_rate(&[], 24_000.0),
            Err(DspError::InvalidLength { stage: "sample buffer", len: 0 })
        );

        // Every transform stage rejects an empty slice before planning
        let mut counting = CountingTransform { inner: FftEngine::new(), calls: 0 };
        assert_eq!(
            resample(&mut counting, &[], 100),
            Err(DspError::InvalidLength { stage: "resample", len: 0 })
        );
        assert_eq!(
            envelope(&mut counting, &[]),
            Err(DspError::InvalidLength { stage: "envelope", len: 0 })
        );
        assert!(welch(&mut counting, &[], 10.0, &WelchConfig::default()).is_err());
        assert_eq!(counting.calls, 0);
    }

    #[test]
    fn test_too_short_for_analysis_rate() {
        // 100 samples at 24 kHz leave nothing at 10 Hz
        let result = estimate_respiratory_rate(&[0.1; 100], 24_000.0);
        assert!(matches!(result, Err(DspError::InvalidLength { stage: "resample", .. })));
    }

    #[test]
    fn test_band_policy_ignores_dc_leakage() {
        // Shallow modulation: the Hann taper's DC leakage dominates the
        // lowest bins, the band search still finds the breathing peak
        let samples = breathing_signal(2000.0, 20.0, 200.0, 0.25, 1.0, 0.3);
        let config = EstimatorConfig {
            peak_policy: PeakPolicy::LocalMaximumInBand { min_hz: 0.1, max_hz: 0.5 },
            trace_stages: true,
            ..EstimatorConfig::default()
        };

        let mut estimator = RespiratoryRateEstimator::new(config).unwrap();
        let buffer = SampleBuffer::new(samples, 2000.0).unwrap();
        let estimate = estimator.estimate(&buffer).unwrap();

        assert!((estimate.frequency_hz - 0.25).abs() <= 0.05, "estimated {} Hz", estimate.frequency_hz);
        assert!((estimate.breaths_per_minute() - 15.0).abs() <= 3.0);
    }

    #[test]
    fn test_custom_transform_is_used() {
        let counting = CountingTransform { inner: FftEngine::new(), calls: 0 };
        let mut estimator = RespiratoryRateEstimator::with_transform(EstimatorConfig::default(), counting).unwrap();

        let buffer = SampleBuffer::new(vec![0.0; 5000], 24_000.0).unwrap();
        estimator.estimate(&buffer).unwrap();

        // Two resamplings (forward + inverse each), envelope (forward + inverse), one PSD segment
        assert_eq!(estimator.fft.calls, 7);
    }

    #[test]
    fn test_invalid_configuration() {
        let bad_cutoff = EstimatorConfig { cutoff_hz: 600.0, ..EstimatorConfig::default() };
        assert!(matches!(
            RespiratoryRateEstimator::new(bad_cutoff),
            Err(DspError::InvalidCutoff { .. })
        ));

        let bad_order = EstimatorConfig { filter_order: 0, ..EstimatorConfig::default() };
        assert!(matches!(
            RespiratoryRateEstimator::new(bad_order),
            Err(DspError::InvalidOrder(0))
        ));

        let bad_rate = EstimatorConfig { analysis_rate_hz: 0.0, ..EstimatorConfig::default() };
        assert!(matches!(
            RespiratoryRateEstimator::new(bad_rate),
            Err(DspError::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn test_segment_longer_than_analysis_buffer() {
        let config = EstimatorConfig {
            welch: WelchConfig {
                segment_len: Some(100),
                overlap: None,
                window: crate::filters::windows::WindowType::Hann,
                detrend: Detrend::Constant,
            },
            ..EstimatorConfig::default()
        };
        let mut estimator = RespiratoryRateEstimator::new(config).unwrap();

        // 5 s at 1 kHz -> 50 analysis samples
        let buffer = SampleBuffer::new(vec![0.2; 5000], 1000.0).unwrap();
        assert_eq!(
            estimator.estimate(&buffer),
            Err(DspError::InvalidSegmentLength { segment_len: 100, signal_len: 50 })
        );
    }

    #[test]
    fn test_default_filter_matches_estimator() {
        let cached = default_lowpass().unwrap();
        let estimator = RespiratoryRateEstimator::new(EstimatorConfig::default()).unwrap();

        assert_eq!(&cached, estimator.lowpass());
        assert_eq!(cached.coefficients().order(), 4);

        // A custom estimator does not disturb the process-wide default
        let custom = RespiratoryRateEstimator::new(EstimatorConfig { cutoff_hz: 1.0, ..EstimatorConfig::default() }).unwrap();
        assert_ne!(custom.lowpass(), &cached);
        assert_eq!(default_lowpass().unwrap(), cached);
    }
}
