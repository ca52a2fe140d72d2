//! Dominant-frequency selection from a spectral estimate

use super::welch::SpectralEstimate;
use crate::error::{DspError, DspResult};

/// How the dominant bin is chosen
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PeakPolicy {
    /// Highest-power bin over the whole spectrum, DC and the last bin
    /// included. Ties go to the lowest frequency.
    #[default]
    GlobalMaximum,

    /// Strongest strict local maximum with frequency in `[min_hz, max_hz]`.
    /// End bins are never local maxima, so DC is excluded.
    LocalMaximumInBand { min_hz: f64, max_hz: f64 },
}

/// Selected spectral peak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub bin: usize,
    pub frequency_hz: f64,
    pub power: f64,
}

/// Index of the maximum, scanning left to right with a strict comparison
///
/// Equal-power plateaus therefore report their first bin.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    (!values.is_empty()).then_some(best)
}

/// Indices of strict local maxima
///
/// A flat top counts once, reported at its middle bin (lower middle for an
/// even plateau width). The first and last samples are never maxima.
pub fn local_maxima(values: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if values.len() < 3 {
        return peaks;
    }

    let last = values.len() - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }

    peaks
}

/// Pick the dominant peak of `psd` under `policy`
pub fn select_peak(psd: &SpectralEstimate, policy: PeakPolicy) -> DspResult<Peak> {
    let power = psd.power();
    let frequencies = psd.frequencies();

    let bin = match policy {
        PeakPolicy::GlobalMaximum => argmax(power),
        PeakPolicy::LocalMaximumInBand { min_hz, max_hz } => local_maxima(power)
            .into_iter()
            .filter(|&k| frequencies[k] >= min_hz && frequencies[k] <= max_hz)
            .fold(None, |best: Option<usize>, k| match best {
                Some(b) if power[b] >= power[k] => Some(b),
                _ => Some(k),
            }),
    }
    .ok_or(DspError::EmptyInput)?;

    Ok(Peak {
        bin,
        frequency_hz: frequencies[bin],
        power: power[bin],
    })
}

/// Frequency of the highest-power bin
pub fn dominant_frequency(psd: &SpectralEstimate) -> DspResult<f64> {
    select_peak(psd, PeakPolicy::GlobalMaximum).map(|peak| peak.frequency_hz)
}
