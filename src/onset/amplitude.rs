use log::debug;

use crate::error::{Result, RhythmError};
use crate::scoring::types::BeatEvent;

const DEFAULT_THRESHOLD: f32 = 0.3;
const DEFAULT_MIN_GAP_MS: f32 = 100.0;

/// Placeholder pitch for a strike: 100-500 Hz, rising with intensity.
fn placeholder_frequency(intensity: f64) -> f64 {
    100.0 + intensity * 400.0
}

/// Peak-amplitude strike detector.
///
/// A strike is reported at the first sample whose absolute amplitude crosses
/// `threshold`, and the detector then stays deaf for `min_gap_ms`. This is a
/// stand-in for real onset detection: there is no spectral analysis, and the
/// reported frequency is a function of intensity only.
#[derive(Clone, Debug)]
pub struct BeatDetector {
    sample_rate: f32,
    threshold: f32,
    min_gap_samples: usize,
}

impl BeatDetector {
    pub fn new(sample_rate: f32) -> Result<Self> {
        Self::with_params(sample_rate, DEFAULT_THRESHOLD, DEFAULT_MIN_GAP_MS)
    }

    pub fn with_params(sample_rate: f32, threshold: f32, min_gap_ms: f32) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(RhythmError::InvalidParameter(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(RhythmError::InvalidParameter(format!(
                "amplitude threshold must be non-negative, got {}",
                threshold
            )));
        }
        if !min_gap_ms.is_finite() || min_gap_ms < 0.0 {
            return Err(RhythmError::InvalidParameter(format!(
                "minimum gap must be non-negative, got {}ms",
                min_gap_ms
            )));
        }

        Ok(BeatDetector {
            sample_rate,
            threshold,
            min_gap_samples: (sample_rate * min_gap_ms / 1000.0).floor() as usize,
        })
    }

    pub fn detect(&self, samples: &[f32]) -> Vec<BeatEvent> {
        let mut beats = Vec::new();
        let mut last_beat: Option<usize> = None;

        for (i, &sample) in samples.iter().enumerate() {
            let amplitude = sample.abs();
            if amplitude <= self.threshold {
                continue;
            }
            if let Some(last) = last_beat {
                if i - last <= self.min_gap_samples {
                    continue;
                }
            }

            let intensity = amplitude.min(1.0) as f64;
            beats.push(BeatEvent {
                timestamp_ms: i as f64 * 1000.0 / self.sample_rate as f64,
                intensity,
                frequency_hz: placeholder_frequency(intensity),
            });
            last_beat = Some(i);
        }

        debug!(
            "detected {} strikes in {} samples",
            beats.len(),
            samples.len()
        );
        beats
    }
}

/// Detect strikes with the default threshold (0.3) and gap (100ms).
pub fn detect_beats(samples: &[f32], sample_rate: f32) -> Result<Vec<BeatEvent>> {
    Ok(BeatDetector::new(sample_rate)?.detect(samples))
}
