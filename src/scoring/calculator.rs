use crate::error::{Result, RhythmError};
use crate::scoring::types::{BeatDetection, BeatDeviation};

const ACCURACY_WEIGHT: f64 = 0.5;
const BEAT_WEIGHT: f64 = 0.3;
const CONSISTENCY_WEIGHT: f64 = 0.2;

/// Every numeric figure derived from one set of deviations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scores {
    pub beat_detection: BeatDetection,
    pub timing_accuracy: f64, // rounded
    pub beat_accuracy: f64,
    pub accuracy: f64, // rounded
    pub consistency: f64,
    pub score: f64,
}

pub fn calculate(
    detected: usize,
    deviations: &[BeatDeviation],
    tolerance_ms: f64,
) -> Result<Scores> {
    let expected = deviations.len();
    if expected == 0 {
        return Err(RhythmError::InvalidPattern(
            "cannot score a pattern with no beats".to_string(),
        ));
    }

    let matched = deviations.iter().filter(|d| d.is_matched()).count();
    let beat_detection = BeatDetection {
        detected: detected as u32,
        expected: expected as u32,
        matched: matched as u32,
    };

    let timing = timing_accuracy(deviations, tolerance_ms);
    let beat = beat_accuracy(matched, expected);
    let accuracy = ((timing + beat) / 2.0).round();
    let consistency = consistency_score(deviations);

    Ok(Scores {
        beat_detection,
        timing_accuracy: timing.round(),
        beat_accuracy: beat,
        accuracy,
        consistency,
        score: final_score(accuracy, beat, consistency),
    })
}

/// 100 minus the total deviation as a share of the worst-case budget
/// (`expected * tolerance`), floored at 0.
pub fn timing_accuracy(deviations: &[BeatDeviation], tolerance_ms: f64) -> f64 {
    if deviations.is_empty() {
        return 0.0;
    }
    let total: f64 = deviations.iter().map(|d| d.deviation_ms.abs()).sum();
    let budget = deviations.len() as f64 * tolerance_ms;
    (100.0 - total * 100.0 / budget).clamp(0.0, 100.0)
}

pub fn beat_accuracy(matched: usize, expected: usize) -> f64 {
    if expected == 0 {
        return 0.0;
    }
    matched as f64 / expected as f64 * 100.0
}

/// `100 - σ`, where σ is the population standard deviation of all
/// per-beat deviations (misses included), floored at 0.
pub fn consistency_score(deviations: &[BeatDeviation]) -> f64 {
    if deviations.is_empty() {
        return 100.0;
    }
    let n = deviations.len() as f64;
    let mean = deviations.iter().map(|d| d.deviation_ms).sum::<f64>() / n;
    let variance = deviations
        .iter()
        .map(|d| (d.deviation_ms - mean).powi(2))
        .sum::<f64>()
        / n;
    (100.0 - variance.sqrt()).max(0.0)
}

pub fn final_score(accuracy: f64, beat_accuracy: f64, consistency: f64) -> f64 {
    let weighted = accuracy * ACCURACY_WEIGHT
        + beat_accuracy * BEAT_WEIGHT
        + consistency * CONSISTENCY_WEIGHT;
    weighted.round().clamp(0.0, 100.0)
}
