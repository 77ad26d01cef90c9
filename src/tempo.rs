use crate::error::{Result, RhythmError};
use crate::scoring::types::BeatEvent;

/// Milliseconds per beat at the given tempo: 60000 / bpm.
pub fn beat_duration_ms(bpm: f64) -> Result<f64> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(RhythmError::InvalidParameter(format!(
            "bpm must be a positive number, got {}",
            bpm
        )));
    }
    Ok(60_000.0 / bpm)
}

/// Estimate the tempo of a take from the median gap between consecutive strikes.
/// Returns None with fewer than two strikes or when the strikes coincide.
pub fn estimate_bpm(beats: &[BeatEvent]) -> Option<f64> {
    if beats.len() < 2 {
        return None;
    }

    let mut times: Vec<f64> = beats.iter().map(|b| b.timestamp_ms).collect();
    times.sort_by(|a, b| a.total_cmp(b));

    let mut gaps: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
    gaps.sort_by(|a, b| a.total_cmp(b));

    let mid = gaps.len() / 2;
    let median = if gaps.len() % 2 == 0 {
        (gaps[mid - 1] + gaps[mid]) / 2.0
    } else {
        gaps[mid]
    };

    if median <= 0.0 {
        return None;
    }
    Some(60_000.0 / median)
}
