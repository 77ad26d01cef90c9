use log::{debug, warn};

use crate::config::AnalysisConfig;
use crate::error::{Result, RhythmError};
use crate::scoring::calculator::calculate;
use crate::scoring::feedback::generate_feedback;
use crate::scoring::matcher::match_beats;
use crate::scoring::types::{AnalysisResult, BeatEvent, RhythmPattern};
use crate::tempo::beat_duration_ms;

/// Compare a take against the expected pattern with the default 100ms window.
pub fn analyze(recorded_beats: &[BeatEvent], pattern: &RhythmPattern) -> Result<AnalysisResult> {
    analyze_with_config(recorded_beats, pattern, &AnalysisConfig::default())
}

/// Match, score and describe one take. Pure: inputs are only read, and the
/// same inputs always give the same result.
pub fn analyze_with_config(
    recorded_beats: &[BeatEvent],
    pattern: &RhythmPattern,
    config: &AnalysisConfig,
) -> Result<AnalysisResult> {
    config.validate()?;
    validate_inputs(recorded_beats, pattern)?;
    check_inputs(recorded_beats, pattern);

    let deviations = match_beats(recorded_beats, pattern, config);
    let scores = calculate(recorded_beats.len(), &deviations, config.tolerance_ms)?;
    let feedback = generate_feedback(
        scores.accuracy,
        &scores.beat_detection,
        &deviations,
        pattern,
    );

    debug!(
        "analyzed '{}': {}/{} matched ({} detected), accuracy {}, timing {}, score {}",
        pattern.name,
        scores.beat_detection.matched,
        scores.beat_detection.expected,
        scores.beat_detection.detected,
        scores.accuracy,
        scores.timing_accuracy,
        scores.score
    );

    Ok(AnalysisResult {
        recorded_beats: recorded_beats.to_vec(),
        expected_pattern: pattern.clone(),
        accuracy: scores.accuracy,
        timing_accuracy: scores.timing_accuracy,
        beat_detection: scores.beat_detection,
        deviations,
        feedback,
        score: scores.score,
    })
}

fn validate_inputs(recorded_beats: &[BeatEvent], pattern: &RhythmPattern) -> Result<()> {
    beat_duration_ms(pattern.bpm)?;
    if pattern.beats.is_empty() {
        return Err(RhythmError::InvalidPattern(format!(
            "pattern '{}' has no beats",
            pattern.name
        )));
    }
    if let Some(t) = pattern.beats.iter().find(|t| !t.is_finite()) {
        return Err(RhythmError::InvalidPattern(format!(
            "pattern '{}' has a beat at {}",
            pattern.name, t
        )));
    }
    // Negative times would collide with the unmatched marker
    if let Some(beat) = recorded_beats
        .iter()
        .find(|b| !b.timestamp_ms.is_finite() || b.timestamp_ms < 0.0)
    {
        return Err(RhythmError::InvalidParameter(format!(
            "recorded beat timestamp must be a finite, non-negative number of ms, got {}",
            beat.timestamp_ms
        )));
    }
    Ok(())
}

// Valid but unusual input is scored anyway; just leave a trace of it.
fn check_inputs(recorded_beats: &[BeatEvent], pattern: &RhythmPattern) {
    if recorded_beats
        .windows(2)
        .any(|w| w[1].timestamp_ms < w[0].timestamp_ms)
    {
        warn!("recorded beats are not in time order");
    }
    if recorded_beats
        .iter()
        .any(|b| !(0.0..=1.0).contains(&b.intensity))
    {
        warn!("recorded beat intensity outside [0, 1]");
    }
    if pattern.beats.windows(2).any(|w| w[1] < w[0]) {
        warn!("pattern '{}' beats are not in time order", pattern.name);
    }
}
