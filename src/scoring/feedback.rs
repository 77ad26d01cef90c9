use crate::scoring::types::{BeatDetection, BeatDeviation, RhythmPattern};

const LATE_AVG_MS: f64 = 50.0;
const VARIATION_AVG_MS: f64 = 25.0;
const OUTLIER_MS: f64 = 75.0;

/// Build the feedback lines for one take.
///
/// Rules fire in a fixed order and every applicable rule contributes a line:
/// accuracy tier, strike count, average timing of matched strikes, the pattern
/// played, and finally the individual strikes that drifted furthest.
pub fn generate_feedback(
    accuracy: f64,
    detection: &BeatDetection,
    deviations: &[BeatDeviation],
    pattern: &RhythmPattern,
) -> Vec<String> {
    let mut feedback: Vec<String> = Vec::new();

    feedback.push(accuracy_message(accuracy).to_string());

    if detection.detected < detection.expected {
        feedback.push(format!(
            "We detected {} of {} expected strikes. Try to be more consistent.",
            detection.detected, detection.expected
        ));
    } else if detection.detected > detection.expected {
        feedback.push(format!(
            "We detected {} strikes ({} expected). Try not to add extra strikes.",
            detection.detected, detection.expected
        ));
    }

    // Misses are left out so the sentinel deviation does not dominate the average
    let matched: Vec<&BeatDeviation> = deviations.iter().filter(|d| d.is_matched()).collect();
    if !matched.is_empty() {
        let avg_deviation =
            matched.iter().map(|d| d.deviation_ms.abs()).sum::<f64>() / matched.len() as f64;
        if avg_deviation > LATE_AVG_MS {
            feedback.push(
                "Your timing is lagging behind. Try to follow the metronome more closely."
                    .to_string(),
            );
        } else if avg_deviation > VARIATION_AVG_MS {
            feedback.push(
                "Small variations in timing. Practice with the metronome to tighten them up."
                    .to_string(),
            );
        }
    }

    feedback.push(format!("Pattern: {} at {} BPM", pattern.name, pattern.bpm));

    let outliers: Vec<String> = matched
        .iter()
        .filter(|d| d.deviation_ms.abs() > OUTLIER_MS)
        .map(|d| beat_label(d.beat_index, pattern))
        .collect();
    if !outliers.is_empty() {
        feedback.push(format!(
            "Strikes with the largest deviation: {}. Focus on these strikes.",
            outliers.join(", ")
        ));
    }

    feedback
}

/// Every accuracy in [0, 100] falls into exactly one tier.
fn accuracy_message(accuracy: f64) -> &'static str {
    if accuracy >= 90.0 {
        "Excellent! Your rhythm is very precise."
    } else if accuracy >= 75.0 {
        "Very good! Your rhythm is quite precise."
    } else if accuracy >= 60.0 {
        "Good, but there is room to improve."
    } else if accuracy >= 40.0 {
        "You need more practice to improve your precision."
    } else {
        "Keep practicing. Your precision will improve with time."
    }
}

// "#3", or "#3 (pero)" when the pattern names its strokes
fn beat_label(beat_index: u32, pattern: &RhythmPattern) -> String {
    let stroke = (beat_index as usize)
        .checked_sub(1)
        .and_then(|i| pattern.strokes.get(i));
    match stroke {
        Some(stroke) => format!("#{} ({})", beat_index, stroke.syllable()),
        None => format!("#{}", beat_index),
    }
}
