use crate::patterns::templates::MIN_PATTERN_BEATS;
use crate::scoring::types::{RhythmPattern, Stroke};

const BPM_POINTS: f64 = 20.0;
const BPM_SPREAD: f64 = 10.0; // bpm apart at which tempo stops counting
const DIFFICULTY_POINTS: f64 = 20.0;
const DIFFICULTY_SPREAD: f64 = 4.0; // widest gap between levels 1 and 5
const STROKE_POINTS: f64 = 60.0;

/// Complexity above which a level 1 pattern is worth promoting.
const BEGINNER_MAX_BEATS: usize = 8;

/// How alike two patterns are, 0-100.
///
/// Tempo is worth 20 points, lost linearly over a 10 bpm gap. Practice level
/// is worth 20, lost over the full 1-5 range. The remaining 60 go to strokes
/// that agree position by position, as a share of the longer pattern.
/// Positions without a stroke label never agree.
pub fn pattern_similarity(
    a: &RhythmPattern,
    a_difficulty: u8,
    b: &RhythmPattern,
    b_difficulty: u8,
) -> f64 {
    let bpm_gap = (a.bpm - b.bpm).abs();
    let tempo = (BPM_POINTS - bpm_gap / BPM_SPREAD * BPM_POINTS).max(0.0);

    let level_gap = (a_difficulty as f64 - b_difficulty as f64).abs();
    let level = (DIFFICULTY_POINTS - level_gap / DIFFICULTY_SPREAD * DIFFICULTY_POINTS).max(0.0);

    let longest = a.beats.len().max(b.beats.len());
    let strokes = if longest == 0 {
        0.0
    } else {
        let agreeing = a
            .strokes
            .iter()
            .zip(&b.strokes)
            .filter(|(x, y)| x == y)
            .count();
        agreeing as f64 / longest as f64 * STROKE_POINTS
    };

    (tempo + level + strokes).round()
}

/// Practice advice for a pattern at the given level, never empty.
pub fn pattern_suggestions(pattern: &RhythmPattern, difficulty: u8) -> Vec<String> {
    let mut suggestions = Vec::new();

    if pattern.beats.len() < MIN_PATTERN_BEATS {
        suggestions.push("Consider adding more strikes for variety.".to_string());
    }

    let kinds = [Stroke::Po, Stroke::Ro, Stroke::Pero]
        .iter()
        .filter(|s| pattern.strokes.contains(*s))
        .count();
    if kinds < 3 {
        suggestions.push("Add more variety of strokes (po, ro, pero).".to_string());
    }

    if difficulty < 2 && pattern.beats.len() > BEGINNER_MAX_BEATS {
        suggestions.push("Consider raising the difficulty for this complex pattern.".to_string());
    }

    if suggestions.is_empty() {
        suggestions.push("Well-balanced pattern! Ready to practice.".to_string());
    }
    suggestions
}
