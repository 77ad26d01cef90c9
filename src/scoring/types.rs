use serde::{Deserialize, Serialize};

/// A single strike, either detected in a recording or expected by a pattern.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BeatEvent {
    pub timestamp_ms: f64,
    #[serde(default)]
    pub intensity: f64, // 0-1, recorded beats only
    #[serde(default)]
    pub frequency_hz: f64, // informational, not scored
}

impl BeatEvent {
    pub fn at(timestamp_ms: f64) -> Self {
        BeatEvent {
            timestamp_ms,
            intensity: 1.0,
            frequency_hz: 0.0,
        }
    }
}

/// Hand technique for a strike on the pandeireta.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stroke {
    Po,   // fingers forward
    Ro,   // fingers back
    Pero, // riscado: scrape plus thumb
}

impl Stroke {
    pub fn syllable(self) -> &'static str {
        match self {
            Stroke::Po => "po",
            Stroke::Ro => "ro",
            Stroke::Pero => "pero",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RhythmPattern {
    pub name: String,
    pub bpm: f64,
    pub beats: Vec<f64>, // expected timestamps in ms, non-decreasing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Stroke>, // parallel to `beats` when the template names its strokes
}

/// Outcome of matching one expected beat.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BeatDeviation {
    pub beat_index: u32, // 1-based
    pub expected_time_ms: f64,
    pub actual_time_ms: f64, // UNMATCHED_TIME when nothing fell inside the window
    pub deviation_ms: f64,
}

/// `actual_time_ms` of an expected beat that found no recorded strike.
pub const UNMATCHED_TIME: f64 = -1.0;

impl BeatDeviation {
    pub fn is_matched(&self) -> bool {
        self.actual_time_ms != UNMATCHED_TIME
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BeatDetection {
    pub detected: u32,
    pub expected: u32,
    pub matched: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub recorded_beats: Vec<BeatEvent>,
    pub expected_pattern: RhythmPattern,
    pub accuracy: f64,        // 0-100, rounded composite
    pub timing_accuracy: f64, // 0-100, rounded
    pub beat_detection: BeatDetection,
    pub deviations: Vec<BeatDeviation>,
    pub feedback: Vec<String>,
    pub score: f64, // 0-100, weighted final score
}
