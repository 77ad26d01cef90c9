use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod onset;
pub mod patterns;
pub mod scoring;
pub mod tempo;

use config::AnalysisConfig;
use scoring::types::{BeatEvent, RhythmPattern};

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Expected pattern for a template id ("muineira", "jota", "generic", ...).
/// `beat_count` only applies to "generic".
#[wasm_bindgen]
pub fn generate_pattern(
    bpm: f64,
    template_id: &str,
    beat_count: Option<u32>,
) -> Result<JsValue, JsValue> {
    let pattern = patterns::templates::generate(bpm, template_id, beat_count.map(|n| n as usize))
        .map_err(js_error)?;
    serde_wasm_bindgen::to_value(&pattern).map_err(js_error)
}

/// Compare recorded strikes against an expected pattern.
/// `config_js` may be null/undefined or a partial `{ toleranceMs, missPenalty }`.
#[wasm_bindgen]
pub fn analyze_rhythm(
    recorded_js: JsValue,
    pattern_js: JsValue,
    config_js: JsValue,
) -> Result<JsValue, JsValue> {
    let recorded: Vec<BeatEvent> =
        serde_wasm_bindgen::from_value(recorded_js).map_err(js_error)?;
    let pattern: RhythmPattern = serde_wasm_bindgen::from_value(pattern_js).map_err(js_error)?;
    let config: AnalysisConfig = if config_js.is_null() || config_js.is_undefined() {
        AnalysisConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config_js).map_err(js_error)?
    };

    let result = scoring::analyzer::analyze_with_config(&recorded, &pattern, &config)
        .map_err(js_error)?;
    serde_wasm_bindgen::to_value(&result).map_err(js_error)
}

/// Amplitude-threshold strike detection over mono PCM samples.
#[wasm_bindgen]
pub fn detect_beats(samples: &[f32], sample_rate: f32) -> Result<JsValue, JsValue> {
    let beats = onset::amplitude::detect_beats(samples, sample_rate).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&beats).map_err(js_error)
}

/// Strike timestamps only, as a Float64Array of milliseconds.
#[wasm_bindgen]
pub fn beat_timestamps(samples: &[f32], sample_rate: f32) -> Result<js_sys::Float64Array, JsValue> {
    let beats = onset::amplitude::detect_beats(samples, sample_rate).map_err(js_error)?;

    let arr = js_sys::Float64Array::new_with_length(beats.len() as u32);
    for (i, beat) in beats.iter().enumerate() {
        arr.set_index(i as u32, beat.timestamp_ms);
    }
    Ok(arr)
}

/// Tempo of a take from its strike spacing; undefined with fewer than two strikes.
#[wasm_bindgen]
pub fn estimate_tempo(recorded_js: JsValue) -> Result<Option<f64>, JsValue> {
    let recorded: Vec<BeatEvent> =
        serde_wasm_bindgen::from_value(recorded_js).map_err(js_error)?;
    Ok(tempo::estimate_bpm(&recorded))
}

/// The practice rhythm catalog, levels 1 to 5.
#[wasm_bindgen]
pub fn get_rhythm_catalog() -> Result<JsValue, JsValue> {
    let catalog = patterns::catalog::get_catalog();
    serde_wasm_bindgen::to_value(&catalog).map_err(js_error)
}

/// Expected pattern for a catalog rhythm, at its own tempo unless `bpm` is given.
#[wasm_bindgen]
pub fn catalog_pattern(rhythm_id: &str, bpm: Option<f64>) -> Result<JsValue, JsValue> {
    let pattern = patterns::catalog::pattern_for_rhythm(rhythm_id, bpm).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&pattern).map_err(js_error)
}

/// Swap a pattern shorter than four strikes for the basic layout at its tempo.
#[wasm_bindgen]
pub fn adjust_pattern(pattern_js: JsValue) -> Result<JsValue, JsValue> {
    let pattern: RhythmPattern = serde_wasm_bindgen::from_value(pattern_js).map_err(js_error)?;
    let adjusted = patterns::templates::adjust_pattern(pattern).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&adjusted).map_err(js_error)
}

/// Similarity of two patterns, 0-100, given each one's practice level.
#[wasm_bindgen]
pub fn pattern_similarity(
    a_js: JsValue,
    a_difficulty: u8,
    b_js: JsValue,
    b_difficulty: u8,
) -> Result<f64, JsValue> {
    let a: RhythmPattern = serde_wasm_bindgen::from_value(a_js).map_err(js_error)?;
    let b: RhythmPattern = serde_wasm_bindgen::from_value(b_js).map_err(js_error)?;
    Ok(patterns::similarity::pattern_similarity(
        &a,
        a_difficulty,
        &b,
        b_difficulty,
    ))
}

/// Practice advice for a pattern at the given level.
#[wasm_bindgen]
pub fn pattern_suggestions(pattern_js: JsValue, difficulty: u8) -> Result<JsValue, JsValue> {
    let pattern: RhythmPattern = serde_wasm_bindgen::from_value(pattern_js).map_err(js_error)?;
    let suggestions = patterns::similarity::pattern_suggestions(&pattern, difficulty);
    serde_wasm_bindgen::to_value(&suggestions).map_err(js_error)
}
