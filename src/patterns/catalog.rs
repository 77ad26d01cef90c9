use serde::Serialize;

use crate::error::{Result, RhythmError};
use crate::patterns::templates::{generate_even, generate_pattern, TemplateId};
use crate::scoring::types::RhythmPattern;

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRhythm {
    pub id: String,
    pub name: String,
    pub description: String,
    pub level: u8, // 1-5
    pub bpm: f64,
    pub stroke_notation: String,
    pub template: Option<String>,
}

impl CatalogRhythm {
    /// Number of strokes written in the notation, e.g. "po-ro-ro pero | pó" has 5.
    pub fn notated_strikes(&self) -> usize {
        self.stroke_notation
            .split(|c: char| c == '-' || c == '|' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .count()
    }
}

fn rhythm(
    id: &str,
    name: &str,
    description: &str,
    level: u8,
    bpm: f64,
    stroke_notation: &str,
    template: Option<TemplateId>,
) -> CatalogRhythm {
    CatalogRhythm {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        level,
        bpm,
        stroke_notation: stroke_notation.to_string(),
        template: template.map(|t| t.as_str().to_string()),
    }
}

pub fn get_catalog() -> Vec<CatalogRhythm> {
    vec![
        // Level 1
        rhythm(
            "rhythm-1",
            "Simple Ternary Patterns",
            "First three-beat patterns, alternating forward and backward strokes",
            1,
            80.0,
            "po-ro-po | po-ro-po | po-ro-po",
            None,
        ),
        rhythm(
            "rhythm-2",
            "Simple Binary Patterns",
            "Two-beat patterns, the groundwork for the jota",
            1,
            100.0,
            "po-ro | po-ro | po-ro",
            None,
        ),
        rhythm(
            "rhythm-3",
            "Forward Stroke",
            "Fingers strike forward for a clear, bright sound",
            1,
            60.0,
            "po | po | po | po",
            None,
        ),
        rhythm(
            "rhythm-4",
            "Backward Stroke",
            "Fingers strike backward, the complement of the forward stroke",
            1,
            60.0,
            "ro | ro | ro | ro",
            None,
        ),
        // Level 2
        rhythm(
            "rhythm-5",
            "Simple Muiñeira",
            "The basic traditional Galician rhythm",
            2,
            110.0,
            "po-ro-ro pero | po-ro-ro pero | po-ro-ro po-ro-ro po-ro-ro pero",
            Some(TemplateId::Muineira),
        ),
        rhythm(
            "rhythm-6",
            "Introduction to Riscado",
            "Scrape plus thumb, essential for the muiñeira",
            2,
            90.0,
            "pero | pero | pero | pero",
            None,
        ),
        rhythm(
            "rhythm-7",
            "Deep Tone",
            "Strokes that draw a deep, resonant sound from the drum",
            2,
            100.0,
            "pó | pó | pó",
            None,
        ),
        rhythm(
            "rhythm-8",
            "Basic Jota",
            "Binary traditional rhythm: forward, back, forward, back, forward",
            2,
            120.0,
            "po-ro-po-ro-po",
            Some(TemplateId::Jota),
        ),
        // Level 3
        rhythm(
            "rhythm-9",
            "Muiñeira with Riscado",
            "Full muiñeira with the riscado technique worked in",
            3,
            130.0,
            "po-ro-ro pero | po-ro-ro pero",
            Some(TemplateId::Muineira),
        ),
        rhythm(
            "rhythm-10",
            "Xota",
            "Fast, festive variant of the jota",
            3,
            140.0,
            "po-ro-po-ro-po",
            Some(TemplateId::Xota),
        ),
        rhythm(
            "rhythm-11",
            "Accented Fist",
            "Closed-fist accent that closes a rhythmic phrase",
            3,
            110.0,
            "po-ro-ro pero | pó",
            None,
        ),
        // Level 4
        rhythm(
            "rhythm-12",
            "Aleluya",
            "Festive rhythm, first played alone and then sung in unison",
            4,
            120.0,
            "po pero ro pero | po pero ro pero",
            Some(TemplateId::Dance),
        ),
        rhythm(
            "rhythm-13",
            "Muiñeira Variations",
            "Muiñeira with ornaments and advanced tone work",
            4,
            140.0,
            "po ro-pero po pero | ro-po pero ro po",
            Some(TemplateId::Advanced),
        ),
        rhythm(
            "rhythm-14",
            "Rhythm Combinations",
            "Several rhythms in sequence with smooth transitions",
            4,
            130.0,
            "po ro po pero | ro po pero ro",
            Some(TemplateId::Intermediate),
        ),
        // Level 5
        rhythm(
            "rhythm-15",
            "Free Improvisation",
            "Improvising over muiñeira patterns",
            5,
            150.0,
            "po-ro-ro pero | po-ro-ro pero",
            Some(TemplateId::Muineira),
        ),
        rhythm(
            "rhythm-16",
            "Professional Performance",
            "Complete traditional pieces with professional technique",
            5,
            140.0,
            "po ro-pero po pero | ro-po pero ro po",
            Some(TemplateId::Advanced),
        ),
    ]
}

/// Expected pattern for a catalog rhythm, at its own tempo unless overridden.
pub fn pattern_for_rhythm(id: &str, bpm: Option<f64>) -> Result<RhythmPattern> {
    let entry = get_catalog()
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| RhythmError::UnknownTemplate(id.to_string()))?;
    let bpm = bpm.unwrap_or(entry.bpm);

    let mut pattern = match &entry.template {
        Some(template) => generate_pattern(bpm, template.parse()?, None)?,
        None => generate_even(bpm, entry.notated_strikes(), &entry.name)?,
    };
    pattern.name = entry.name;
    Ok(pattern)
}
