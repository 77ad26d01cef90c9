use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::{Result, RhythmError};
use crate::scoring::types::{RhythmPattern, Stroke};
use crate::tempo::beat_duration_ms;

use Stroke::{Pero, Po, Ro};

/// Strike count used for a generic pattern when the caller gives none.
pub const DEFAULT_GENERIC_BEATS: usize = 4;

/// Patterns shorter than this are replaced by the basic layout in `adjust_pattern`.
pub const MIN_PATTERN_BEATS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateId {
    Generic,
    Muineira,
    Jota,
    Xota,
    Basic,
    Intermediate,
    Advanced,
    Energetic,
    Dance,
}

pub const ALL_TEMPLATES: [TemplateId; 9] = [
    TemplateId::Generic,
    TemplateId::Muineira,
    TemplateId::Jota,
    TemplateId::Xota,
    TemplateId::Basic,
    TemplateId::Intermediate,
    TemplateId::Advanced,
    TemplateId::Energetic,
    TemplateId::Dance,
];

impl TemplateId {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Generic => "generic",
            TemplateId::Muineira => "muineira",
            TemplateId::Jota => "jota",
            TemplateId::Xota => "xota",
            TemplateId::Basic => "basic",
            TemplateId::Intermediate => "intermediate",
            TemplateId::Advanced => "advanced",
            TemplateId::Energetic => "energetic",
            TemplateId::Dance => "dance",
        }
    }

    /// Practice level 1-5 of the layout.
    pub fn difficulty(self) -> u8 {
        match self {
            TemplateId::Generic | TemplateId::Basic => 1,
            TemplateId::Muineira | TemplateId::Jota | TemplateId::Intermediate => 2,
            TemplateId::Xota | TemplateId::Energetic | TemplateId::Dance => 3,
            TemplateId::Advanced => 4,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = RhythmError;

    fn from_str(s: &str) -> Result<Self> {
        let id = s.trim().to_lowercase();
        match id.as_str() {
            "generic" => Ok(TemplateId::Generic),
            "muineira" | "muiñeira" => Ok(TemplateId::Muineira),
            "jota" => Ok(TemplateId::Jota),
            "xota" => Ok(TemplateId::Xota),
            "basic" => Ok(TemplateId::Basic),
            "intermediate" => Ok(TemplateId::Intermediate),
            "advanced" => Ok(TemplateId::Advanced),
            "energetic" => Ok(TemplateId::Energetic),
            "dance" => Ok(TemplateId::Dance),
            _ => Err(RhythmError::UnknownTemplate(s.to_string())),
        }
    }
}

/// A fixed strike layout: `beats[i] = offsets[i] * (beat_duration / divisor)`.
struct Template {
    name: &'static str,
    offsets: &'static [f64],
    divisor: f64,
    strokes: &'static [Stroke],
}

// po-ro-ro pero, twice, on eighth notes
const MUINEIRA: Template = Template {
    name: "Muiñeira",
    offsets: &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
    divisor: 2.0,
    strokes: &[Po, Ro, Ro, Pero, Po, Ro, Ro, Pero],
};

const JOTA: Template = Template {
    name: "Jota",
    offsets: &[0.0, 1.0, 2.0, 3.0, 4.0],
    divisor: 1.0,
    strokes: &[Po, Ro, Po, Ro, Po],
};

const XOTA: Template = Template {
    name: "Xota",
    ..JOTA
};

// Song-derived templates are laid out in half notes.
const BASIC: Template = Template {
    name: "Basic",
    offsets: &[0.0, 1.0, 2.0, 3.0],
    divisor: 0.5,
    strokes: &[Po, Ro, Ro, Pero],
};

const INTERMEDIATE: Template = Template {
    name: "Intermediate",
    offsets: &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
    divisor: 0.5,
    strokes: &[Po, Ro, Po, Pero, Ro, Po, Pero, Ro],
};

const ADVANCED: Template = Template {
    name: "Advanced",
    offsets: &[0.0, 1.0, 1.5, 2.0, 3.0, 4.0, 4.5, 5.0, 6.0, 7.0],
    divisor: 0.5,
    strokes: &[Po, Ro, Pero, Po, Pero, Ro, Po, Pero, Ro, Po],
};

const ENERGETIC: Template = Template {
    name: "Energetic",
    offsets: &[0.0, 0.25, 0.5, 0.75, 1.0, 2.0, 3.0, 4.0],
    divisor: 0.5,
    strokes: &[Po, Ro, Po, Pero, Ro, Po, Pero, Ro],
};

const DANCE: Template = Template {
    name: "Dance",
    offsets: &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
    divisor: 0.5,
    strokes: &[Po, Pero, Ro, Pero, Po, Pero, Ro, Pero],
};

fn template_for(id: TemplateId) -> Option<&'static Template> {
    match id {
        TemplateId::Generic => None,
        TemplateId::Muineira => Some(&MUINEIRA),
        TemplateId::Jota => Some(&JOTA),
        TemplateId::Xota => Some(&XOTA),
        TemplateId::Basic => Some(&BASIC),
        TemplateId::Intermediate => Some(&INTERMEDIATE),
        TemplateId::Advanced => Some(&ADVANCED),
        TemplateId::Energetic => Some(&ENERGETIC),
        TemplateId::Dance => Some(&DANCE),
    }
}

/// Generate the expected pattern for a template id string such as `"muineira"`.
/// `beat_count` is only read by the generic template.
pub fn generate(bpm: f64, template_id: &str, beat_count: Option<usize>) -> Result<RhythmPattern> {
    let id: TemplateId = template_id.parse()?;
    generate_pattern(bpm, id, beat_count)
}

pub fn generate_pattern(
    bpm: f64,
    id: TemplateId,
    beat_count: Option<usize>,
) -> Result<RhythmPattern> {
    let beat_duration = beat_duration_ms(bpm)?;

    let pattern = match template_for(id) {
        Some(template) => {
            let step = beat_duration / template.divisor;
            RhythmPattern {
                name: template.name.to_string(),
                bpm,
                beats: template.offsets.iter().map(|&o| o * step).collect(),
                strokes: template.strokes.to_vec(),
            }
        }
        None => generate_even(
            bpm,
            beat_count.unwrap_or(DEFAULT_GENERIC_BEATS),
            "Pattern",
        )?,
    };

    debug!(
        "generated {} pattern: {} beats at {} bpm",
        id,
        pattern.beats.len(),
        bpm
    );
    Ok(pattern)
}

/// `count` evenly spaced strikes, one per beat.
pub fn generate_even(bpm: f64, count: usize, name: &str) -> Result<RhythmPattern> {
    let beat_duration = beat_duration_ms(bpm)?;
    if count == 0 {
        return Err(RhythmError::InvalidParameter(
            "a pattern needs at least one beat".to_string(),
        ));
    }

    Ok(RhythmPattern {
        name: name.to_string(),
        bpm,
        beats: (0..count).map(|i| i as f64 * beat_duration).collect(),
        strokes: Vec::new(),
    })
}

/// Replace a pattern that is too short to practice with the basic po-ro-ro
/// pero layout at the same tempo. Longer patterns come back unchanged.
pub fn adjust_pattern(pattern: RhythmPattern) -> Result<RhythmPattern> {
    if pattern.beats.len() >= MIN_PATTERN_BEATS {
        return Ok(pattern);
    }
    let basic = generate_pattern(pattern.bpm, TemplateId::Basic, None)?;
    debug!(
        "pattern '{}' has {} beats, using the basic layout",
        pattern.name,
        pattern.beats.len()
    );
    Ok(RhythmPattern {
        beats: basic.beats,
        strokes: basic.strokes,
        ..pattern
    })
}
