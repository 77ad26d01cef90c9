//! Error types for pattern generation and rhythm scoring.

use thiserror::Error;

/// Caller-contract violations detected by the analysis core.
///
/// None of these are transient: the same inputs always fail the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RhythmError {
    /// A numeric argument is out of range (non-positive BPM or tolerance, zero beat count).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The expected pattern cannot be scored (e.g. it has no beats).
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// The template or catalog id is not known.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

pub type Result<T> = std::result::Result<T, RhythmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = RhythmError::InvalidParameter("bpm must be positive, got 0".to_string());
        assert_eq!(err.to_string(), "invalid parameter: bpm must be positive, got 0");

        let err = RhythmError::UnknownTemplate("fandango".to_string());
        assert_eq!(err.to_string(), "unknown template: fandango");
    }
}
