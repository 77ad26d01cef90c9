//! Analysis configuration supplied by the host.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RhythmError};

/// Default tolerance window for matching a recorded strike to an expected one.
pub const DEFAULT_TOLERANCE_MS: f64 = 100.0;

/// How an expected beat with no recorded strike inside the window is charged.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MissPenalty {
    /// Distance to the nearest unconsumed recorded beat, or `tolerance + 1` if none remain.
    #[default]
    Nearest,
    /// Always `tolerance + 1`.
    Capped,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    pub tolerance_ms: f64,
    pub miss_penalty: MissPenalty,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance_ms: DEFAULT_TOLERANCE_MS,
            miss_penalty: MissPenalty::Nearest,
        }
    }
}

impl AnalysisConfig {
    pub fn with_tolerance(tolerance_ms: f64) -> Self {
        Self {
            tolerance_ms,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance_ms.is_finite() || self.tolerance_ms <= 0.0 {
            return Err(RhythmError::InvalidParameter(format!(
                "tolerance must be a positive number of milliseconds, got {}",
                self.tolerance_ms
            )));
        }
        Ok(())
    }

    /// Deviation recorded for an unmatched beat when no candidate is left.
    pub fn miss_sentinel(&self) -> f64 {
        self.tolerance_ms + 1.0
    }
}
