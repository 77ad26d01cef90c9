use log::trace;

use crate::config::{AnalysisConfig, MissPenalty};
use crate::scoring::types::{BeatDeviation, BeatEvent, RhythmPattern, UNMATCHED_TIME};

/// Align every expected beat with the nearest unconsumed recorded beat.
///
/// Expected beats are visited in order and each takes the closest recorded
/// strike still available, so a strike is never counted twice. Ties go to the
/// earlier strike in `recorded`. This is greedy, not a minimum-cost assignment:
/// an early expected beat can take a strike that a later one would have fit
/// better.
///
/// Always returns one deviation per expected beat, in pattern order.
pub fn match_beats(
    recorded: &[BeatEvent],
    pattern: &RhythmPattern,
    config: &AnalysisConfig,
) -> Vec<BeatDeviation> {
    let mut consumed: Vec<bool> = vec![false; recorded.len()];
    let mut deviations: Vec<BeatDeviation> = Vec::with_capacity(pattern.beats.len());

    for (i, &expected) in pattern.beats.iter().enumerate() {
        let mut best_idx: Option<usize> = None;
        let mut best_dist = f64::INFINITY;

        for (j, beat) in recorded.iter().enumerate() {
            if consumed[j] {
                continue;
            }
            let dist = (beat.timestamp_ms - expected).abs();
            if dist < best_dist {
                best_dist = dist;
                best_idx = Some(j);
            }
        }

        let beat_index = i as u32 + 1;
        match best_idx {
            Some(j) if best_dist <= config.tolerance_ms => {
                consumed[j] = true;
                trace!(
                    "beat #{} at {}ms matched strike {} ({}ms off)",
                    beat_index,
                    expected,
                    j,
                    best_dist
                );
                deviations.push(BeatDeviation {
                    beat_index,
                    expected_time_ms: expected,
                    actual_time_ms: recorded[j].timestamp_ms,
                    deviation_ms: best_dist,
                });
            }
            _ => {
                let deviation_ms = match (config.miss_penalty, best_idx) {
                    (MissPenalty::Nearest, Some(_)) => best_dist,
                    _ => config.miss_sentinel(),
                };
                trace!("beat #{} at {}ms missed", beat_index, expected);
                deviations.push(BeatDeviation {
                    beat_index,
                    expected_time_ms: expected,
                    actual_time_ms: UNMATCHED_TIME,
                    deviation_ms,
                });
            }
        }
    }

    deviations
}
