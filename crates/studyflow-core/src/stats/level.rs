//! Leveling curve over cumulative study minutes.
//!
//! A fixed ladder of four tiers (Bronze, Silver, Gold, Diamond), each split
//! into ranks III, II and I. Every rank within a tier takes that tier's
//! duration: 2h, 3h, 4h and 6h respectively, so the whole ladder spans
//! (2+3+4+6) * 3 * 60 = 2700 minutes.

use serde::{Deserialize, Serialize};

use crate::timeutil::clamp01;

pub const LADDER_TOTAL_MIN: u64 = 2700;

const TIERS: [(&str, u64); 4] = [("Bronze", 2), ("Silver", 3), ("Gold", 4), ("Diamond", 6)];
const RANKS: [&str; 3] = ["III", "II", "I"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Current rank, e.g. "Silver II".
    pub label: String,
    /// Percent complete within the current rank, 0..=100.
    pub percent: u8,
    /// Minutes left to the next rank; `None` once the ladder is topped out.
    pub to_next_min: Option<u64>,
    pub max_reached: bool,
}

fn ladder() -> impl Iterator<Item = (String, u64)> {
    TIERS.iter().flat_map(|&(tier, hours)| {
        RANKS
            .iter()
            .map(move |rank| (format!("{tier} {rank}"), hours * 60))
    })
}

/// Map cumulative minutes onto the ladder: the lowest rank whose cumulative
/// threshold has not yet been exceeded. Beyond the full span the final rank
/// is reported at 100% with no to-next value.
pub fn level_progress(total_minutes: u64) -> LevelProgress {
    let mut cum = 0u64;
    for (label, span) in ladder() {
        if total_minutes < cum + span {
            let into = total_minutes - cum;
            let percent = (clamp01(into as f64 / span as f64) * 100.0).round() as u8;
            return LevelProgress {
                label,
                percent,
                to_next_min: Some(span - into),
                max_reached: false,
            };
        }
        cum += span;
    }
    LevelProgress {
        label: "Diamond I".to_string(),
        percent: 100,
        to_next_min: None,
        max_reached: true,
    }
}
