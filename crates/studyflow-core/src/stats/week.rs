//! Weekly histogram.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::minutes_by_day;
use crate::session::Session;
use crate::timeutil::clamp01;

/// Minutes that fill a bar completely.
const FULL_BAR_MINUTES: f64 = 360.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayBar {
    pub day: NaiveDate,
    pub minutes: u32,
    /// Normalized bar height in `[0, 1]`; six hours fills the bar.
    pub height: f64,
}

/// Per-day minute totals for the week starting at `week_start` (a Monday),
/// Monday through Sunday.
pub fn week_bars(sessions: &[Session], week_start: NaiveDate) -> Vec<DayBar> {
    let by_day = minutes_by_day(sessions);
    (0..7)
        .map(|offset| {
            let day = week_start + Duration::days(offset);
            let minutes = by_day.get(&day).copied().unwrap_or(0);
            DayBar {
                day,
                minutes,
                height: clamp01(f64::from(minutes) / FULL_BAR_MINUTES),
            }
        })
        .collect()
}

pub fn week_total_minutes(bars: &[DayBar]) -> u32 {
    bars.iter().map(|b| b.minutes).sum()
}
