//! Activity trend over the last N days.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::minutes_by_day;
use crate::session::Session;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub minutes: u32,
}

/// Minute totals for the `days` calendar days ending at `today`, oldest
/// first. The UI renders this over 7 or 30 days.
pub fn trend_series(sessions: &[Session], today: NaiveDate, days: u32) -> Vec<TrendPoint> {
    let by_day = minutes_by_day(sessions);
    (0..days)
        .rev()
        .map(|back| {
            let day = today - Duration::days(i64::from(back));
            TrendPoint {
                day,
                minutes: by_day.get(&day).copied().unwrap_or(0),
            }
        })
        .collect()
}
