//! Monthly heatmap.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::minutes_by_day;
use crate::session::Session;
use crate::timeutil::week_start;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Rounds to zero hours.
    Empty,
    /// Up to half an hour.
    Trace,
    /// Up to one hour.
    Light,
    /// Up to three hours.
    Medium,
    /// Over three hours.
    Deep,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatCell {
    pub day: NaiveDate,
    pub minutes: u32,
    /// Hours rounded to the nearest half.
    pub hours: f64,
    pub intensity: Intensity,
    /// Whether the cell belongs to the displayed month (the grid pads out
    /// to whole weeks).
    pub in_month: bool,
}

fn bucket(hours: f64) -> Intensity {
    if hours <= 0.0 {
        Intensity::Empty
    } else if hours <= 0.5 {
        Intensity::Trace
    } else if hours <= 1.0 {
        Intensity::Light
    } else if hours <= 3.0 {
        Intensity::Medium
    } else {
        Intensity::Deep
    }
}

/// Monday-aligned grid of whole weeks covering one month. Returns `None`
/// for an out-of-range year/month pair.
pub fn month_heatmap(sessions: &[Session], year: i32, month: u32) -> Option<Vec<HeatCell>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_month - Duration::days(1);

    let grid_start = week_start(first);
    let grid_end = week_start(last) + Duration::days(6);

    let by_day = minutes_by_day(sessions);
    let mut cells = Vec::new();
    let mut day = grid_start;
    while day <= grid_end {
        let minutes = by_day.get(&day).copied().unwrap_or(0);
        let hours = (f64::from(minutes) / 60.0 * 2.0).round() / 2.0;
        cells.push(HeatCell {
            day,
            minutes,
            hours,
            intensity: bucket(hours),
            in_month: day >= first && day <= last,
        });
        day += Duration::days(1);
    }
    Some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use chrono::Datelike;

    #[test]
    fn grid_covers_whole_weeks() {
        let cells = month_heatmap(&[], 2025, 8).unwrap();
        // August 2025: Fri 1st .. Sun 31st -> grid Mon Jul 28 .. Sun Aug 31.
        assert_eq!(cells.len() % 7, 0);
        assert_eq!(cells.first().unwrap().day, "2025-07-28".parse().unwrap());
        assert_eq!(cells.last().unwrap().day, "2025-08-31".parse().unwrap());
        assert!(!cells[0].in_month);
        assert!(cells.iter().filter(|c| c.in_month).count() == 31);
    }

    #[test]
    fn buckets_follow_rounded_hours() {
        let mut store = SessionStore::default();
        store
            .record_manual(10, None, "2025-08-04T08:00:00Z".parse().unwrap())
            .unwrap();
        store
            .record_manual(50, None, "2025-08-05T08:00:00Z".parse().unwrap())
            .unwrap();
        store
            .record_manual(200, None, "2025-08-06T08:00:00Z".parse().unwrap())
            .unwrap();
        let cells = month_heatmap(store.sessions(), 2025, 8).unwrap();
        let cell = |d: u32| cells.iter().find(|c| c.day.day() == d && c.in_month).unwrap();
        // 10 min rounds to 0h.
        assert_eq!(cell(4).intensity, Intensity::Empty);
        assert_eq!(cell(4).hours, 0.0);
        // 50 min rounds to 1h.
        assert_eq!(cell(5).intensity, Intensity::Light);
        // 200 min rounds to 3.5h.
        assert_eq!(cell(6).intensity, Intensity::Deep);
        assert_eq!(cell(6).hours, 3.5);
    }

    #[test]
    fn invalid_month_is_none() {
        assert!(month_heatmap(&[], 2025, 13).is_none());
    }
}
