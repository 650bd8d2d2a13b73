//! Totals, averages, medians.

use chrono::NaiveDate;

use crate::session::Session;
use crate::timeutil::day_key;

pub fn total_minutes(sessions: &[Session]) -> u64 {
    sessions.iter().map(|s| u64::from(s.minutes)).sum()
}

pub fn minutes_on_day(sessions: &[Session], day: NaiveDate) -> u32 {
    sessions
        .iter()
        .filter(|s| day_key(s.start) == day)
        .map(|s| s.minutes)
        .sum()
}

/// Mean session length in minutes, rounded; 0 for an empty log.
pub fn average_minutes(sessions: &[Session]) -> u32 {
    if sessions.is_empty() {
        return 0;
    }
    let sum = total_minutes(sessions) as f64;
    (sum / sessions.len() as f64).round() as u32
}

/// Median session length in minutes; an even-length list averages the middle
/// pair and rounds. 0 for an empty log.
pub fn median_minutes(sessions: &[Session]) -> u32 {
    if sessions.is_empty() {
        return 0;
    }
    let mut minutes: Vec<u32> = sessions.iter().map(|s| s.minutes).collect();
    minutes.sort_unstable();
    let mid = minutes.len() / 2;
    if minutes.len() % 2 == 1 {
        minutes[mid]
    } else {
        ((f64::from(minutes[mid - 1]) + f64::from(minutes[mid])) / 2.0).round() as u32
    }
}
