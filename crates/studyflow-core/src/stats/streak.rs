//! Study-day streaks.
//!
//! Two deliberately separate notions of day adjacency:
//! `current_streak_days` walks literal calendar days backward from today and
//! requires minutes > 0 on each; `best_streak_all_time` scans the distinct
//! set of days that have any session and looks for exact one-day gaps. They
//! answer different questions and are kept independent.

use chrono::{Duration, NaiveDate};

use super::minutes_by_day;
use crate::session::Session;
use crate::timeutil::day_key;

/// Consecutive studied days ending at `today` (inclusive). A day counts as
/// studied when its total minutes exceed zero; a `today` with nothing logged
/// yet breaks the streak at 0.
pub fn current_streak_days(sessions: &[Session], today: NaiveDate) -> u32 {
    if sessions.is_empty() {
        return 0;
    }
    let by_day = minutes_by_day(sessions);
    let mut count = 0;
    let mut day = today;
    while by_day.get(&day).copied().unwrap_or(0) > 0 {
        count += 1;
        day -= Duration::days(1);
    }
    count
}

/// Longest run of exactly-consecutive calendar days with at least one
/// session, anywhere in the history. Extra sessions on an already-counted
/// day change nothing.
pub fn best_streak_all_time(sessions: &[Session]) -> u32 {
    let mut days: Vec<NaiveDate> = sessions.iter().map(|s| day_key(s.start)).collect();
    days.sort();
    days.dedup();

    let mut best = 0u32;
    let mut run = 0u32;
    let mut last: Option<NaiveDate> = None;
    for day in days {
        run = match last {
            Some(prev) if day - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        last = Some(day);
    }
    best
}
