//! Derived analytics over the session log.
//!
//! Everything in here is a pure function of the sessions passed in; nothing
//! keeps incremental state. Callers pass a project-filtered slice when the
//! view is filtered.

mod calendar;
mod level;
mod streak;
mod summary;
mod trend;
mod week;

pub use calendar::{month_heatmap, HeatCell, Intensity};
pub use level::{level_progress, LevelProgress, LADDER_TOTAL_MIN};
pub use streak::{best_streak_all_time, current_streak_days};
pub use summary::{average_minutes, median_minutes, minutes_on_day, total_minutes};
pub use trend::{trend_series, TrendPoint};
pub use week::{week_bars, week_total_minutes, DayBar};

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::session::Session;
use crate::timeutil::day_key;

/// Total minutes per calendar day, keyed by the session's start date.
pub fn minutes_by_day(sessions: &[Session]) -> BTreeMap<NaiveDate, u32> {
    let mut map = BTreeMap::new();
    for session in sessions {
        *map.entry(day_key(session.start)).or_insert(0) += session.minutes;
    }
    map
}
