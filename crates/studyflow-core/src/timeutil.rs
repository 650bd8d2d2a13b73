//! Calendar and formatting helpers shared across the library.
//!
//! Day keys are plain `NaiveDate`s (the UTC calendar date), weeks start on
//! Monday. The `Clock` trait is the only source of wall-clock time -- engines
//! take explicit timestamps so tests never have to wait.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Calendar date (UTC) a timestamp falls on.
pub fn day_key(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Format minutes as `45m`, `2h` or `2h 5m`.
pub fn fmt_hm(minutes: u32) -> String {
    let h = minutes / 60;
    let m = minutes % 60;
    if h == 0 {
        return format!("{m}m");
    }
    if m == 0 {
        return format!("{h}h");
    }
    format!("{h}h {m}m")
}

/// Format seconds as `MM:SS`.
pub fn fmt_ms(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Clamp a ratio into `[0.0, 1.0]`.
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Round seconds to whole minutes, halves up.
pub fn round_to_minutes(secs: u64) -> u32 {
    ((secs + 30) / 60) as u32
}

/// Source of wall-clock time.
///
/// Engines never read the clock themselves; callers pass `now_ms()` into
/// every command and tick.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn now_ms(&self) -> u64 {
        self.now().timestamp_millis().max(0) as u64
    }
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Timestamp for an epoch-milliseconds instant. Falls back to the epoch for
/// out-of-range values.
pub fn ms_to_datetime(ms: u64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms as i64).unwrap_or_default()
}
