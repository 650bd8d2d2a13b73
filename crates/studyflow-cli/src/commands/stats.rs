//! Statistics commands. Everything prints pretty JSON.

use chrono::{Datelike, Duration, Months, NaiveDate};
use clap::Subcommand;
use serde_json::json;
use studyflow_core::stats;
use studyflow_core::timeutil::{fmt_hm, week_start};
use studyflow_core::{Clock, KvStore, SessionStore, SystemClock};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Minutes studied today
    Today {
        /// Restrict to one project
        #[arg(long)]
        project: Option<String>,
    },
    /// Per-day minutes for one week
    Week {
        /// Weeks back (negative) or forward from the current one
        #[arg(long, default_value_t = 0)]
        offset: i64,
        /// Restrict to one project
        #[arg(long)]
        project: Option<String>,
    },
    /// Average, median, best streak, totals
    Summary {
        /// Restrict to one project
        #[arg(long)]
        project: Option<String>,
    },
    /// Level progress over all-time minutes
    Level,
    /// Current study-day streak
    Streak,
    /// Monthly heatmap
    Calendar {
        /// Months back (negative) or forward from the current one
        #[arg(long, default_value_t = 0)]
        offset: i32,
    },
    /// Minute totals for the last days
    Trend {
        /// Number of days (7 or 30 in the UI)
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Restrict to one project
        #[arg(long)]
        project: Option<String>,
    },
}

fn shifted_month(today: NaiveDate, offset: i32) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    let shifted = if offset >= 0 {
        today.checked_add_months(Months::new(offset as u32))
    } else {
        today.checked_sub_months(Months::new(offset.unsigned_abs()))
    };
    shifted.ok_or_else(|| "month offset out of range".into())
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = KvStore::open()?;
    let sessions = SessionStore::load(&store);
    let today = SystemClock.now().date_naive();

    match action {
        StatsAction::Today { project } => {
            let filtered = sessions.filtered(project.as_deref());
            let minutes = stats::minutes_on_day(&filtered, today);
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "date": today,
                    "minutes": minutes,
                    "formatted": fmt_hm(minutes),
                }))?
            );
        }
        StatsAction::Week { offset, project } => {
            let filtered = sessions.filtered(project.as_deref());
            let start = week_start(today) + Duration::weeks(offset);
            let bars = stats::week_bars(&filtered, start);
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "week_start": start,
                    "total_minutes": stats::week_total_minutes(&bars),
                    "bars": bars,
                }))?
            );
        }
        StatsAction::Summary { project } => {
            let filtered = sessions.filtered(project.as_deref());
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "sessions": filtered.len(),
                    "total_minutes": stats::total_minutes(&filtered),
                    "average_minutes": stats::average_minutes(&filtered),
                    "median_minutes": stats::median_minutes(&filtered),
                    "best_streak_days": stats::best_streak_all_time(&filtered),
                }))?
            );
        }
        StatsAction::Level => {
            // Leveling always spans every project.
            let total = stats::total_minutes(sessions.sessions());
            let progress = stats::level_progress(total);
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "total_minutes": total,
                    "formatted": fmt_hm(total.min(u64::from(u32::MAX)) as u32),
                    "progress": progress,
                }))?
            );
        }
        StatsAction::Streak => {
            // The front-anchored streak also spans every project.
            let streak = stats::current_streak_days(sessions.sessions(), today);
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "date": today,
                    "streak_days": streak,
                }))?
            );
        }
        StatsAction::Calendar { offset } => {
            let shown = shifted_month(today, offset)?;
            let cells = stats::month_heatmap(sessions.sessions(), shown.year(), shown.month())
                .ok_or("month out of range")?;
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "year": shown.year(),
                    "month": shown.month(),
                    "cells": cells,
                }))?
            );
        }
        StatsAction::Trend { days, project } => {
            let filtered = sessions.filtered(project.as_deref());
            let series = stats::trend_series(&filtered, today, days);
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
    }
    Ok(())
}
