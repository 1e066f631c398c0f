// ABOUTME: Dashboard session bucketing relative to a reference instant
// ABOUTME: Derives today / upcoming / weekly views from a full session list
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Dashboard projections
//!
//! Buckets a trainer's sessions relative to a reference "now" instant:
//! today's schedule, the upcoming scheduled sessions beyond today, and
//! per-status counts for the calendar week containing `now`. Purely a
//! read-side projection recomputed from the session list on each call.

use crate::analytics::package::SessionTotals;
use crate::models::{Session, SessionStatus};
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// First day of the calendar week used for weekly stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "monday" | "mon" => Self::Monday,
            _ => Self::Sunday,
        }
    }

    /// Days elapsed since the start of the week for `date`
    fn days_into_week(self, date: DateTime<Utc>) -> i64 {
        match self {
            Self::Sunday => i64::from(date.weekday().num_days_from_sunday()),
            Self::Monday => i64::from(date.weekday().num_days_from_monday()),
        }
    }
}

impl std::fmt::Display for WeekStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sunday => write!(f, "sunday"),
            Self::Monday => write!(f, "monday"),
        }
    }
}

/// Midnight UTC of the day containing `now`
#[must_use]
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Half-open bounds `[start, end)` of the calendar week containing `now`
#[must_use]
pub fn week_bounds(now: DateTime<Utc>, week_start: WeekStart) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_day(now) - Duration::days(week_start.days_into_week(now));
    (start, start + Duration::days(7))
}

/// Derived dashboard view over a session list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    /// Sessions scheduled within `[start-of-day(now), +24h)`, any status,
    /// ordered by scheduled time ascending
    pub today: Vec<Session>,
    /// Scheduled sessions at or after `start-of-day(now) + 24h`, ordered by
    /// scheduled time ascending
    pub upcoming: Vec<Session>,
    /// Per-status counts for the calendar week containing `now`
    pub weekly_stats: SessionTotals,
}

/// Bucket sessions relative to the reference instant `now`
#[must_use]
pub fn bucket_sessions(
    sessions: &[Session],
    now: DateTime<Utc>,
    week_start: WeekStart,
) -> DashboardView {
    let today_start = start_of_day(now);
    let tomorrow = today_start + Duration::days(1);
    let (week_begin, week_end) = week_bounds(now, week_start);

    let mut today: Vec<Session> = sessions
        .iter()
        .filter(|s| s.scheduled_at >= today_start && s.scheduled_at < tomorrow)
        .cloned()
        .collect();
    today.sort_by_key(|s| s.scheduled_at);

    let mut upcoming: Vec<Session> = sessions
        .iter()
        .filter(|s| s.scheduled_at >= tomorrow && s.status == SessionStatus::Scheduled)
        .cloned()
        .collect();
    upcoming.sort_by_key(|s| s.scheduled_at);

    let this_week: Vec<Session> = sessions
        .iter()
        .filter(|s| s.scheduled_at >= week_begin && s.scheduled_at < week_end)
        .cloned()
        .collect();
    let weekly_stats = SessionTotals::count(&this_week);

    DashboardView {
        today,
        upcoming,
        weekly_stats,
    }
}
