// ABOUTME: Package accounting derived from a client's session history
// ABOUTME: Counts sessions per status and computes the remaining prepaid balance
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Package accounting
//!
//! A client buys a prepaid package of `total_package_size` sessions. The
//! balance is never stored: it is recomputed here from the full session
//! list on every read. Only completed sessions consume package credit;
//! scheduled, cancelled, and no-show sessions do not reduce the balance.

use crate::models::{Session, SessionStatus};
use serde::{Deserialize, Serialize};

/// Per-status session counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTotals {
    pub scheduled: u32,
    pub completed: u32,
    pub no_show: u32,
    pub cancelled: u32,
}

impl SessionTotals {
    /// Count sessions by status in a single pass
    #[must_use]
    pub fn count(sessions: &[Session]) -> Self {
        let mut totals = Self::default();
        for session in sessions {
            match session.status {
                SessionStatus::Scheduled => totals.scheduled += 1,
                SessionStatus::Completed => totals.completed += 1,
                SessionStatus::NoShow => totals.no_show += 1,
                SessionStatus::Cancelled => totals.cancelled += 1,
            }
        }
        totals
    }

    /// Sum of all per-status counts
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.scheduled + self.completed + self.no_show + self.cancelled
    }
}

/// Derived package state for a client
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackageSummary {
    pub scheduled_sessions: u32,
    pub completed_sessions: u32,
    pub no_show_sessions: u32,
    pub cancelled_sessions: u32,
    /// Sessions left in the package; negative when a client has completed
    /// more sessions than the package holds (deliberately not clamped)
    pub remaining_sessions: i64,
    /// Remaining share of the package as a percentage; 0.0 when the
    /// package size is zero
    pub progress_percent: f64,
}

/// Summarize a client's package from its full session list
///
/// An empty session list yields all-zero counts and
/// `remaining_sessions == total_package_size`.
#[must_use]
pub fn summarize_package(total_package_size: i32, sessions: &[Session]) -> PackageSummary {
    let totals = SessionTotals::count(sessions);
    let remaining = i64::from(total_package_size) - i64::from(totals.completed);

    let progress_percent = if total_package_size > 0 {
        remaining as f64 / f64::from(total_package_size) * 100.0
    } else {
        0.0
    };

    PackageSummary {
        scheduled_sessions: totals.scheduled,
        completed_sessions: totals.completed,
        no_show_sessions: totals.no_show,
        cancelled_sessions: totals.cancelled,
        remaining_sessions: remaining,
        progress_percent,
    }
}
