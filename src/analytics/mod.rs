// ABOUTME: Pure aggregation logic over in-memory record lists
// ABOUTME: Package counters, assessment scoring, and dashboard session bucketing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! # Analytics
//!
//! The pure computation core of the service. All three modules operate on
//! previously-fetched record lists and return plain aggregate values; they
//! perform no I/O and keep no state. Derived counters are recomputed on
//! every call rather than cached, so they can never drift from the
//! underlying records.

/// Assessment scoring: posture score, level banding, PARQ flag
pub mod assessment;

/// Dashboard projections: today / upcoming / weekly buckets
pub mod dashboard;

/// Package accounting: per-status session counters and remaining balance
pub mod package;

pub use assessment::{summarize_assessment, AssessmentSummary, PostureLevel};
pub use dashboard::{bucket_sessions, start_of_day, week_bounds, DashboardView, WeekStart};
pub use package::{summarize_package, PackageSummary, SessionTotals};
