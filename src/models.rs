// ABOUTME: Core data models for the studio training management API
// ABOUTME: Defines Trainer, Client, Session, Measurement, Assessment and photo types
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! # Data Models
//!
//! Domain data structures shared by the database layer, the analytics
//! functions, and the HTTP routes. Derived values (session counters,
//! assessment scores) are never stored on these types; they are recomputed
//! by the [`crate::analytics`] functions on each read.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A trainer account
///
/// Trainers own clients; every API resource is scoped to the authenticated
/// trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    pub id: Uuid,
    pub email: String,
    /// bcrypt hash, never serialized in API responses
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trainer {
    /// Create a new trainer with a fresh ID
    #[must_use]
    pub fn new(
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A personal-training client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    /// Number of sessions in the client's prepaid package
    pub total_package_size: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_start_date: Option<DateTime<Utc>>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status of a training session
///
/// A plain tag, not a guarded state machine: any status may move to any
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    NoShow,
    Cancelled,
}

impl SessionStatus {
    /// All valid statuses, in display order
    pub const ALL: [Self; 4] = [
        Self::Scheduled,
        Self::Completed,
        Self::NoShow,
        Self::Cancelled,
    ];

    /// Wire representation of the status
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::NoShow => "no_show",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "no_show" => Ok(Self::NoShow),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::invalid_input(format!(
                "Invalid status '{other}'. Valid values: scheduled, completed, no_show, cancelled"
            ))),
        }
    }
}

/// A training session booked against a client's package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub client_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: SessionStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new scheduled session with a fresh ID
    #[must_use]
    pub fn new(client_id: Uuid, scheduled_at: DateTime<Utc>, duration_minutes: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_id,
            scheduled_at,
            duration_minutes,
            status: SessionStatus::Scheduled,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A timestamped body-measurement snapshot
///
/// Every measurement field is independently optional; partial snapshots are
/// valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Measurement {
    pub id: Uuid,
    pub client_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neck_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoulder_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_arm_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_arm_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_leg_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_leg_cm: Option<f64>,
    pub notes: String,
    pub measured_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A categorical assessment rating
///
/// Every movement-screen item is rated on this fixed three-level scale.
/// Raw integers are converted at the input boundary via
/// [`Rating::try_from_field`], which names the offending field on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rating {
    Poor = 1,
    Average = 2,
    Good = 3,
}

impl Rating {
    /// Numeric wire value (1, 2 or 3)
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert a raw integer, attributing failures to `field`
    ///
    /// # Errors
    ///
    /// Returns a validation error naming `field` when `value` is outside
    /// {1, 2, 3}.
    pub fn try_from_field(value: i64, field: &str) -> AppResult<Self> {
        match value {
            1 => Ok(Self::Poor),
            2 => Ok(Self::Average),
            3 => Ok(Self::Good),
            _ => Err(AppError::invalid_field(field, "must be 1, 2 or 3")),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        match value {
            1 => Ok(Self::Poor),
            2 => Ok(Self::Average),
            3 => Ok(Self::Good),
            other => Err(serde::de::Error::custom(format!(
                "rating must be 1, 2 or 3, got {other}"
            ))),
        }
    }
}

/// A fitness assessment: PARQ screening plus movement ratings
///
/// At most one assessment exists per client. Only the posture category is
/// aggregated into a score; the remaining categories are recorded ungraded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: Uuid,
    pub client_id: Uuid,

    // PARQ screening (true = yes)
    pub parq_heart_problem: bool,
    pub parq_chest_pain: bool,
    pub parq_dizziness: bool,
    pub parq_chronic_condition: bool,
    pub parq_medication: bool,
    pub parq_bone_joint: bool,
    pub parq_supervision: bool,

    // Posture analysis
    pub posture_head_neck: Rating,
    pub posture_shoulders: Rating,
    pub posture_lphc: Rating,
    pub posture_knee: Rating,
    pub posture_foot: Rating,

    // Push-up screen
    pub pushup_form: Rating,
    pub pushup_scapular: Rating,
    pub pushup_lordosis: Rating,
    pub pushup_head_pos: Rating,

    // Overhead squat screen
    pub squat_feet_out: Rating,
    pub squat_knees_in: Rating,
    pub squat_lower_back: Rating,
    pub squat_arms_forward: Rating,
    pub squat_lean_forward: Rating,

    // Single-leg balance screen
    pub balance_correct: Rating,
    pub balance_knee_in: Rating,
    pub balance_hip_rise: Rating,

    // Shoulder mobility screen
    pub shoulder_retraction: Rating,
    pub shoulder_protraction: Rating,
    pub shoulder_elevation: Rating,
    pub shoulder_depression: Rating,

    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assessment {
    /// The seven PARQ answers in questionnaire order
    #[must_use]
    pub const fn parq_answers(&self) -> [bool; 7] {
        [
            self.parq_heart_problem,
            self.parq_chest_pain,
            self.parq_dizziness,
            self.parq_chronic_condition,
            self.parq_medication,
            self.parq_bone_joint,
            self.parq_supervision,
        ]
    }

    /// The five posture sub-scores
    #[must_use]
    pub const fn posture_ratings(&self) -> [Rating; 5] {
        [
            self.posture_head_neck,
            self.posture_shoulders,
            self.posture_lphc,
            self.posture_knee,
            self.posture_foot,
        ]
    }
}

/// A batch of progress photos uploaded together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoGroup {
    pub id: Uuid,
    pub client_id: Uuid,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub photos: Vec<Photo>,
}

/// A single stored photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    pub photo_group_id: Uuid,
    /// Public URL path under which the photo is served
    pub url: String,
    pub file_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}
