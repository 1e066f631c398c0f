// ABOUTME: Assessment scoring: posture score total, level banding and PARQ flagging
// ABOUTME: Pure summary computation over a stored assessment record
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Assessment scoring
//!
//! Only the posture category is aggregated: its five sub-scores sum to a
//! 5-15 posture score, banded into three levels. The push-up, squat,
//! balance, and shoulder categories are recorded but displayed ungraded.
//! A health-risk flag is raised when any PARQ answer is "yes".

use crate::models::Assessment;
use serde::{Deserialize, Serialize};

/// Qualitative band for the posture score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostureLevel {
    Poor,
    Average,
    Good,
}

impl PostureLevel {
    /// Band a posture score (valid range 5-15)
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score <= 6 {
            Self::Poor
        } else if score <= 12 {
            Self::Average
        } else {
            Self::Good
        }
    }

    /// Wire representation of the level
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Average => "average",
            Self::Good => "good",
        }
    }
}

impl std::fmt::Display for PostureLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived assessment summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    /// Sum of the five posture sub-scores (5-15)
    pub posture_score: u8,
    /// Qualitative band for the posture score
    pub posture_level: PostureLevel,
    /// True when any PARQ answer signals a health risk that should be
    /// cleared before physical testing
    pub requires_attention: bool,
}

/// Summarize a stored assessment
///
/// Sub-score validation happens at the input boundary
/// ([`crate::models::Rating::try_from_field`]); by the time an
/// [`Assessment`] exists its ratings are known to be in range.
#[must_use]
pub fn summarize_assessment(assessment: &Assessment) -> AssessmentSummary {
    let posture_score: u8 = assessment
        .posture_ratings()
        .iter()
        .map(|rating| rating.as_u8())
        .sum();

    let requires_attention = assessment.parq_answers().iter().any(|answer| *answer);

    AssessmentSummary {
        posture_score,
        posture_level: PostureLevel::from_score(posture_score),
        requires_attention,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;
    use chrono::Utc;
    use uuid::Uuid;

    fn assessment_with(posture: [i64; 5], parq: [bool; 7]) -> Assessment {
        let rating =
            |value: i64, field: &str| Rating::try_from_field(value, field).expect("valid rating");
        let now = Utc::now();
        Assessment {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            parq_heart_problem: parq[0],
            parq_chest_pain: parq[1],
            parq_dizziness: parq[2],
            parq_chronic_condition: parq[3],
            parq_medication: parq[4],
            parq_bone_joint: parq[5],
            parq_supervision: parq[6],
            posture_head_neck: rating(posture[0], "posture_head_neck"),
            posture_shoulders: rating(posture[1], "posture_shoulders"),
            posture_lphc: rating(posture[2], "posture_lphc"),
            posture_knee: rating(posture[3], "posture_knee"),
            posture_foot: rating(posture[4], "posture_foot"),
            pushup_form: Rating::Average,
            pushup_scapular: Rating::Average,
            pushup_lordosis: Rating::Average,
            pushup_head_pos: Rating::Average,
            squat_feet_out: Rating::Average,
            squat_knees_in: Rating::Average,
            squat_lower_back: Rating::Average,
            squat_arms_forward: Rating::Average,
            squat_lean_forward: Rating::Average,
            balance_correct: Rating::Average,
            balance_knee_in: Rating::Average,
            balance_hip_rise: Rating::Average,
            shoulder_retraction: Rating::Average,
            shoulder_protraction: Rating::Average,
            shoulder_elevation: Rating::Average,
            shoulder_depression: Rating::Average,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    const ALL_NO: [bool; 7] = [false; 7];

    #[test]
    fn test_minimum_score_is_poor() {
        let summary = summarize_assessment(&assessment_with([1, 1, 1, 1, 1], ALL_NO));
        assert_eq!(summary.posture_score, 5);
        assert_eq!(summary.posture_level, PostureLevel::Poor);
    }

    #[test]
    fn test_maximum_score_is_good() {
        let summary = summarize_assessment(&assessment_with([3, 3, 3, 3, 3], ALL_NO));
        assert_eq!(summary.posture_score, 15);
        assert_eq!(summary.posture_level, PostureLevel::Good);
    }

    #[test]
    fn test_middle_score_is_average() {
        let summary = summarize_assessment(&assessment_with([2, 2, 2, 2, 3], ALL_NO));
        assert_eq!(summary.posture_score, 11);
        assert_eq!(summary.posture_level, PostureLevel::Average);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(PostureLevel::from_score(5), PostureLevel::Poor);
        assert_eq!(PostureLevel::from_score(6), PostureLevel::Poor);
        assert_eq!(PostureLevel::from_score(7), PostureLevel::Average);
        assert_eq!(PostureLevel::from_score(12), PostureLevel::Average);
        assert_eq!(PostureLevel::from_score(13), PostureLevel::Good);
        assert_eq!(PostureLevel::from_score(15), PostureLevel::Good);
    }

    #[test]
    fn test_banding_is_monotonic_in_score() {
        let mut previous = PostureLevel::Poor;
        for score in 5..=15 {
            let level = PostureLevel::from_score(score);
            assert!(level >= previous, "band regressed at score {score}");
            previous = level;
        }
    }

    #[test]
    fn test_requires_attention_only_when_any_parq_yes() {
        let summary = summarize_assessment(&assessment_with([2, 2, 2, 2, 2], ALL_NO));
        assert!(!summary.requires_attention);

        for i in 0..7 {
            let mut parq = ALL_NO;
            parq[i] = true;
            let summary = summarize_assessment(&assessment_with([2, 2, 2, 2, 2], parq));
            assert!(summary.requires_attention, "PARQ answer {i} not flagged");
        }
    }

    #[test]
    fn test_level_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PostureLevel::Average).unwrap(),
            "\"average\""
        );
    }
}
