use serde::{Deserialize, Serialize};

use crate::domain::models::activity::ActivityCounts;

const WEIGHT_LOGIN: i64 = 10;
const WEIGHT_VIDEO_VIEW: i64 = 5;
const WEIGHT_ARTICLE_VIEW: i64 = 5;
const WEIGHT_SEARCH: i64 = 2;
const WEIGHT_BOOKMARK_ADD: i64 = 3;

const HIGH_RISK_MAX: u32 = 10;
const MEDIUM_RISK_MAX: u32 = 20;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChurnRisk {
    High,
    Medium,
    Low,
}

impl ChurnRisk {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(ChurnRisk::High),
            "medium" => Some(ChurnRisk::Medium),
            "low" => Some(ChurnRisk::Low),
            _ => None,
        }
    }
}

/// Weighted sum over the 7-day counters. Counters are clamped to zero first
/// so a malformed negative count can never drag the score below zero.
pub fn engagement_score(counts: &ActivityCounts) -> u32 {
    let score = WEIGHT_LOGIN * counts.login.max(0)
        + WEIGHT_VIDEO_VIEW * counts.video_view.max(0)
        + WEIGHT_ARTICLE_VIEW * counts.article_view.max(0)
        + WEIGHT_SEARCH * counts.search.max(0)
        + WEIGHT_BOOKMARK_ADD * counts.bookmark_add.max(0);
    score as u32
}

/// Fixed thresholds: <=10 high, 11..=20 medium, >=21 low.
pub fn classify_churn_risk(score: u32) -> ChurnRisk {
    if score <= HIGH_RISK_MAX {
        ChurnRisk::High
    } else if score <= MEDIUM_RISK_MAX {
        ChurnRisk::Medium
    } else {
        ChurnRisk::Low
    }
}
