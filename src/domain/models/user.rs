use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::services::engagement::ChurnRisk;

pub const PLAN_TRIAL: &str = "trial";
pub const PLAN_PAID: &str = "paid";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub plan_type: String,
    pub subscription_type: Option<String>,
    pub trial_ends_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub next_renewal_at: Option<DateTime<Utc>>,
    pub is_super_user: bool,
    pub is_alumni: bool,
    pub alumni_batch_number: Option<i32>,
    pub alumni_approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, display_name: Option<String>, trial_ends_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            display_name,
            plan_type: PLAN_TRIAL.to_string(),
            subscription_type: None,
            trial_ends_at,
            paid_at: None,
            next_renewal_at: None,
            is_super_user: false,
            is_alumni: false,
            alumni_batch_number: None,
            alumni_approved_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_trial(&self) -> bool {
        self.plan_type == PLAN_TRIAL
    }
}

/// List-view projection: the stored record plus the per-request derived
/// engagement fields. Both are `None` for super users.
#[derive(Debug, Serialize, Clone)]
pub struct UserSummary {
    #[serde(flatten)]
    pub user: User,
    pub engagement_score: Option<u32>,
    pub churn_risk: Option<ChurnRisk>,
}
