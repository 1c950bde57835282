use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use crate::domain::models::activity::{ActivityCounts, ActivityEvent, UserStats};
use crate::domain::models::user::{User, UserSummary};
use crate::domain::ports::{ActivityRepository, Clock, UserRepository};
use crate::domain::services::engagement::{classify_churn_risk, engagement_score, ChurnRisk};
use crate::error::AppError;

const SHORT_WINDOW_DAYS: i64 = 7;
const LONG_WINDOW_DAYS: i64 = 30;
const RECENT_FEED_LIMIT: i64 = 20;

/// Everything the admin detail page shows for one user. Read-only aggregate;
/// score and risk are recomputed per request, never stored.
#[derive(Debug, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub engagement_score: Option<u32>,
    pub churn_risk: Option<ChurnRisk>,
    pub stats: UserStats,
    pub activity_7d: ActivityCounts,
    pub activity_30d: ActivityCounts,
    pub recent_activity: Vec<ActivityEvent>,
}

pub struct UserDetailService {
    user_repo: Arc<dyn UserRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
    clock: Arc<dyn Clock>,
}

impl UserDetailService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { user_repo, activity_repo, clock }
    }

    pub async fn fetch(&self, user_id: &str) -> Result<UserDetail, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let now = self.clock.now();
        let activity_7d = self
            .activity_repo
            .counts_since(user_id, now - Duration::days(SHORT_WINDOW_DAYS))
            .await?;
        let activity_30d = self
            .activity_repo
            .counts_since(user_id, now - Duration::days(LONG_WINDOW_DAYS))
            .await?;
        let stats = self.activity_repo.cumulative_stats(user_id).await?;
        let recent_activity = self
            .activity_repo
            .recent_events(user_id, RECENT_FEED_LIMIT)
            .await?;

        let (engagement_score, churn_risk) = derive_engagement(&user, &activity_7d);

        Ok(UserDetail {
            user,
            engagement_score,
            churn_risk,
            stats,
            activity_7d,
            activity_30d,
            recent_activity,
        })
    }

    /// User list with derived engagement, optionally narrowed to one risk
    /// tier (the dashboard's "high risk" KPI filter). Super users carry no
    /// risk and never match a risk filter.
    pub async fn list(
        &self,
        plan_type: Option<&str>,
        risk: Option<ChurnRisk>,
    ) -> Result<Vec<UserSummary>, AppError> {
        let users = self.user_repo.list(plan_type).await?;
        let since = self.clock.now() - Duration::days(SHORT_WINDOW_DAYS);

        let mut summaries = Vec::with_capacity(users.len());
        for user in users {
            let (engagement_score, churn_risk) = if user.is_super_user {
                (None, None)
            } else {
                let counts = self.activity_repo.counts_since(&user.id, since).await?;
                derive_engagement(&user, &counts)
            };

            if let Some(wanted) = risk {
                if churn_risk != Some(wanted) {
                    continue;
                }
            }

            summaries.push(UserSummary { user, engagement_score, churn_risk });
        }
        Ok(summaries)
    }
}

fn derive_engagement(user: &User, counts: &ActivityCounts) -> (Option<u32>, Option<ChurnRisk>) {
    if user.is_super_user {
        (None, None)
    } else {
        let score = engagement_score(counts);
        (Some(score), Some(classify_churn_risk(score)))
    }
}
