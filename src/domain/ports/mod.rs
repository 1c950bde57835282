use crate::domain::models::{
    activity::{ActivityCounts, ActivityEvent, UserStats},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Fields a bulk lifecycle action may touch. `None` leaves the stored value
/// untouched; the repository issues a partial UPDATE.
#[derive(Debug, Clone, Default)]
pub struct UserLifecycleUpdate {
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub is_alumni: Option<bool>,
    pub alumni_approved_at: Option<DateTime<Utc>>,
}

impl UserLifecycleUpdate {
    pub fn is_empty(&self) -> bool {
        self.trial_ends_at.is_none() && self.is_alumni.is_none() && self.alumni_approved_at.is_none()
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self, plan_type: Option<&str>) -> Result<Vec<User>, AppError>;
    async fn update_lifecycle(&self, id: &str, update: &UserLifecycleUpdate) -> Result<User, AppError>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn record(&self, event: &ActivityEvent) -> Result<(), AppError>;
    async fn counts_since(&self, user_id: &str, since: DateTime<Utc>) -> Result<ActivityCounts, AppError>;
    async fn cumulative_stats(&self, user_id: &str) -> Result<UserStats, AppError>;
    async fn recent_events(&self, user_id: &str, limit: i64) -> Result<Vec<ActivityEvent>, AppError>;
}

/// Single source of truth for "now". All trial math and approval timestamps go
/// through this so tests can pin the clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
