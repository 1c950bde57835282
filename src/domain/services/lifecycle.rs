use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::ports::{Clock, UserLifecycleUpdate, UserRepository};
use crate::error::AppError;

pub const ACTION_EXTEND_TRIAL: &str = "extend_trial";
pub const ACTION_SET_TRIAL_DAYS: &str = "set_trial_days";
pub const ACTION_APPROVE_ALUMNI: &str = "approve_alumni";

const EXTEND_TRIAL_DAYS: i64 = 30;
const ALUMNI_EXTENSION_DAYS: i64 = 90;
const MIN_TRIAL_DAYS: i64 = 1;
const MAX_TRIAL_DAYS: i64 = 120;

/// A validated bulk action. Parsing happens once, before any storage access,
/// so a malformed request never produces a partial mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    ExtendTrial,
    SetTrialDays(i64),
    ApproveAlumni,
}

impl BulkAction {
    pub fn parse(action: &str, value: Option<i64>) -> Result<Self, AppError> {
        match action {
            ACTION_EXTEND_TRIAL => Ok(BulkAction::ExtendTrial),
            ACTION_APPROVE_ALUMNI => Ok(BulkAction::ApproveAlumni),
            ACTION_SET_TRIAL_DAYS => {
                let days = value.ok_or_else(|| {
                    AppError::Validation("set_trial_days requires a day count value".into())
                })?;
                Ok(BulkAction::SetTrialDays(days.clamp(MIN_TRIAL_DAYS, MAX_TRIAL_DAYS)))
            }
            other => Err(AppError::Validation(format!("unsupported action: {}", other))),
        }
    }

    fn requires_trial_plan(&self) -> bool {
        matches!(self, BulkAction::ExtendTrial | BulkAction::SetTrialDays(_))
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct BulkFailure {
    pub user_id: String,
    pub reason: String,
}

/// Per-user outcome manifest. The batch is never atomic: one failing user
/// must not block the rest, and the admin UI renders "N succeeded, M failed"
/// from this.
#[derive(Debug, Serialize, Clone, Default)]
pub struct BulkActionReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<BulkFailure>,
}

pub struct LifecycleService {
    user_repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl LifecycleService {
    pub fn new(user_repo: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }

    /// Applies one admin action to a set of users. An empty id list is a
    /// no-op, not an error. Repeated invocation compounds the trial
    /// extensions (extend_trial twice adds 60 days); only approve_alumni's
    /// is_alumni flag is idempotent.
    pub async fn apply_bulk(
        &self,
        user_ids: &[String],
        action: &str,
        value: Option<i64>,
    ) -> Result<BulkActionReport, AppError> {
        let action = BulkAction::parse(action, value)?;

        let mut report = BulkActionReport::default();
        for user_id in user_ids {
            match self.apply_one(user_id, action).await {
                Ok(()) => report.succeeded.push(user_id.clone()),
                Err(e) => {
                    warn!("Bulk action failed for user {}: {}", user_id, e);
                    report.failed.push(BulkFailure {
                        user_id: user_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Bulk action {:?} finished: {} succeeded, {} failed",
            action,
            report.succeeded.len(),
            report.failed.len()
        );
        Ok(report)
    }

    async fn apply_one(&self, user_id: &str, action: BulkAction) -> Result<(), AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        // Selection UI never offers super users, but the guard lives here so a
        // hand-crafted request cannot mutate one either.
        if user.is_super_user {
            return Err(AppError::Validation("super user is excluded from bulk actions".into()));
        }

        if action.requires_trial_plan() && !user.is_trial() {
            return Err(AppError::Validation("not a trial user".into()));
        }

        let now = self.clock.now();
        let update = match action {
            BulkAction::ExtendTrial => UserLifecycleUpdate {
                trial_ends_at: Some(user.trial_ends_at + Duration::days(EXTEND_TRIAL_DAYS)),
                ..Default::default()
            },
            BulkAction::SetTrialDays(days) => UserLifecycleUpdate {
                trial_ends_at: Some(now + Duration::days(days)),
                ..Default::default()
            },
            BulkAction::ApproveAlumni => {
                let mut update = UserLifecycleUpdate {
                    trial_ends_at: Some(user.trial_ends_at + Duration::days(ALUMNI_EXTENSION_DAYS)),
                    ..Default::default()
                };
                // First approval stamps the record; re-approval keeps the
                // original timestamp but still extends the trial.
                if !user.is_alumni {
                    update.is_alumni = Some(true);
                    update.alumni_approved_at = Some(now);
                }
                update
            }
        };

        self.user_repo.update_lifecycle(user_id, &update).await?;
        Ok(())
    }
}
