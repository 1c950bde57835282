use crate::domain::{models::user::User, ports::{UserLifecycleUpdate, UserRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

const USER_COLUMNS: &str = "id, email, display_name, plan_type, subscription_type, trial_ends_at, paid_at, next_renewal_at, is_super_user, is_alumni, alumni_batch_number, alumni_approved_at, created_at";

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING {USER_COLUMNS}"
        ))
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(&user.plan_type)
            .bind(&user.subscription_type)
            .bind(user.trial_ends_at)
            .bind(user.paid_at)
            .bind(user.next_renewal_at)
            .bind(user.is_super_user)
            .bind(user.is_alumni)
            .bind(user.alumni_batch_number)
            .bind(user.alumni_approved_at)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, plan_type: Option<&str>) -> Result<Vec<User>, AppError> {
        match plan_type {
            Some(plan) => sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE plan_type = $1 ORDER BY created_at DESC"
            ))
                .bind(plan)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            None => sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
            ))
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
        }
    }

    async fn update_lifecycle(&self, id: &str, update: &UserLifecycleUpdate) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                trial_ends_at = COALESCE($1, trial_ends_at), \
                is_alumni = COALESCE($2, is_alumni), \
                alumni_approved_at = COALESCE($3, alumni_approved_at) \
             WHERE id = $4 RETURNING {USER_COLUMNS}"
        ))
            .bind(update.trial_ends_at)
            .bind(update.is_alumni)
            .bind(update.alumni_approved_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres lifecycle update failed for user {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}
