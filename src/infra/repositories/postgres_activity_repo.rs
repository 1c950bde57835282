use crate::domain::models::activity::{
    ActivityCounts, ActivityEvent, UserStats, EVENT_ARTICLE_VIEW, EVENT_BOOKMARK_ADD, EVENT_LOGIN,
    EVENT_SEARCH, EVENT_VIDEO_COMPLETE, EVENT_VIDEO_VIEW,
};
use crate::domain::ports::ActivityRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresActivityRepo {
    pool: PgPool,
}

impl PostgresActivityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepo {
    async fn record(&self, event: &ActivityEvent) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO activity_events (id, user_id, event_type, detail, occurred_at) VALUES ($1, $2, $3, $4, $5)",
        )
            .bind(&event.id)
            .bind(&event.user_id)
            .bind(&event.event_type)
            .bind(&event.detail)
            .bind(event.occurred_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn counts_since(&self, user_id: &str, since: DateTime<Utc>) -> Result<ActivityCounts, AppError> {
        let (login, video_view, article_view, search, bookmark_add) =
            sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
                "SELECT \
                    COALESCE(SUM(CASE WHEN event_type = $1 THEN 1 ELSE 0 END), 0), \
                    COALESCE(SUM(CASE WHEN event_type = $2 THEN 1 ELSE 0 END), 0), \
                    COALESCE(SUM(CASE WHEN event_type = $3 THEN 1 ELSE 0 END), 0), \
                    COALESCE(SUM(CASE WHEN event_type = $4 THEN 1 ELSE 0 END), 0), \
                    COALESCE(SUM(CASE WHEN event_type = $5 THEN 1 ELSE 0 END), 0) \
                 FROM activity_events WHERE user_id = $6 AND occurred_at >= $7",
            )
                .bind(EVENT_LOGIN)
                .bind(EVENT_VIDEO_VIEW)
                .bind(EVENT_ARTICLE_VIEW)
                .bind(EVENT_SEARCH)
                .bind(EVENT_BOOKMARK_ADD)
                .bind(user_id)
                .bind(since)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(ActivityCounts { login, video_view, article_view, search, bookmark_add })
    }

    async fn cumulative_stats(&self, user_id: &str) -> Result<UserStats, AppError> {
        let (bookmark_count, watch_history_count, completed_video_count) =
            sqlx::query_as::<_, (i64, i64, i64)>(
                "SELECT \
                    COALESCE(SUM(CASE WHEN event_type = $1 THEN 1 ELSE 0 END), 0), \
                    COALESCE(SUM(CASE WHEN event_type = $2 THEN 1 ELSE 0 END), 0), \
                    COALESCE(SUM(CASE WHEN event_type = $3 THEN 1 ELSE 0 END), 0) \
                 FROM activity_events WHERE user_id = $4",
            )
                .bind(EVENT_BOOKMARK_ADD)
                .bind(EVENT_VIDEO_VIEW)
                .bind(EVENT_VIDEO_COMPLETE)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(UserStats { bookmark_count, watch_history_count, completed_video_count })
    }

    async fn recent_events(&self, user_id: &str, limit: i64) -> Result<Vec<ActivityEvent>, AppError> {
        sqlx::query_as::<_, ActivityEvent>(
            "SELECT id, user_id, event_type, detail, occurred_at FROM activity_events \
             WHERE user_id = $1 ORDER BY occurred_at DESC LIMIT $2",
        )
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
