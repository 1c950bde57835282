use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const EVENT_LOGIN: &str = "login";
pub const EVENT_VIDEO_VIEW: &str = "video_view";
pub const EVENT_ARTICLE_VIEW: &str = "article_view";
pub const EVENT_SEARCH: &str = "search";
pub const EVENT_BOOKMARK_ADD: &str = "bookmark_add";
pub const EVENT_VIDEO_COMPLETE: &str = "video_complete";

/// Per-user event counts over a trailing window. The event log is assumed
/// already deduplicated; these are raw counts, not scores.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    pub login: i64,
    pub video_view: i64,
    pub article_view: i64,
    pub search: i64,
    pub bookmark_add: i64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ActivityEvent {
    pub id: String,
    pub user_id: String,
    pub event_type: String,
    pub detail: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn new(user_id: String, event_type: &str, detail: Option<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            event_type: event_type.to_string(),
            detail,
            occurred_at,
        }
    }
}

/// Cumulative (all-time) per-user counters shown on the detail page.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UserStats {
    pub bookmark_count: i64,
    pub watch_history_count: i64,
    pub completed_video_count: i64,
}
