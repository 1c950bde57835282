use portal_backend::{
    api::router::create_router,
    config::Config,
    domain::models::activity::ActivityEvent,
    domain::models::user::User,
    domain::ports::{ActivityRepository, Clock, UserRepository},
    domain::services::lifecycle::LifecycleService,
    domain::services::user_detail::UserDetailService,
    infra::repositories::{
        sqlite_activity_repo::SqliteActivityRepo, sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Pinned "now" so every trial-day and window computation in a test is exact.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
        };

        let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepo::new(pool.clone()));
        let activity_repo: Arc<dyn ActivityRepository> = Arc::new(SqliteActivityRepo::new(pool.clone()));
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(test_now()));

        let state = Arc::new(AppState {
            config,
            user_repo: user_repo.clone(),
            activity_repo: activity_repo.clone(),
            clock: clock.clone(),
            lifecycle_service: Arc::new(LifecycleService::new(user_repo.clone(), clock.clone())),
            user_detail_service: Arc::new(UserDetailService::new(
                user_repo,
                activity_repo,
                clock,
            )),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn seed_user(&self, email: &str, trial_ends_at: DateTime<Utc>) -> User {
        let user = User::new(email.to_string(), Some("Test User".to_string()), trial_ends_at);
        self.state
            .user_repo
            .create(&user)
            .await
            .expect("Failed to seed user")
    }

    pub async fn seed_paid_user(&self, email: &str) -> User {
        let mut user = User::new(email.to_string(), None, test_now());
        user.plan_type = "paid".to_string();
        user.subscription_type = Some("monthly".to_string());
        user.paid_at = Some(test_now() - Duration::days(60));
        user.next_renewal_at = Some(test_now() + Duration::days(30));
        self.state
            .user_repo
            .create(&user)
            .await
            .expect("Failed to seed paid user")
    }

    pub async fn seed_super_user(&self, email: &str) -> User {
        let mut user = User::new(email.to_string(), Some("Staff".to_string()), test_now());
        user.is_super_user = true;
        self.state
            .user_repo
            .create(&user)
            .await
            .expect("Failed to seed super user")
    }

    pub async fn seed_events(&self, user_id: &str, event_type: &str, count: usize, occurred_at: DateTime<Utc>) {
        for _ in 0..count {
            let event = ActivityEvent::new(user_id.to_string(), event_type, None, occurred_at);
            self.state
                .activity_repo
                .record(&event)
                .await
                .expect("Failed to seed activity event");
        }
    }

    pub async fn reload_user(&self, id: &str) -> User {
        self.state
            .user_repo
            .find_by_id(id)
            .await
            .expect("Failed to reload user")
            .expect("User disappeared")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
