use std::sync::Arc;
use crate::domain::ports::{ActivityRepository, Clock, UserRepository};
use crate::domain::services::lifecycle::LifecycleService;
use crate::domain::services::user_detail::UserDetailService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub activity_repo: Arc<dyn ActivityRepository>,
    pub clock: Arc<dyn Clock>,
    pub lifecycle_service: Arc<LifecycleService>,
    pub user_detail_service: Arc<UserDetailService>,
}
