pub mod sqlite_user_repo;
pub mod sqlite_activity_repo;
pub mod postgres_user_repo;
pub mod postgres_activity_repo;
