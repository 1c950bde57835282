pub mod bulk;
pub mod health;
pub mod user;
