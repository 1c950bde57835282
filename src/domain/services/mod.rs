pub mod engagement;
pub mod lifecycle;
pub mod user_detail;
