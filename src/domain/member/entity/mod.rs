pub mod activity_log;
pub mod member;
