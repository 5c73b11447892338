pub mod application;
pub mod auth;
pub mod location;
pub mod member;
pub mod reservation;
