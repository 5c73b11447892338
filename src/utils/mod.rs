pub mod auth;
pub mod cookie;
pub mod error;
pub mod jwt;
pub mod logging;
pub mod password;
pub mod response;

pub use response::BaseResponse;
pub use response::ErrorResponse;
