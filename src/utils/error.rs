use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::ErrorResponse;
use crate::domain::application::admission::AdmissionError;

/// 애플리케이션 전역 에러 타입
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    InternalError(String),
    ValidationError(String),
    JsonParseFailed(String),

    // 도메인 에러
    MemberNotFound(String),
    ReservationNotFound(String),
    ApplicationNotFound(String),
    DuplicateApplication(String),
    InvalidOperation(String),
    InvalidState(String),
    InvalidTransition(String),
    CapacityViolation(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::InternalError(msg) => msg.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("잘못된 요청 형식입니다: {}", msg),
            AppError::MemberNotFound(msg) => msg.clone(),
            AppError::ReservationNotFound(msg) => msg.clone(),
            AppError::ApplicationNotFound(msg) => msg.clone(),
            AppError::DuplicateApplication(msg) => msg.clone(),
            AppError::InvalidOperation(msg) => msg.clone(),
            AppError::InvalidState(msg) => msg.clone(),
            AppError::InvalidTransition(msg) => msg.clone(),
            AppError::CapacityViolation(msg) => msg.clone(),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::NotFound(_) => "COMMON404",
            AppError::Unauthorized(_) => "AUTH401",
            AppError::Forbidden(_) => "AUTH403",
            AppError::Conflict(_) => "COMMON409",
            AppError::InternalError(_) => "COMMON500",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::MemberNotFound(_) => "MEMBER404",
            AppError::ReservationNotFound(_) => "RESERVATION404",
            AppError::ApplicationNotFound(_) => "APPLICATION404",
            AppError::DuplicateApplication(_) => "APPLICATION409",
            AppError::InvalidOperation(_) => "APPLICATION400",
            AppError::InvalidState(_) => "APPLICATION400",
            AppError::InvalidTransition(_) => "APPLICATION400",
            AppError::CapacityViolation(_) => "RESERVATION400",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::MemberNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ReservationNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ApplicationNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateApplication(_) => StatusCode::CONFLICT,
            AppError::InvalidOperation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidState(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
            AppError::CapacityViolation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        // 에러 로깅
        match &self {
            AppError::InternalError(_) => {
                error!("Internal Server Error: {}", message);
            }
            _ => {
                error!("Error [{}]: {}", error_code, message);
            }
        }

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.to_string())
    }
}

/// 승인 정책 에러를 AppError로 변환
impl From<AdmissionError> for AppError {
    fn from(err: AdmissionError) -> Self {
        let msg = err.to_string();
        match err {
            AdmissionError::DuplicateApplication { .. } => AppError::DuplicateApplication(msg),
            AdmissionError::InvalidOperation(_) => AppError::InvalidOperation(msg),
            AdmissionError::InvalidState(_) => AppError::InvalidState(msg),
            AdmissionError::InvalidTransition { .. } => AppError::InvalidTransition(msg),
            AdmissionError::CapacityViolation { .. } => AppError::CapacityViolation(msg),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::InternalError(format!("DB Error: {}", err))
    }
}
