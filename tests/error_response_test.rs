//! 에러/응답 포맷 테스트
//!
//! 테스트 대상:
//! - AppError의 에러 코드와 HTTP 상태 매핑
//! - 승인 정책 에러 변환
//! - BaseResponse / ErrorResponse 직렬화 (camelCase)

use axum::http::StatusCode;
use reservation_server::domain::application::admission::AdmissionError;
use reservation_server::domain::application::entity::application::ApplicationStatus;
use reservation_server::utils::error::AppError;
use reservation_server::utils::response::{BaseResponse, ErrorResponse};

// ============== 에러 매핑 테스트 ==============

#[test]
fn should_map_domain_errors_to_codes_and_statuses() {
    // Arrange
    let cases: Vec<(AppError, &str, StatusCode)> = vec![
        (
            AppError::MemberNotFound("x".into()),
            "MEMBER404",
            StatusCode::NOT_FOUND,
        ),
        (
            AppError::ReservationNotFound("x".into()),
            "RESERVATION404",
            StatusCode::NOT_FOUND,
        ),
        (
            AppError::ApplicationNotFound("x".into()),
            "APPLICATION404",
            StatusCode::NOT_FOUND,
        ),
        (
            AppError::DuplicateApplication("x".into()),
            "APPLICATION409",
            StatusCode::CONFLICT,
        ),
        (
            AppError::InvalidOperation("x".into()),
            "APPLICATION400",
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::CapacityViolation("x".into()),
            "RESERVATION400",
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::Unauthorized("x".into()),
            "AUTH401",
            StatusCode::UNAUTHORIZED,
        ),
        (
            AppError::Forbidden("x".into()),
            "AUTH403",
            StatusCode::FORBIDDEN,
        ),
    ];

    // Act & Assert
    for (err, code, status) in cases {
        assert_eq!(err.error_code(), code);
        assert_eq!(err.status_code(), status);
    }
}

#[test]
fn should_convert_admission_errors_into_app_errors() {
    // Arrange
    let duplicate = AdmissionError::DuplicateApplication {
        member_id: 10,
        reservation_id: 1,
    };
    let transition = AdmissionError::InvalidTransition {
        from: ApplicationStatus::Cancelled,
        to: ApplicationStatus::Confirmed,
    };

    // Act
    let duplicate: AppError = duplicate.into();
    let transition: AppError = transition.into();

    // Assert
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);
    assert_eq!(transition.status_code(), StatusCode::BAD_REQUEST);
}

#[test]
fn should_keep_admission_error_message_through_conversion() {
    // Arrange
    let err = AdmissionError::CapacityViolation {
        confirmed: 3,
        requested: 2,
    };
    let expected = err.to_string();

    // Act
    let app_err: AppError = err.into();

    // Assert
    assert_eq!(app_err.message(), expected);
}

// ============== 응답 포맷 테스트 ==============

#[test]
fn should_serialize_success_envelope_in_camel_case() {
    // Arrange
    let response = BaseResponse::success(vec![1, 2, 3]);

    // Act
    let json = serde_json::to_value(&response).unwrap();

    // Assert
    assert_eq!(json["isSuccess"], true);
    assert_eq!(json["code"], "COMMON200");
    assert_eq!(json["message"], "성공입니다.");
    assert_eq!(json["result"], serde_json::json!([1, 2, 3]));
}

#[test]
fn should_serialize_message_only_success_with_null_result() {
    // Arrange
    let response = BaseResponse::<()>::success_with_message(None, "예약이 삭제되었습니다.");

    // Act
    let json = serde_json::to_value(&response).unwrap();

    // Assert
    assert_eq!(json["isSuccess"], true);
    assert_eq!(json["message"], "예약이 삭제되었습니다.");
    assert!(json["result"].is_null());
}

#[test]
fn should_serialize_error_envelope_in_camel_case() {
    // Arrange
    let response = ErrorResponse::new("APPLICATION409", "이미 신청한 예약입니다.");

    // Act
    let json = serde_json::to_value(&response).unwrap();

    // Assert
    assert_eq!(json["isSuccess"], false);
    assert_eq!(json["code"], "APPLICATION409");
    assert_eq!(json["message"], "이미 신청한 예약입니다.");
    assert!(json["result"].is_null());
}
