//! 예약 신청 API 테스트
//!
//! 테스트 대상:
//! - ApplicationCreateRequest 유효성 검증
//! - 신청 응답 직렬화 (camelCase)
//! - 상태 enum 와이어 포맷

use chrono::NaiveDate;
use reservation_server::domain::application::dto::{
    ApplicationApplyResponse, ApplicationCreateRequest, ReservationSnapshot, StatusUpdateRequest,
};
use reservation_server::domain::application::entity::application::ApplicationStatus;
use validator::Validate;

fn sample_snapshot() -> ReservationSnapshot {
    ReservationSnapshot {
        reservation_id: 7,
        max_capacity: 2,
        confirmed_count: 2,
        waiting_count: 1,
        available_slots: 0,
        is_fully_booked: true,
    }
}

// ============== 유효성 검증 테스트 ==============

#[test]
fn should_validate_request_without_note() {
    // Arrange
    let req = ApplicationCreateRequest {
        reservation_id: 1,
        note: None,
    };

    // Act & Assert
    assert!(req.validate().is_ok());
}

#[test]
fn should_fail_validation_when_note_exceeds_255_chars() {
    // Arrange
    let req = ApplicationCreateRequest {
        reservation_id: 1,
        note: Some("가".repeat(256)),
    };

    // Act
    let result = req.validate();

    // Assert
    assert!(result.is_err());
}

// ============== 역직렬화 테스트 ==============

#[test]
fn should_deserialize_create_request_from_camel_case() {
    // Arrange
    let json = r#"{"reservationId": 3, "note": "늦을 수 있어요"}"#;

    // Act
    let req: ApplicationCreateRequest = serde_json::from_str(json).unwrap();

    // Assert
    assert_eq!(req.reservation_id, 3);
    assert_eq!(req.note.as_deref(), Some("늦을 수 있어요"));
}

#[test]
fn should_deserialize_status_update_request() {
    // Arrange
    let json = r#"{"status": "CONFIRMED"}"#;

    // Act
    let req: StatusUpdateRequest = serde_json::from_str(json).unwrap();

    // Assert
    assert_eq!(req.status, ApplicationStatus::Confirmed);
}

#[test]
fn should_reject_unknown_status_value() {
    // Arrange
    let json = r#"{"status": "APPROVED"}"#;

    // Act
    let result: Result<StatusUpdateRequest, _> = serde_json::from_str(json);

    // Assert
    assert!(result.is_err());
}

// ============== 직렬화 테스트 ==============

#[test]
fn should_serialize_apply_response_in_camel_case() {
    // Arrange
    let response = ApplicationApplyResponse {
        application_id: 11,
        status: ApplicationStatus::Waiting,
        status_description: "대기".to_string(),
        note: None,
        applied_at: NaiveDate::from_ymd_opt(2026, 8, 26)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap(),
        reservation: sample_snapshot(),
    };

    // Act
    let json = serde_json::to_value(&response).unwrap();

    // Assert
    assert_eq!(json["applicationId"], 11);
    assert_eq!(json["status"], "WAITING");
    assert_eq!(json["statusDescription"], "대기");
    assert_eq!(json["reservation"]["maxCapacity"], 2);
    assert_eq!(json["reservation"]["isFullyBooked"], true);
    assert_eq!(json["reservation"]["availableSlots"], 0);
}

#[test]
fn should_serialize_status_enum_as_screaming_snake_case() {
    assert_eq!(
        serde_json::to_value(ApplicationStatus::Confirmed).unwrap(),
        "CONFIRMED"
    );
    assert_eq!(
        serde_json::to_value(ApplicationStatus::Cancelled).unwrap(),
        "CANCELLED"
    );
}

// ============== 상태 설명 테스트 ==============

#[test]
fn should_describe_each_status_in_korean() {
    assert_eq!(ApplicationStatus::Pending.description(), "접수");
    assert_eq!(ApplicationStatus::Confirmed.description(), "확정");
    assert_eq!(ApplicationStatus::Waiting.description(), "대기");
    assert_eq!(ApplicationStatus::Cancelled.description(), "취소");
}

#[test]
fn should_treat_only_cancelled_as_inactive() {
    assert!(ApplicationStatus::Pending.is_active());
    assert!(ApplicationStatus::Confirmed.is_active());
    assert!(ApplicationStatus::Waiting.is_active());
    assert!(!ApplicationStatus::Cancelled.is_active());
}
