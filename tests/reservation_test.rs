//! 예약 API 테스트
//!
//! 테스트 대상:
//! - ReservationCreateRequest 유효성 검증 (장소 중첩 검증 포함)
//! - ReservationResponse 직렬화와 파생 집계 필드
//! - 정원 마감 판정

use chrono::{NaiveDate, NaiveTime};
use reservation_server::domain::location::entity::location;
use reservation_server::domain::reservation::dto::{
    LocationInfo, ReservationCreateRequest, ReservationResponse,
};
use reservation_server::domain::reservation::entity::reservation;
use validator::Validate;

fn valid_request() -> ReservationCreateRequest {
    ReservationCreateRequest {
        title: "주간 스터디".to_string(),
        description: Some("8월 마지막 모임".to_string()),
        location: LocationInfo {
            name: "강남 스터디카페".to_string(),
            address: "서울시 강남구 테헤란로 1".to_string(),
            url: None,
        },
        max_capacity: 4,
        reservation_date: "2026-09-01".to_string(),
        reservation_time: "19:00".to_string(),
    }
}

fn sample_reservation(max_capacity: i32) -> reservation::Model {
    let now = NaiveDate::from_ymd_opt(2026, 8, 20)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    reservation::Model {
        reservation_id: 1,
        creator_member_id: 99,
        title: "주간 스터디".to_string(),
        description: None,
        location_id: 5,
        max_capacity,
        reservation_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        reservation_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        created_at: now,
        updated_at: now,
    }
}

fn sample_location() -> location::Model {
    let now = NaiveDate::from_ymd_opt(2026, 8, 20)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    location::Model {
        location_id: 5,
        name: "강남 스터디카페".to_string(),
        address: "서울시 강남구 테헤란로 1".to_string(),
        url: None,
        description: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

// ============== 유효성 검증 테스트 ==============

#[test]
fn should_validate_well_formed_request() {
    assert!(valid_request().validate().is_ok());
}

#[test]
fn should_fail_validation_with_empty_title() {
    // Arrange
    let mut req = valid_request();
    req.title = "".to_string();

    // Act & Assert
    assert!(req.validate().is_err());
}

#[test]
fn should_fail_validation_with_zero_capacity() {
    // Arrange
    let mut req = valid_request();
    req.max_capacity = 0;

    // Act & Assert
    assert!(req.validate().is_err());
}

#[test]
fn should_fail_validation_with_empty_location_name() {
    // Arrange: 중첩된 장소 정보도 함께 검증된다
    let mut req = valid_request();
    req.location.name = "".to_string();

    // Act & Assert
    assert!(req.validate().is_err());
}

#[test]
fn should_deserialize_request_from_camel_case() {
    // Arrange
    let json = r#"{
        "title": "주간 스터디",
        "location": {"name": "강남 스터디카페", "address": "서울시 강남구 테헤란로 1"},
        "maxCapacity": 4,
        "reservationDate": "2026-09-01",
        "reservationTime": "19:00"
    }"#;

    // Act
    let req: ReservationCreateRequest = serde_json::from_str(json).unwrap();

    // Assert
    assert_eq!(req.max_capacity, 4);
    assert_eq!(req.reservation_date, "2026-09-01");
    assert!(req.description.is_none());
}

// ============== 정원 판정 테스트 ==============

#[test]
fn should_report_fully_booked_at_capacity() {
    // Arrange
    let r = sample_reservation(2);

    // Act & Assert
    assert!(!r.is_fully_booked(1));
    assert!(r.is_fully_booked(2));
    assert!(r.is_fully_booked(3));
}

#[test]
fn should_clamp_available_slots_at_zero() {
    // Arrange
    let r = sample_reservation(2);

    // Act & Assert
    assert_eq!(r.available_slots(0), 2);
    assert_eq!(r.available_slots(2), 0);
    assert_eq!(r.available_slots(3), 0);
}

// ============== 직렬화 테스트 ==============

#[test]
fn should_serialize_response_with_derived_counts_in_camel_case() {
    // Arrange
    let response = ReservationResponse::build(
        &sample_reservation(3),
        &sample_location(),
        Some("홍길동".to_string()),
        2,
        1,
    );

    // Act
    let json = serde_json::to_value(&response).unwrap();

    // Assert
    assert_eq!(json["reservationId"], 1);
    assert_eq!(json["maxCapacity"], 3);
    assert_eq!(json["confirmedCount"], 2);
    assert_eq!(json["waitingCount"], 1);
    assert_eq!(json["availableSlots"], 1);
    assert_eq!(json["isFullyBooked"], false);
    assert_eq!(json["creatorName"], "홍길동");
    assert_eq!(json["location"]["name"], "강남 스터디카페");
}
