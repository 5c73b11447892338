//! 회원 API 테스트
//!
//! 테스트 대상:
//! - MemberCreateRequest 유효성 검증
//! - MemberGrade 레벨/권한/와이어 포맷
//! - MemberResponse / MemberStatsResponse / PageResponse 직렬화 (camelCase)
//! - 활동 통계 참가율 계산

use chrono::NaiveDate;
use reservation_server::domain::member::dto::{
    MemberCreateRequest, MemberResponse, MemberStatsResponse, PageResponse,
};
use reservation_server::domain::member::entity::member::{self, MemberGrade};
use validator::Validate;

fn valid_request() -> MemberCreateRequest {
    MemberCreateRequest {
        login_id: "chulsoo".to_string(),
        password: "secret1234".to_string(),
        name: "김철수".to_string(),
        email: Some("chulsoo@example.com".to_string()),
        phone_number: None,
        birth_year: 1998,
        grade: None,
    }
}

fn sample_member(grade: MemberGrade) -> member::Model {
    let now = NaiveDate::from_ymd_opt(2026, 8, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    member::Model {
        member_id: 1,
        login_id: "chulsoo".to_string(),
        password_hash: "hash".to_string(),
        password_salt: "salt".to_string(),
        name: "김철수".to_string(),
        email: None,
        phone_number: None,
        birth_year: 1998,
        grade,
        created_at: now,
        updated_at: now,
    }
}

// ============== 유효성 검증 테스트 ==============

#[test]
fn should_validate_well_formed_create_request() {
    assert!(valid_request().validate().is_ok());
}

#[test]
fn should_fail_validation_with_short_login_id() {
    // Arrange
    let mut req = valid_request();
    req.login_id = "ab".to_string();

    // Act & Assert
    assert!(req.validate().is_err());
}

#[test]
fn should_fail_validation_with_short_password() {
    // Arrange
    let mut req = valid_request();
    req.password = "1234".to_string();

    // Act & Assert
    assert!(req.validate().is_err());
}

#[test]
fn should_fail_validation_with_malformed_email() {
    // Arrange
    let mut req = valid_request();
    req.email = Some("not-an-email".to_string());

    // Act & Assert
    assert!(req.validate().is_err());
}

#[test]
fn should_fail_validation_with_birth_year_before_1900() {
    // Arrange
    let mut req = valid_request();
    req.birth_year = 1899;

    // Act & Assert
    assert!(req.validate().is_err());
}

// ============== 등급 테스트 ==============

#[test]
fn should_order_grades_by_level() {
    // Arrange
    let grades = [
        MemberGrade::Egg,
        MemberGrade::Hatching,
        MemberGrade::Chick,
        MemberGrade::YoungBird,
        MemberGrade::Rooster,
    ];

    // Act & Assert: 레벨은 1부터 5까지 단조 증가
    for (i, grade) in grades.iter().enumerate() {
        assert_eq!(grade.level(), i as i32 + 1);
    }
}

#[test]
fn should_grant_admin_only_to_rooster() {
    assert!(MemberGrade::Rooster.is_admin());
    assert!(!MemberGrade::Egg.is_admin());
    assert!(!MemberGrade::YoungBird.is_admin());
}

#[test]
fn should_default_new_members_to_egg() {
    assert_eq!(MemberGrade::default(), MemberGrade::Egg);
}

#[test]
fn should_pair_each_grade_with_emoji_and_description() {
    assert_eq!(MemberGrade::Egg.emoji(), "🥚");
    assert_eq!(MemberGrade::Egg.description(), "알");
    assert_eq!(MemberGrade::Rooster.emoji(), "🐔");
    assert_eq!(MemberGrade::Rooster.description(), "관리자");
}

#[test]
fn should_serialize_grade_as_screaming_snake_case() {
    assert_eq!(
        serde_json::to_value(MemberGrade::YoungBird).unwrap(),
        "YOUNG_BIRD"
    );
    assert_eq!(serde_json::to_value(MemberGrade::Egg).unwrap(), "EGG");
}

// ============== 직렬화 테스트 ==============

#[test]
fn should_serialize_member_response_in_camel_case() {
    // Arrange
    let response = MemberResponse::from(sample_member(MemberGrade::Chick));

    // Act
    let json = serde_json::to_value(&response).unwrap();

    // Assert
    assert_eq!(json["memberId"], 1);
    assert_eq!(json["loginId"], "chulsoo");
    assert_eq!(json["grade"], "CHICK");
    assert_eq!(json["gradeEmoji"], "🐥");
    assert_eq!(json["gradeDescription"], "병아리");
    assert_eq!(json["isAdmin"], false);
}

#[test]
fn should_not_leak_password_fields_in_member_response() {
    // Arrange
    let response = MemberResponse::from(sample_member(MemberGrade::Egg));

    // Act
    let json = serde_json::to_value(&response).unwrap();

    // Assert
    assert!(json.get("passwordHash").is_none());
    assert!(json.get("passwordSalt").is_none());
}

#[test]
fn should_serialize_page_response_in_camel_case() {
    // Arrange
    let page = PageResponse {
        content: vec![MemberResponse::from(sample_member(MemberGrade::Egg))],
        page: 0,
        size: 20,
        total_elements: 1,
        total_pages: 1,
    };

    // Act
    let json = serde_json::to_value(&page).unwrap();

    // Assert
    assert_eq!(json["totalElements"], 1);
    assert_eq!(json["totalPages"], 1);
    assert_eq!(json["content"][0]["loginId"], "chulsoo");
}

// ============== 활동 통계 테스트 ==============

#[test]
fn should_compute_participation_rate_from_confirmed_ratio() {
    // Arrange: 신청 4건 중 확정 2건
    let join_date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

    // Act
    let stats = MemberStatsResponse::build(4, 2, 1, 1, join_date);

    // Assert
    assert_eq!(stats.total_applications, 4);
    assert_eq!(stats.completed_reservations, 2);
    assert_eq!(stats.cancelled_reservations, 1);
    assert_eq!(stats.waiting_reservations, 1);
    assert_eq!(stats.participation_rate, 50.0);
}

#[test]
fn should_return_zero_rate_when_member_has_no_applications() {
    // Arrange
    let join_date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

    // Act
    let stats = MemberStatsResponse::build(0, 0, 0, 0, join_date);

    // Assert: 0으로 나누지 않고 0.0 반환
    assert_eq!(stats.participation_rate, 0.0);
}

#[test]
fn should_serialize_member_stats_in_camel_case() {
    // Arrange
    let join_date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let stats = MemberStatsResponse::build(3, 3, 0, 0, join_date);

    // Act
    let json = serde_json::to_value(&stats).unwrap();

    // Assert
    assert_eq!(json["totalApplications"], 3);
    assert_eq!(json["completedReservations"], 3);
    assert_eq!(json["cancelledReservations"], 0);
    assert_eq!(json["waitingReservations"], 0);
    assert_eq!(json["joinDate"], "2026-01-15");
    assert_eq!(json["participationRate"], 100.0);
}
