//! 예약 승인 정책 테스트
//!
//! 테스트 대상:
//! - 정원 기준 확정/대기 판정
//! - 취소 시 선착순 승격 대상 선정
//! - 상태 전이 규칙
//! - 정원 변경 검증

use chrono::{NaiveDate, NaiveDateTime};
use reservation_server::domain::application::admission::{
    count_by_status, evaluate_admission, next_in_line, validate_cancellation,
    validate_capacity_change, validate_transition, AdmissionError, LedgerEntry,
};
use reservation_server::domain::application::entity::application::ApplicationStatus;

fn at(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 26)
        .unwrap()
        .and_hms_opt(14, minute, 0)
        .unwrap()
}

fn entry(id: i64, member_id: i64, status: ApplicationStatus, minute: u32) -> LedgerEntry {
    LedgerEntry {
        id,
        member_id,
        status,
        applied_at: at(minute),
        is_creator: false,
    }
}

// ============== 승인 판정 테스트 ==============

#[test]
fn should_confirm_first_applicant_when_reservation_is_empty() {
    // Arrange
    let entries: Vec<LedgerEntry> = vec![];

    // Act
    let status = evaluate_admission(&entries, 10, 1, 99, 2).unwrap();

    // Assert
    assert_eq!(status, ApplicationStatus::Confirmed);
}

#[test]
fn should_confirm_up_to_capacity_then_wait() {
    // Arrange: 정원 2, 확정 1명
    let entries = vec![entry(1, 10, ApplicationStatus::Confirmed, 0)];

    // Act: 두 번째 신청은 확정, 세 번째부터 대기
    let second = evaluate_admission(&entries, 11, 1, 99, 2).unwrap();
    let full = vec![
        entry(1, 10, ApplicationStatus::Confirmed, 0),
        entry(2, 11, ApplicationStatus::Confirmed, 1),
    ];
    let third = evaluate_admission(&full, 12, 1, 99, 2).unwrap();

    // Assert
    assert_eq!(second, ApplicationStatus::Confirmed);
    assert_eq!(third, ApplicationStatus::Waiting);
}

#[test]
fn should_ignore_waiting_and_cancelled_rows_when_counting_capacity() {
    // Arrange: 정원 2, 확정 1 + 대기 3 + 취소 2
    let entries = vec![
        entry(1, 10, ApplicationStatus::Confirmed, 0),
        entry(2, 11, ApplicationStatus::Waiting, 1),
        entry(3, 12, ApplicationStatus::Waiting, 2),
        entry(4, 13, ApplicationStatus::Waiting, 3),
        entry(5, 14, ApplicationStatus::Cancelled, 4),
        entry(6, 15, ApplicationStatus::Cancelled, 5),
    ];

    // Act
    let status = evaluate_admission(&entries, 20, 1, 99, 2).unwrap();

    // Assert: 확정 수만 정원과 비교한다
    assert_eq!(status, ApplicationStatus::Confirmed);
}

#[test]
fn should_reject_creator_applying_to_own_reservation() {
    // Arrange & Act
    let result = evaluate_admission(&[], 99, 1, 99, 5);

    // Assert
    assert!(matches!(result, Err(AdmissionError::InvalidOperation(_))));
}

#[test]
fn should_reject_duplicate_application_while_active() {
    // Arrange: 확정/대기 모두 활성 신청으로 취급
    for status in [ApplicationStatus::Confirmed, ApplicationStatus::Waiting] {
        let entries = vec![entry(1, 10, status, 0)];

        // Act
        let result = evaluate_admission(&entries, 10, 1, 99, 5);

        // Assert
        assert_eq!(
            result,
            Err(AdmissionError::DuplicateApplication {
                member_id: 10,
                reservation_id: 1
            })
        );
    }
}

#[test]
fn should_allow_reapplication_after_cancellation_as_new_entry() {
    // Arrange: 같은 회원의 취소 이력 2건
    let entries = vec![
        entry(1, 10, ApplicationStatus::Cancelled, 0),
        entry(2, 10, ApplicationStatus::Cancelled, 5),
    ];

    // Act
    let status = evaluate_admission(&entries, 10, 1, 99, 1).unwrap();

    // Assert: 취소 이력은 재신청을 막지 않는다
    assert_eq!(status, ApplicationStatus::Confirmed);
}

// ============== 승격 시나리오 테스트 ==============

#[test]
fn should_promote_earliest_waiting_applicant_after_confirmed_cancellation() {
    // Arrange: 정원 2. A, B 확정 / C 대기 상태에서 A가 취소
    let ledger_after_cancel = vec![
        entry(1, 10, ApplicationStatus::Cancelled, 0), // A 취소됨
        entry(2, 11, ApplicationStatus::Confirmed, 1), // B
        entry(3, 12, ApplicationStatus::Waiting, 2),   // C
    ];

    // Act
    let next = next_in_line(&ledger_after_cancel).unwrap();

    // Assert: C가 승격 대상
    assert_eq!(next.id, 3);
    assert_eq!(next.member_id, 12);
    assert!(validate_transition(ApplicationStatus::Waiting, ApplicationStatus::Confirmed).is_ok());
}

#[test]
fn should_pick_waiting_applicant_in_fifo_order() {
    // Arrange: 대기 3명, 신청 시각 역순으로 나열
    let entries = vec![
        entry(5, 14, ApplicationStatus::Waiting, 30),
        entry(4, 13, ApplicationStatus::Waiting, 20),
        entry(3, 12, ApplicationStatus::Waiting, 10),
    ];

    // Act
    let next = next_in_line(&entries).unwrap();

    // Assert
    assert_eq!(next.id, 3);
}

#[test]
fn should_break_tie_by_application_id_when_applied_at_is_equal() {
    // Arrange: 같은 시각에 들어온 대기 2건
    let entries = vec![
        entry(8, 17, ApplicationStatus::Waiting, 10),
        entry(7, 16, ApplicationStatus::Waiting, 10),
    ];

    // Act
    let next = next_in_line(&entries).unwrap();

    // Assert: ID가 작은 쪽이 먼저
    assert_eq!(next.id, 7);
}

#[test]
fn should_return_none_when_no_waiting_applicant_exists() {
    // Arrange
    let entries = vec![
        entry(1, 10, ApplicationStatus::Confirmed, 0),
        entry(2, 11, ApplicationStatus::Cancelled, 1),
    ];

    // Act & Assert: 대기자가 없으면 승격 없이 자리가 남는다
    assert!(next_in_line(&entries).is_none());
}

#[test]
fn should_place_reapplicant_behind_existing_waiters() {
    // Arrange: C가 취소 후 재신청. D는 그 사이에 대기 중
    let entries = vec![
        entry(3, 12, ApplicationStatus::Cancelled, 10), // C 1차 신청(취소)
        entry(4, 13, ApplicationStatus::Waiting, 20),   // D
        entry(5, 12, ApplicationStatus::Waiting, 30),   // C 재신청
    ];

    // Act
    let next = next_in_line(&entries).unwrap();

    // Assert: 재신청은 새 시각 기준이므로 D가 먼저
    assert_eq!(next.member_id, 13);
}

// ============== 취소/전이 규칙 테스트 ==============

#[test]
fn should_allow_cancellation_of_confirmed_and_waiting() {
    assert!(validate_cancellation(ApplicationStatus::Confirmed).is_ok());
    assert!(validate_cancellation(ApplicationStatus::Waiting).is_ok());
}

#[test]
fn should_reject_double_cancellation() {
    // Act
    let result = validate_cancellation(ApplicationStatus::Cancelled);

    // Assert
    assert!(matches!(result, Err(AdmissionError::InvalidState(_))));
}

#[test]
fn should_reject_transitions_out_of_cancelled() {
    // Arrange & Act & Assert: CANCELLED는 종단 상태
    for to in [
        ApplicationStatus::Pending,
        ApplicationStatus::Confirmed,
        ApplicationStatus::Waiting,
    ] {
        let result = validate_transition(ApplicationStatus::Cancelled, to);
        assert_eq!(
            result,
            Err(AdmissionError::InvalidTransition {
                from: ApplicationStatus::Cancelled,
                to
            })
        );
    }
}

#[test]
fn should_reject_confirmed_to_waiting_demotion() {
    // Act
    let result = validate_transition(ApplicationStatus::Confirmed, ApplicationStatus::Waiting);

    // Assert
    assert!(result.is_err());
}

#[test]
fn should_allow_exactly_the_defined_transitions() {
    use ApplicationStatus::*;

    let all = [Pending, Confirmed, Waiting, Cancelled];
    let allowed = [
        (Pending, Confirmed),
        (Pending, Waiting),
        (Confirmed, Cancelled),
        (Waiting, Cancelled),
        (Waiting, Confirmed),
    ];

    for from in all {
        for to in all {
            let result = validate_transition(from, to);
            if allowed.contains(&(from, to)) {
                assert!(result.is_ok(), "{from:?} -> {to:?} 전이는 허용되어야 합니다");
            } else {
                assert!(result.is_err(), "{from:?} -> {to:?} 전이는 거부되어야 합니다");
            }
        }
    }
}

// ============== 정원 변경 테스트 ==============

#[test]
fn should_reject_capacity_below_one() {
    assert!(validate_capacity_change(0, 0).is_err());
}

#[test]
fn should_reject_capacity_below_confirmed_count() {
    // Act
    let result = validate_capacity_change(3, 2);

    // Assert
    assert_eq!(
        result,
        Err(AdmissionError::CapacityViolation {
            confirmed: 3,
            requested: 2
        })
    );
}

#[test]
fn should_allow_capacity_equal_to_confirmed_count() {
    assert!(validate_capacity_change(3, 3).is_ok());
    assert!(validate_capacity_change(3, 10).is_ok());
}

// ============== 집계 테스트 ==============

#[test]
fn should_count_confirmed_and_waiting_separately() {
    // Arrange
    let entries = vec![
        entry(1, 10, ApplicationStatus::Confirmed, 0),
        entry(2, 11, ApplicationStatus::Confirmed, 1),
        entry(3, 12, ApplicationStatus::Waiting, 2),
        entry(4, 13, ApplicationStatus::Cancelled, 3),
    ];

    // Act
    let (confirmed, waiting) = count_by_status(&entries);

    // Assert
    assert_eq!(confirmed, 2);
    assert_eq!(waiting, 1);
}
