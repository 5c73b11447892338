//! 예약 승인 정책
//!
//! 신청 승인(확정/대기), 취소 시 승격, 상태 전이 규칙을 순수 함수로
//! 구현합니다. 서비스 계층이 트랜잭션 안에서 읽은 원장 스냅샷을 넘기고,
//! 결정 결과만 받아 DB에 반영합니다.

use chrono::NaiveDateTime;
use thiserror::Error;

use super::entity::application::ApplicationStatus;

/// 원장 스냅샷 항목
///
/// 한 예약에 속한 신청 행의 승인 판단에 필요한 필드만 담습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub id: i64,
    pub member_id: i64,
    pub status: ApplicationStatus,
    pub applied_at: NaiveDateTime,
    pub is_creator: bool,
}

/// 승인 정책 에러
#[derive(Debug, Error, PartialEq)]
pub enum AdmissionError {
    #[error("회원 ID {member_id}가 예약 ID {reservation_id}에 이미 신청했습니다.")]
    DuplicateApplication { member_id: i64, reservation_id: i64 },

    #[error("{0}")]
    InvalidOperation(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("{from:?} 상태에서 {to:?} 상태로 변경할 수 없습니다.")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("확정 인원({confirmed}명)보다 작은 정원({requested}명)으로 변경할 수 없습니다.")]
    CapacityViolation { confirmed: i32, requested: i32 },
}

/// 상태별 신청 수 집계: (확정 수, 대기 수)
pub fn count_by_status(entries: &[LedgerEntry]) -> (i32, i32) {
    let confirmed = entries
        .iter()
        .filter(|e| e.status == ApplicationStatus::Confirmed)
        .count() as i32;
    let waiting = entries
        .iter()
        .filter(|e| e.status == ApplicationStatus::Waiting)
        .count() as i32;
    (confirmed, waiting)
}

/// 신규 신청 승인 판정
///
/// 1. 생성자 본인 신청 거부
/// 2. 활성(취소되지 않은) 신청 중복 거부
/// 3. 확정 수 < 정원이면 CONFIRMED, 아니면 WAITING
///
/// 취소된 신청 이력은 재신청을 막지 않습니다. 재신청은 새 행으로 추가되며
/// 대기 순서는 새 신청 시각을 따릅니다.
pub fn evaluate_admission(
    entries: &[LedgerEntry],
    member_id: i64,
    reservation_id: i64,
    creator_member_id: i64,
    max_capacity: i32,
) -> Result<ApplicationStatus, AdmissionError> {
    if member_id == creator_member_id {
        return Err(AdmissionError::InvalidOperation(
            "본인이 생성한 예약에는 신청할 수 없습니다.".to_string(),
        ));
    }

    let has_active = entries
        .iter()
        .any(|e| e.member_id == member_id && e.status.is_active());
    if has_active {
        return Err(AdmissionError::DuplicateApplication {
            member_id,
            reservation_id,
        });
    }

    let (confirmed, _) = count_by_status(entries);
    if confirmed < max_capacity {
        Ok(ApplicationStatus::Confirmed)
    } else {
        Ok(ApplicationStatus::Waiting)
    }
}

/// 승격 대상 선정: 가장 먼저 신청한 WAITING 항목
///
/// `applied_at` 오름차순, 동시각이면 신청 ID 오름차순으로 선착순을 정합니다.
pub fn next_in_line(entries: &[LedgerEntry]) -> Option<&LedgerEntry> {
    entries
        .iter()
        .filter(|e| e.status == ApplicationStatus::Waiting)
        .min_by(|a, b| a.applied_at.cmp(&b.applied_at).then(a.id.cmp(&b.id)))
}

/// 취소 가능 여부 검증
///
/// CONFIRMED/WAITING만 취소할 수 있습니다. 이미 취소된 신청의 재취소는
/// InvalidState로 거부됩니다 (재시도 호출이 이중 반영되지 않도록).
pub fn validate_cancellation(status: ApplicationStatus) -> Result<(), AdmissionError> {
    match status {
        ApplicationStatus::Confirmed | ApplicationStatus::Waiting => Ok(()),
        ApplicationStatus::Cancelled => Err(AdmissionError::InvalidState(
            "이미 취소된 신청입니다.".to_string(),
        )),
        ApplicationStatus::Pending => Err(AdmissionError::InvalidState(
            "아직 확정되지 않은 신청입니다.".to_string(),
        )),
    }
}

/// 상태 전이 검증
///
/// 허용되는 전이:
/// - PENDING -> CONFIRMED | WAITING (생성 시 판정)
/// - CONFIRMED -> CANCELLED (취소, 승격 트리거)
/// - WAITING -> CANCELLED (취소)
/// - WAITING -> CONFIRMED (승격)
///
/// CANCELLED는 종단 상태이며 나머지 전이는 모두 거부됩니다.
pub fn validate_transition(
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<(), AdmissionError> {
    use ApplicationStatus::*;

    let allowed = matches!(
        (from, to),
        (Pending, Confirmed)
            | (Pending, Waiting)
            | (Confirmed, Cancelled)
            | (Waiting, Cancelled)
            | (Waiting, Confirmed)
    );

    if allowed {
        Ok(())
    } else {
        Err(AdmissionError::InvalidTransition { from, to })
    }
}

/// 정원 변경 검증
///
/// 정원은 1명 이상이어야 하며, 현재 확정 인원 아래로 줄일 수 없습니다.
pub fn validate_capacity_change(
    confirmed_count: i32,
    new_max_capacity: i32,
) -> Result<(), AdmissionError> {
    if new_max_capacity < 1 {
        return Err(AdmissionError::InvalidOperation(
            "최대 인원은 1명 이상이어야 합니다.".to_string(),
        ));
    }
    if new_max_capacity < confirmed_count {
        return Err(AdmissionError::CapacityViolation {
            confirmed: confirmed_count,
            requested: new_max_capacity,
        });
    }
    Ok(())
}
