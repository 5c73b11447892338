use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::activity_log::{self, ActivityType};
use super::entity::member::{self, MemberGrade};

/// 회원 생성 요청 (관리자 전용)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreateRequest {
    #[validate(length(min = 4, max = 20, message = "로그인 ID는 4~20자여야 합니다."))]
    pub login_id: String,
    #[validate(length(min = 8, message = "비밀번호는 8자 이상이어야 합니다."))]
    pub password: String,
    #[validate(length(min = 1, max = 50, message = "이름을 입력해주세요."))]
    pub name: String,
    #[validate(email(message = "유효한 이메일 형식이 아닙니다."))]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    #[validate(range(min = 1900, message = "출생년도는 1900년 이후여야 합니다."))]
    pub birth_year: i32,
    pub grade: Option<MemberGrade>,
}

/// 회원 정보 수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdateRequest {
    #[validate(length(min = 1, max = 50, message = "이름을 입력해주세요."))]
    pub name: String,
    #[validate(email(message = "유효한 이메일 형식이 아닙니다."))]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// 등급 변경은 관리자만 가능
    pub grade: Option<MemberGrade>,
}

/// 등급 변경 요청 (관리자 전용)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeUpdateRequest {
    pub grade: MemberGrade,
}

/// 비밀번호 변경 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdateRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "비밀번호는 8자 이상이어야 합니다."))]
    pub new_password: String,
}

/// 회원 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub member_id: i64,
    pub login_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub birth_year: i32,
    pub grade: MemberGrade,
    pub grade_emoji: String,
    pub grade_description: String,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<member::Model> for MemberResponse {
    fn from(m: member::Model) -> Self {
        Self {
            member_id: m.member_id,
            login_id: m.login_id,
            name: m.name,
            email: m.email,
            phone_number: m.phone_number,
            birth_year: m.birth_year,
            grade: m.grade,
            grade_emoji: m.grade.emoji().to_string(),
            grade_description: m.grade.description().to_string(),
            is_admin: m.grade.is_admin(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// 회원 활동 통계 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberStatsResponse {
    /// 총 참가 신청 횟수 (취소 이력 포함)
    pub total_applications: i64,
    /// 확정된 예약 수
    pub completed_reservations: i64,
    /// 취소한 예약 수
    pub cancelled_reservations: i64,
    /// 현재 대기 중인 예약 수
    pub waiting_reservations: i64,
    /// 가입일
    pub join_date: NaiveDate,
    /// 참가율 (확정 / 총 신청 * 100)
    pub participation_rate: f64,
}

impl MemberStatsResponse {
    pub fn build(
        total: i64,
        completed: i64,
        cancelled: i64,
        waiting: i64,
        join_date: NaiveDate,
    ) -> Self {
        let participation_rate = if total > 0 {
            (completed as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Self {
            total_applications: total,
            completed_reservations: completed,
            cancelled_reservations: cancelled,
            waiting_reservations: waiting,
            join_date,
            participation_rate,
        }
    }
}

/// 회원 목록 페이징 조회 쿼리
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberPageParams {
    /// 페이지 번호 (0부터 시작)
    pub page: Option<u64>,
    /// 페이지 크기
    pub size: Option<u64>,
}

/// 회원 검색 쿼리
#[derive(Debug, Deserialize, ToSchema)]
pub struct MemberSearchParams {
    /// 이름/이메일/로그인 ID 검색 키워드
    pub keyword: Option<String>,
}

/// 페이징 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T: Serialize> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

/// 활동 로그 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogResponse {
    pub log_id: i64,
    pub member_id: i64,
    pub member_login_id: String,
    pub activity_type: ActivityType,
    pub description: String,
    pub created_at: NaiveDateTime,
}

impl From<activity_log::Model> for ActivityLogResponse {
    fn from(log: activity_log::Model) -> Self {
        Self {
            log_id: log.log_id,
            member_id: log.member_id,
            member_login_id: log.member_login_id,
            activity_type: log.activity_type,
            description: log.description,
            created_at: log.created_at,
        }
    }
}

/// 신청 목록 등에 포함되는 간단한 회원 정보
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub member_id: i64,
    pub name: String,
    pub grade_emoji: String,
    pub grade_description: String,
}

impl From<&member::Model> for MemberSummary {
    fn from(m: &member::Model) -> Self {
        Self {
            member_id: m.member_id,
            name: m.name.clone(),
            grade_emoji: m.grade.emoji().to_string(),
            grade_description: m.grade.description().to_string(),
        }
    }
}
