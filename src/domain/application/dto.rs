use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::application::{self, ApplicationStatus};
use crate::domain::member::dto::MemberSummary;
use crate::domain::reservation::dto::ReservationSummary;

/// 예약 신청 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCreateRequest {
    pub reservation_id: i64,
    #[validate(length(max = 255, message = "메모는 255자 이내여야 합니다."))]
    pub note: Option<String>,
}

/// 신청 상태 변경 요청 (관리자 전용)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: ApplicationStatus,
}

/// 신청 직후 돌려주는 예약 집계 스냅샷
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSnapshot {
    pub reservation_id: i64,
    pub max_capacity: i32,
    pub confirmed_count: i32,
    pub waiting_count: i32,
    pub available_slots: i32,
    pub is_fully_booked: bool,
}

/// 신청 처리 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationApplyResponse {
    pub application_id: i64,
    pub status: ApplicationStatus,
    pub status_description: String,
    pub note: Option<String>,
    pub applied_at: NaiveDateTime,
    pub reservation: ReservationSnapshot,
}

/// 신청 조회 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub application_id: i64,
    pub member: MemberSummary,
    pub reservation: ReservationSummary,
    pub status: ApplicationStatus,
    pub status_description: String,
    pub note: Option<String>,
    pub is_creator: bool,
    pub applied_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ApplicationResponse {
    pub fn build(
        app: &application::Model,
        member: MemberSummary,
        reservation: ReservationSummary,
    ) -> Self {
        Self {
            application_id: app.application_id,
            member,
            reservation,
            status: app.status,
            status_description: app.status.description().to_string(),
            note: app.note.clone(),
            is_creator: app.is_creator,
            applied_at: app.applied_at,
            updated_at: app.updated_at,
        }
    }
}
