use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::reservation;
use crate::domain::application::entity::application::ApplicationStatus;
use crate::domain::location::dto::LocationSummary;
use crate::domain::location::entity::location;

/// 예약 생성/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreateRequest {
    #[validate(length(min = 1, max = 100, message = "제목을 입력해주세요."))]
    pub title: String,
    pub description: Option<String>,
    #[validate(nested)]
    pub location: LocationInfo,
    #[validate(range(min = 1, message = "최대 인원은 1명 이상이어야 합니다."))]
    pub max_capacity: i32,
    /// YYYY-MM-DD 형식
    pub reservation_date: String,
    /// HH:MM 형식
    pub reservation_time: String,
}

/// 예약에 연결할 장소 정보 (이름+주소로 찾고 없으면 생성)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    #[validate(length(min = 1, max = 100, message = "장소 이름을 입력해주세요."))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "주소를 입력해주세요."))]
    pub address: String,
    pub url: Option<String>,
}

/// 예약 응답 (파생 집계 필드 포함)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: LocationSummary,
    pub max_capacity: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub confirmed_count: i32,
    pub waiting_count: i32,
    pub available_slots: i32,
    pub is_fully_booked: bool,
    pub creator_id: i64,
    pub creator_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ReservationResponse {
    pub fn build(
        r: &reservation::Model,
        loc: &location::Model,
        creator_name: Option<String>,
        confirmed_count: i32,
        waiting_count: i32,
    ) -> Self {
        Self {
            reservation_id: r.reservation_id,
            title: r.title.clone(),
            description: r.description.clone(),
            location: LocationSummary::from(loc),
            max_capacity: r.max_capacity,
            reservation_date: r.reservation_date,
            reservation_time: r.reservation_time,
            confirmed_count,
            waiting_count,
            available_slots: r.available_slots(confirmed_count),
            is_fully_booked: r.is_fully_booked(confirmed_count),
            creator_id: r.creator_member_id,
            creator_name,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// 신청 응답에 포함되는 간단한 예약 정보
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSummary {
    pub reservation_id: i64,
    pub title: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub max_capacity: i32,
}

impl From<&reservation::Model> for ReservationSummary {
    fn from(r: &reservation::Model) -> Self {
        Self {
            reservation_id: r.reservation_id,
            title: r.title.clone(),
            reservation_date: r.reservation_date,
            reservation_time: r.reservation_time,
            max_capacity: r.max_capacity,
        }
    }
}

/// 예약 신청자 목록 항목
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantResponse {
    pub application_id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub member_login_id: String,
    pub status: ApplicationStatus,
    pub status_description: String,
    pub applied_at: NaiveDateTime,
    pub is_creator: bool,
}

/// 날짜 필터 쿼리
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReservationQueryParams {
    /// YYYY-MM-DD 형식
    pub date: Option<String>,
}
