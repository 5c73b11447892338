use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use super::dto::{
    ApplicantResponse, ReservationCreateRequest, ReservationQueryParams, ReservationResponse,
};
use super::service::ReservationService;
use crate::state::AppState;
use crate::utils::auth::{load_current_member, AuthUser};
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

/// 예약 생성 API
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    request_body = ReservationCreateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "생성 성공"),
        (status = 400, description = "검증 실패", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<ReservationCreateRequest>,
) -> Result<Json<BaseResponse<ReservationResponse>>, AppError> {
    let member_id = user.member_id()?;

    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let created = ReservationService::create_reservation(&state, member_id, req).await?;

    Ok(Json(BaseResponse::success(created)))
}

/// 예약 목록 조회 API (날짜 오름차순, ?date= 필터 지원)
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    params(("date" = Option<String>, Query, description = "YYYY-MM-DD 필터")),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "조회 성공")),
    tag = "Reservation"
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ReservationQueryParams>,
) -> Result<Json<BaseResponse<Vec<ReservationResponse>>>, AppError> {
    let reservations = ReservationService::get_reservations(&state, params.date).await?;

    Ok(Json(BaseResponse::success(reservations)))
}

/// 신청 가능한 예약 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/reservations/available",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "조회 성공")),
    tag = "Reservation"
)]
pub async fn list_available_reservations(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<ReservationResponse>>>, AppError> {
    let reservations = ReservationService::get_available_reservations(&state).await?;

    Ok(Json(BaseResponse::success(reservations)))
}

/// 예약 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    params(("id" = i64, Path, description = "예약 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공"),
        (status = 404, description = "존재하지 않는 예약", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<BaseResponse<ReservationResponse>>, AppError> {
    let reservation = ReservationService::get_reservation_by_id(&state, reservation_id).await?;

    Ok(Json(BaseResponse::success(reservation)))
}

/// 예약 수정 API (생성자 또는 관리자)
///
/// 정원을 현재 확정 인원보다 작게 줄이는 요청은 거부됩니다.
#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}",
    params(("id" = i64, Path, description = "예약 ID")),
    request_body = ReservationCreateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공"),
        (status = 400, description = "정원 위반", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 예약", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(reservation_id): Path<i64>,
    Json(req): Json<ReservationCreateRequest>,
) -> Result<Json<BaseResponse<ReservationResponse>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;

    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let updated =
        ReservationService::update_reservation(&state, reservation_id, &actor, req).await?;

    Ok(Json(BaseResponse::success(updated)))
}

/// 예약 삭제 API (생성자 또는 관리자)
#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    params(("id" = i64, Path, description = "예약 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 예약", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;

    ReservationService::delete_reservation(&state, reservation_id, &actor).await?;

    Ok(Json(BaseResponse::success_with_message(
        None,
        "예약이 삭제되었습니다.",
    )))
}

/// 예약 신청자 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}/applicants",
    params(("id" = i64, Path, description = "예약 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공"),
        (status = 404, description = "존재하지 않는 예약", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn list_applicants(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<ApplicantResponse>>>, AppError> {
    let applicants = ReservationService::get_applicants(&state, reservation_id).await?;

    Ok(Json(BaseResponse::success(applicants)))
}
