use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use super::dto::{
    ApplicationApplyResponse, ApplicationCreateRequest, ApplicationResponse, StatusUpdateRequest,
};
use super::service::ApplicationService;
use crate::state::AppState;
use crate::utils::auth::{assert_admin, load_current_member, AuthUser};
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

/// 예약 신청 API
///
/// 정원에 자리가 있으면 확정, 가득 찼으면 대기로 접수됩니다.
#[utoipa::path(
    post,
    path = "/api/v1/applications",
    request_body = ApplicationCreateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "신청 성공"),
        (status = 400, description = "생성자 본인 신청", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 예약", body = ErrorResponse),
        (status = 409, description = "중복 신청", body = ErrorResponse)
    ),
    tag = "Application"
)]
pub async fn apply(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<ApplicationCreateRequest>,
) -> Result<Json<BaseResponse<ApplicationApplyResponse>>, AppError> {
    let member_id = user.member_id()?;

    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let result = ApplicationService::apply(&state, member_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 예약 신청 취소 API
///
/// 확정 신청 취소 시 가장 먼저 신청한 대기자가 자동 승격됩니다.
#[utoipa::path(
    delete,
    path = "/api/v1/applications/{id}",
    params(("id" = i64, Path, description = "신청 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "취소 성공"),
        (status = 400, description = "이미 취소된 신청", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 신청", body = ErrorResponse)
    ),
    tag = "Application"
)]
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(application_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;

    ApplicationService::cancel(&state, application_id, &actor).await?;

    Ok(Json(BaseResponse::success_with_message(
        None,
        "예약 신청이 취소되었습니다.",
    )))
}

/// 신청 상태 변경 API (관리자 전용)
#[utoipa::path(
    put,
    path = "/api/v1/applications/{id}/status",
    params(("id" = i64, Path, description = "신청 ID")),
    request_body = StatusUpdateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 성공"),
        (status = 400, description = "허용되지 않는 상태 전이", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 신청", body = ErrorResponse)
    ),
    tag = "Application"
)]
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(application_id): Path<i64>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<BaseResponse<ApplicationResponse>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_admin(&actor)?;

    let updated = ApplicationService::update_status(&state, application_id, req.status).await?;

    Ok(Json(BaseResponse::success(updated)))
}
