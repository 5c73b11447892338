use axum::{extract::State, Json};
use validator::Validate;

use super::dto::{LocationCreateRequest, LocationResponse};
use super::service::LocationService;
use crate::state::AppState;
use crate::utils::auth::{assert_admin, load_current_member, AuthUser};
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

/// 장소 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "조회 성공")),
    tag = "Location"
)]
pub async fn list_locations(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<LocationResponse>>>, AppError> {
    let locations = LocationService::get_active_locations(&state).await?;

    Ok(Json(BaseResponse::success(locations)))
}

/// 장소 생성 API (관리자 전용)
#[utoipa::path(
    post,
    path = "/api/v1/locations",
    request_body = LocationCreateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "생성 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Location"
)]
pub async fn create_location(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<LocationCreateRequest>,
) -> Result<Json<BaseResponse<LocationResponse>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_admin(&actor)?;

    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let created = LocationService::create_location(&state, req).await?;

    Ok(Json(BaseResponse::success(created)))
}
