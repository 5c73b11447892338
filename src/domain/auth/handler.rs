use axum::http::HeaderMap;
use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use super::dto::{LoginRequest, LoginResponse, SuccessLoginResponse};
use super::service::AuthService;
use crate::domain::member::dto::MemberResponse;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::cookie::{
    clear_access_token_cookie, clear_refresh_token_cookie, create_access_token_cookie,
    create_refresh_token_cookie, read_cookie, set_cookie_header, REFRESH_TOKEN_COOKIE,
};
use crate::utils::error::AppError;
use crate::utils::jwt::encode_refresh_token;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

/// 로그인 API
///
/// loginId/password 검증 후 Access Token을 응답 본문과 HttpOnly 쿠키로 내려줍니다.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = SuccessLoginResponse),
        (status = 400, description = "요청 형식 오류", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let result = AuthService::login(&state, req).await?;

    let refresh_token = encode_refresh_token(
        result.user.member_id.to_string(),
        &state.config.jwt_secret,
        state.config.refresh_token_expiration,
    )?;

    let access_cookie = create_access_token_cookie(&result.token, state.config.jwt_expiration)?;
    let refresh_cookie =
        create_refresh_token_cookie(&refresh_token, state.config.refresh_token_expiration)?;

    let mut response = Json(BaseResponse::<LoginResponse>::success(result)).into_response();
    response
        .headers_mut()
        .append(set_cookie_header(), access_cookie);
    response
        .headers_mut()
        .append(set_cookie_header(), refresh_cookie);

    Ok(response)
}

/// Access Token 재발급 API
///
/// refresh_token 쿠키를 검증하고 새 Access Token을 쿠키와 본문으로 내려줍니다.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    responses(
        (status = 200, description = "재발급 성공", body = SuccessLoginResponse),
        (status = 401, description = "유효하지 않은 Refresh Token", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let refresh_token = read_cookie(&headers, REFRESH_TOKEN_COOKIE)
        .ok_or_else(|| AppError::Unauthorized("로그인이 필요합니다.".to_string()))?;

    let result = AuthService::reissue(&state, &refresh_token).await?;

    let cookie = create_access_token_cookie(&result.token, state.config.jwt_expiration)?;
    let mut response = Json(BaseResponse::<LoginResponse>::success(result)).into_response();
    response.headers_mut().append(set_cookie_header(), cookie);

    Ok(response)
}

/// 로그아웃 API
///
/// 토큰 쿠키를 만료시킵니다.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 200, description = "로그아웃 성공")),
    tag = "Auth"
)]
pub async fn logout() -> Result<impl IntoResponse, AppError> {
    let mut response = Json(BaseResponse::<()>::success_with_message(
        None,
        "로그아웃되었습니다.",
    ))
    .into_response();

    response
        .headers_mut()
        .append(set_cookie_header(), clear_access_token_cookie()?);
    response
        .headers_mut()
        .append(set_cookie_header(), clear_refresh_token_cookie()?);

    Ok(response)
}

/// 현재 사용자 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<MemberResponse>>, AppError> {
    let member_id = user.member_id()?;
    let profile = AuthService::get_current_user(&state, member_id).await?;

    Ok(Json(BaseResponse::success(profile)))
}
