use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use super::dto::{
    ActivityLogResponse, GradeUpdateRequest, MemberCreateRequest, MemberPageParams,
    MemberResponse, MemberSearchParams, MemberStatsResponse, MemberUpdateRequest, PageResponse,
    PasswordUpdateRequest,
};
use super::entity::member::MemberGrade;
use super::service::{ActivityLogService, MemberService};
use crate::domain::application::dto::ApplicationResponse;
use crate::domain::application::service::ApplicationService;
use crate::state::AppState;
use crate::utils::auth::{assert_admin, assert_self_or_admin, load_current_member, AuthUser};
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

/// 회원 생성 API (관리자 전용)
#[utoipa::path(
    post,
    path = "/api/v1/members",
    request_body = MemberCreateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "회원 생성 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 409, description = "로그인 ID 중복", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn create_member(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<MemberCreateRequest>,
) -> Result<Json<BaseResponse<MemberResponse>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_admin(&actor)?;

    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let created = MemberService::create_member(&state, req).await?;

    Ok(Json(BaseResponse::success(created)))
}

/// 회원 목록 조회 API (관리자 전용)
#[utoipa::path(
    get,
    path = "/api/v1/members",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn list_members(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<Vec<MemberResponse>>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_admin(&actor)?;

    let members = MemberService::get_all_members(&state).await?;

    Ok(Json(BaseResponse::success(members)))
}

/// 회원 목록 페이징 조회 API (관리자 전용)
#[utoipa::path(
    get,
    path = "/api/v1/members/paged",
    params(
        ("page" = Option<u64>, Query, description = "페이지 번호 (0부터 시작)"),
        ("size" = Option<u64>, Query, description = "페이지 크기 (기본 20, 최대 100)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn list_members_paged(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<MemberPageParams>,
) -> Result<Json<BaseResponse<PageResponse<MemberResponse>>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_admin(&actor)?;

    let page = params.page.unwrap_or(0);
    let size = params.size.unwrap_or(20);
    let result = MemberService::get_members_paged(&state, page, size).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 회원 검색 API (관리자 전용)
///
/// 이름, 이메일, 로그인 ID에 대해 부분 일치 검색합니다.
#[utoipa::path(
    get,
    path = "/api/v1/members/search",
    params(("keyword" = Option<String>, Query, description = "검색 키워드 (비우면 전체 조회)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "검색 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn search_members(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<MemberSearchParams>,
) -> Result<Json<BaseResponse<Vec<MemberResponse>>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_admin(&actor)?;

    let members = MemberService::search_members(&state, params.keyword).await?;

    Ok(Json(BaseResponse::success(members)))
}

/// 등급별 회원 조회 API (관리자 전용)
#[utoipa::path(
    get,
    path = "/api/v1/members/grade/{grade}",
    params(("grade" = MemberGrade, Path, description = "회원 등급")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn list_members_by_grade(
    State(state): State<AppState>,
    user: AuthUser,
    Path(grade): Path<MemberGrade>,
) -> Result<Json<BaseResponse<Vec<MemberResponse>>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_admin(&actor)?;

    let members = MemberService::get_members_by_grade(&state, grade).await?;

    Ok(Json(BaseResponse::success(members)))
}

/// 회원 단건 조회 API (본인 또는 관리자)
#[utoipa::path(
    get,
    path = "/api/v1/members/{id}",
    params(("id" = i64, Path, description = "회원 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공"),
        (status = 404, description = "존재하지 않는 회원", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn get_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path(member_id): Path<i64>,
) -> Result<Json<BaseResponse<MemberResponse>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_self_or_admin(&actor, member_id)?;

    let member = MemberService::get_member_by_id(&state, member_id).await?;

    Ok(Json(BaseResponse::success(member)))
}

/// 회원 정보 수정 API (본인 또는 관리자)
#[utoipa::path(
    put,
    path = "/api/v1/members/{id}",
    params(("id" = i64, Path, description = "회원 ID")),
    request_body = MemberUpdateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 회원", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn update_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path(member_id): Path<i64>,
    Json(req): Json<MemberUpdateRequest>,
) -> Result<Json<BaseResponse<MemberResponse>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_self_or_admin(&actor, member_id)?;

    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let updated =
        MemberService::update_member(&state, member_id, req, actor.grade.is_admin()).await?;

    Ok(Json(BaseResponse::success(updated)))
}

/// 회원 등급 변경 API (관리자 전용)
#[utoipa::path(
    put,
    path = "/api/v1/members/{id}/grade",
    params(("id" = i64, Path, description = "회원 ID")),
    request_body = GradeUpdateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "등급 변경 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 회원", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn update_grade(
    State(state): State<AppState>,
    user: AuthUser,
    Path(member_id): Path<i64>,
    Json(req): Json<GradeUpdateRequest>,
) -> Result<Json<BaseResponse<MemberResponse>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_admin(&actor)?;

    let updated = MemberService::update_grade(&state, member_id, req).await?;

    Ok(Json(BaseResponse::success(updated)))
}

/// 비밀번호 변경 API (본인 전용)
#[utoipa::path(
    put,
    path = "/api/v1/members/{id}/password",
    params(("id" = i64, Path, description = "회원 ID")),
    request_body = PasswordUpdateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 성공"),
        (status = 401, description = "현재 비밀번호 불일치", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn update_password(
    State(state): State<AppState>,
    user: AuthUser,
    Path(member_id): Path<i64>,
    Json(req): Json<PasswordUpdateRequest>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    // 비밀번호는 관리자도 대리 변경 불가
    if user.member_id()? != member_id {
        return Err(AppError::Forbidden(
            "본인만 비밀번호를 변경할 수 있습니다.".to_string(),
        ));
    }

    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    MemberService::update_password(&state, member_id, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        None,
        "비밀번호가 변경되었습니다.",
    )))
}

/// 회원 삭제 API (관리자 전용)
#[utoipa::path(
    delete,
    path = "/api/v1/members/{id}",
    params(("id" = i64, Path, description = "회원 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 회원", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn delete_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path(member_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_admin(&actor)?;

    MemberService::delete_member(&state, member_id).await?;

    Ok(Json(BaseResponse::success_with_message(
        None,
        "회원이 삭제되었습니다.",
    )))
}

/// 회원 활동 통계 조회 API (본인 또는 관리자)
///
/// 신청 원장을 집계해 총 신청 수, 상태별 수, 가입일, 참가율을 반환합니다.
#[utoipa::path(
    get,
    path = "/api/v1/members/{id}/stats",
    params(("id" = i64, Path, description = "회원 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공"),
        (status = 404, description = "존재하지 않는 회원", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn get_member_stats(
    State(state): State<AppState>,
    user: AuthUser,
    Path(member_id): Path<i64>,
) -> Result<Json<BaseResponse<MemberStatsResponse>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_self_or_admin(&actor, member_id)?;

    let stats = MemberService::get_member_stats(&state, member_id).await?;

    Ok(Json(BaseResponse::success(stats)))
}

/// 회원별 신청 목록 조회 API (본인 또는 관리자)
#[utoipa::path(
    get,
    path = "/api/v1/members/{id}/applications",
    params(("id" = i64, Path, description = "회원 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공"),
        (status = 404, description = "존재하지 않는 회원", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn list_member_applications(
    State(state): State<AppState>,
    user: AuthUser,
    Path(member_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<ApplicationResponse>>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_self_or_admin(&actor, member_id)?;

    let applications = ApplicationService::get_applications_by_member(&state, member_id).await?;

    Ok(Json(BaseResponse::success(applications)))
}

/// 회원별 활동 로그 조회 API (본인 또는 관리자, 최신순)
#[utoipa::path(
    get,
    path = "/api/v1/members/{id}/activities",
    params(("id" = i64, Path, description = "회원 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn list_member_activities(
    State(state): State<AppState>,
    user: AuthUser,
    Path(member_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<ActivityLogResponse>>>, AppError> {
    let actor = load_current_member(&state, user.member_id()?).await?;
    assert_self_or_admin(&actor, member_id)?;

    let logs = ActivityLogService::get_logs_by_member(&state, member_id).await?;
    let logs = logs.into_iter().map(ActivityLogResponse::from).collect();

    Ok(Json(BaseResponse::success(logs)))
}
