use axum::{
    async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts,
};
use sea_orm::EntityTrait;

use crate::domain::member::entity::member;
use crate::state::AppState;
use crate::utils::cookie::{read_cookie, ACCESS_TOKEN_COOKIE};
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_access_token, Claims};

/// 인증된 사용자 정보를 담는 Extractor
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// JWT Claims에서 회원 ID를 추출합니다.
    pub fn member_id(&self) -> Result<i64, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("유효하지 않은 사용자 ID입니다.".to_string()))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. Authorization 헤더에서 토큰 추출 시도
        let token = if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
            let auth_header_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("잘못된 헤더 형식입니다.".to_string()))?;

            if !auth_header_str.starts_with("Bearer ") {
                return Err(AppError::Unauthorized(
                    "토큰 형식이 올바르지 않습니다.".to_string(),
                ));
            }

            auth_header_str[7..].to_string()
        } else {
            // 2. 쿠키에서 토큰 추출 시도
            extract_token_from_cookie(parts)?
        };

        // 토큰 검증 및 디코딩 (access token만 허용)
        let claims = decode_access_token(&token, &state.config.jwt_secret)?;

        Ok(AuthUser(claims))
    }
}

/// 쿠키에서 access_token 추출
fn extract_token_from_cookie(parts: &Parts) -> Result<String, AppError> {
    read_cookie(&parts.headers, ACCESS_TOKEN_COOKIE)
        .ok_or_else(|| AppError::Unauthorized("로그인이 필요합니다.".to_string()))
}

// ============== 인가 정책 ==============
//
// 모든 핸들러/서비스가 공유하는 단일 인가 정책.
// 클라이언트 측 판단은 편의일 뿐이며 권한 검증은 항상 서버에서 수행한다.

/// 토큰의 회원 ID로 현재 회원을 조회합니다.
pub async fn load_current_member(
    state: &AppState,
    member_id: i64,
) -> Result<member::Model, AppError> {
    member::Entity::find_by_id(member_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::MemberNotFound("존재하지 않는 사용자입니다.".to_string()))
}

/// 관리자(ROOSTER) 권한 검증
pub fn assert_admin(actor: &member::Model) -> Result<(), AppError> {
    if !actor.grade.is_admin() {
        return Err(AppError::Forbidden("관리자 권한이 필요합니다.".to_string()));
    }
    Ok(())
}

/// 본인 또는 관리자만 허용
pub fn assert_self_or_admin(actor: &member::Model, target_member_id: i64) -> Result<(), AppError> {
    if actor.member_id != target_member_id && !actor.grade.is_admin() {
        return Err(AppError::Forbidden(
            "본인 또는 관리자만 접근할 수 있습니다.".to_string(),
        ));
    }
    Ok(())
}

/// 예약 수정/삭제 권한: 생성자 또는 관리자
pub fn assert_reservation_editable(
    actor: &member::Model,
    creator_member_id: i64,
) -> Result<(), AppError> {
    if actor.member_id != creator_member_id && !actor.grade.is_admin() {
        return Err(AppError::Forbidden(
            "수정/삭제 권한이 없습니다.".to_string(),
        ));
    }
    Ok(())
}
