use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;

use super::dto::{LoginRequest, LoginResponse};
use crate::domain::member::dto::MemberResponse;
use crate::domain::member::entity::activity_log::ActivityType;
use crate::domain::member::entity::member;
use crate::domain::member::service::ActivityLogService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_refresh_token, encode_token};
use crate::utils::password::verify_password;

pub struct AuthService;

impl AuthService {
    /// 로그인 처리
    ///
    /// loginId로 회원을 조회하고 솔트 다이제스트를 비교한 뒤
    /// Access Token을 발급합니다.
    pub async fn login(state: &AppState, req: LoginRequest) -> Result<LoginResponse, AppError> {
        // 1. 사용자 조회
        let found = member::Entity::find()
            .filter(member::Column::LoginId.eq(&req.login_id))
            .one(&state.db)
            .await?;

        let member = found
            .ok_or_else(|| AppError::Unauthorized("존재하지 않는 사용자입니다".to_string()))?;

        // 2. 비밀번호 검증
        if !verify_password(&req.password, &member.password_salt, &member.password_hash) {
            return Err(AppError::Unauthorized(
                "비밀번호가 일치하지 않습니다".to_string(),
            ));
        }

        // 3. JWT 토큰 생성
        let token = encode_token(
            member.member_id.to_string(),
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        info!("Member {} logged in", member.member_id);

        // 4. 활동 로그 기록 (실패해도 로그인은 성공 처리)
        ActivityLogService::log_activity(
            state,
            member.member_id,
            &member.login_id,
            ActivityType::Login,
            format!("로그인: {}", member.login_id),
        )
        .await;

        Ok(LoginResponse {
            token,
            user: MemberResponse::from(member),
        })
    }

    /// Access Token 재발급
    ///
    /// Refresh Token 쿠키를 검증하고 새 Access Token을 발급합니다.
    pub async fn reissue(state: &AppState, refresh_token: &str) -> Result<LoginResponse, AppError> {
        let claims = decode_refresh_token(refresh_token, &state.config.jwt_secret)?;

        let member_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("유효하지 않은 사용자 ID입니다.".to_string()))?;

        let member = member::Entity::find_by_id(member_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Unauthorized("존재하지 않는 사용자입니다".to_string()))?;

        let token = encode_token(
            member.member_id.to_string(),
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        info!("Member {} reissued access token", member.member_id);

        Ok(LoginResponse {
            token,
            user: MemberResponse::from(member),
        })
    }

    /// 현재 사용자 정보 조회
    pub async fn get_current_user(
        state: &AppState,
        member_id: i64,
    ) -> Result<MemberResponse, AppError> {
        let member = member::Entity::find_by_id(member_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::MemberNotFound("존재하지 않는 사용자입니다.".to_string()))?;

        Ok(MemberResponse::from(member))
    }
}
