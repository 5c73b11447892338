use chrono::{Datelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{info, warn};

use super::dto::{
    GradeUpdateRequest, MemberCreateRequest, MemberResponse, MemberStatsResponse,
    MemberUpdateRequest, PageResponse, PasswordUpdateRequest,
};
use super::entity::activity_log::{self, ActivityType};
use super::entity::member::{self, MemberGrade};
use crate::domain::application::entity::application::{self, ApplicationStatus};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::password::{generate_salt, hash_password, verify_password};

pub struct MemberService;

impl MemberService {
    /// 회원 생성
    pub async fn create_member(
        state: &AppState,
        req: MemberCreateRequest,
    ) -> Result<MemberResponse, AppError> {
        // 1. 로그인 ID 중복 확인
        let existing = member::Entity::find()
            .filter(member::Column::LoginId.eq(&req.login_id))
            .one(&state.db)
            .await?;

        if existing.is_some() {
            return Err(AppError::Conflict("이미 존재하는 로그인 ID입니다.".to_string()));
        }

        // 2. 출생년도 검증 (상한은 현재 연도라 validator로 고정할 수 없음)
        Self::validate_birth_year(req.birth_year)?;

        // 3. 비밀번호 솔트 + 다이제스트 생성
        let salt = generate_salt();
        let digest = hash_password(&req.password, &salt);

        let now = Utc::now().naive_utc();
        let model = member::ActiveModel {
            login_id: Set(req.login_id.clone()),
            password_hash: Set(digest),
            password_salt: Set(salt),
            name: Set(req.name),
            email: Set(req.email),
            phone_number: Set(req.phone_number),
            birth_year: Set(req.birth_year),
            grade: Set(req.grade.unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = model.insert(&state.db).await?;

        info!("Member {} created (login_id: {})", saved.member_id, saved.login_id);

        // 4. 활동 로그 기록
        ActivityLogService::log_activity(
            state,
            saved.member_id,
            &saved.login_id,
            ActivityType::MemberCreate,
            format!("새 회원 가입: {} ({})", saved.name, saved.login_id),
        )
        .await;

        Ok(MemberResponse::from(saved))
    }

    /// 회원 ID로 조회
    pub async fn get_member_by_id(
        state: &AppState,
        member_id: i64,
    ) -> Result<MemberResponse, AppError> {
        let member = Self::find_member(state, member_id).await?;
        Ok(MemberResponse::from(member))
    }

    /// 모든 회원 조회
    pub async fn get_all_members(state: &AppState) -> Result<Vec<MemberResponse>, AppError> {
        let members = member::Entity::find()
            .order_by_asc(member::Column::MemberId)
            .all(&state.db)
            .await?;

        Ok(members.into_iter().map(MemberResponse::from).collect())
    }

    /// 회원 목록 페이징 조회 (가입 순)
    pub async fn get_members_paged(
        state: &AppState,
        page: u64,
        size: u64,
    ) -> Result<PageResponse<MemberResponse>, AppError> {
        let size = size.clamp(1, 100);

        let paginator = member::Entity::find()
            .order_by_asc(member::Column::MemberId)
            .paginate(&state.db, size);

        let total_elements = paginator.num_items().await?;
        let total_pages = total_elements.div_ceil(size);
        let members = paginator.fetch_page(page).await?;

        Ok(PageResponse {
            content: members.into_iter().map(MemberResponse::from).collect(),
            page,
            size,
            total_elements,
            total_pages,
        })
    }

    /// 회원 검색 (이름/이메일/로그인 ID 부분 일치)
    ///
    /// 키워드가 비어 있으면 전체 목록을 반환합니다.
    pub async fn search_members(
        state: &AppState,
        keyword: Option<String>,
    ) -> Result<Vec<MemberResponse>, AppError> {
        let keyword = keyword.map(|k| k.trim().to_string()).unwrap_or_default();
        if keyword.is_empty() {
            return Self::get_all_members(state).await;
        }

        let members = member::Entity::find()
            .filter(
                Condition::any()
                    .add(member::Column::Name.contains(&keyword))
                    .add(member::Column::Email.contains(&keyword))
                    .add(member::Column::LoginId.contains(&keyword)),
            )
            .order_by_asc(member::Column::MemberId)
            .all(&state.db)
            .await?;

        Ok(members.into_iter().map(MemberResponse::from).collect())
    }

    /// 등급별 회원 조회
    pub async fn get_members_by_grade(
        state: &AppState,
        grade: MemberGrade,
    ) -> Result<Vec<MemberResponse>, AppError> {
        let members = member::Entity::find()
            .filter(member::Column::Grade.eq(grade))
            .order_by_asc(member::Column::MemberId)
            .all(&state.db)
            .await?;

        Ok(members.into_iter().map(MemberResponse::from).collect())
    }

    /// 회원 활동 통계 조회
    ///
    /// 신청 원장을 집계해 총 신청 수, 상태별 수, 참가율을 계산합니다.
    pub async fn get_member_stats(
        state: &AppState,
        member_id: i64,
    ) -> Result<MemberStatsResponse, AppError> {
        let member = Self::find_member(state, member_id).await?;

        let total = Self::count_applications(state, member_id, None).await?;
        let completed =
            Self::count_applications(state, member_id, Some(ApplicationStatus::Confirmed)).await?;
        let cancelled =
            Self::count_applications(state, member_id, Some(ApplicationStatus::Cancelled)).await?;
        let waiting =
            Self::count_applications(state, member_id, Some(ApplicationStatus::Waiting)).await?;

        Ok(MemberStatsResponse::build(
            total,
            completed,
            cancelled,
            waiting,
            member.created_at.date(),
        ))
    }

    async fn count_applications(
        state: &AppState,
        member_id: i64,
        status: Option<ApplicationStatus>,
    ) -> Result<i64, AppError> {
        let mut query = application::Entity::find()
            .filter(application::Column::MemberId.eq(member_id));
        if let Some(status) = status {
            query = query.filter(application::Column::Status.eq(status));
        }
        let count = query.count(&state.db).await?;
        Ok(count as i64)
    }

    /// 회원 정보 수정
    ///
    /// 등급 필드는 관리자 요청에서만 반영됩니다.
    pub async fn update_member(
        state: &AppState,
        member_id: i64,
        req: MemberUpdateRequest,
        actor_is_admin: bool,
    ) -> Result<MemberResponse, AppError> {
        let member = Self::find_member(state, member_id).await?;
        let login_id = member.login_id.clone();

        let mut model: member::ActiveModel = member.into();
        model.name = Set(req.name);
        model.email = Set(req.email);
        model.phone_number = Set(req.phone_number);
        if let Some(grade) = req.grade {
            if !actor_is_admin {
                return Err(AppError::Forbidden(
                    "등급 변경은 관리자만 가능합니다.".to_string(),
                ));
            }
            model.grade = Set(grade);
        }
        model.updated_at = Set(Utc::now().naive_utc());

        let saved = model.update(&state.db).await?;

        ActivityLogService::log_activity(
            state,
            saved.member_id,
            &login_id,
            ActivityType::MemberUpdate,
            format!("회원 정보 수정: {}", login_id),
        )
        .await;

        Ok(MemberResponse::from(saved))
    }

    /// 회원 등급 변경
    pub async fn update_grade(
        state: &AppState,
        member_id: i64,
        req: GradeUpdateRequest,
    ) -> Result<MemberResponse, AppError> {
        let member = Self::find_member(state, member_id).await?;
        let login_id = member.login_id.clone();
        let old_grade = member.grade;

        let mut model: member::ActiveModel = member.into();
        model.grade = Set(req.grade);
        model.updated_at = Set(Utc::now().naive_utc());

        let saved = model.update(&state.db).await?;

        info!(
            "Member {} grade changed: {:?} -> {:?}",
            member_id, old_grade, req.grade
        );

        ActivityLogService::log_activity(
            state,
            saved.member_id,
            &login_id,
            ActivityType::GradeUpgrade,
            format!(
                "등급 변경: {} {} -> {}",
                login_id,
                old_grade.description(),
                req.grade.description()
            ),
        )
        .await;

        Ok(MemberResponse::from(saved))
    }

    /// 비밀번호 변경 (현재 비밀번호 확인 후)
    pub async fn update_password(
        state: &AppState,
        member_id: i64,
        req: PasswordUpdateRequest,
    ) -> Result<(), AppError> {
        let member = Self::find_member(state, member_id).await?;

        if !verify_password(&req.current_password, &member.password_salt, &member.password_hash) {
            return Err(AppError::Unauthorized(
                "현재 비밀번호가 일치하지 않습니다.".to_string(),
            ));
        }

        let salt = generate_salt();
        let digest = hash_password(&req.new_password, &salt);

        let mut model: member::ActiveModel = member.into();
        model.password_salt = Set(salt);
        model.password_hash = Set(digest);
        model.updated_at = Set(Utc::now().naive_utc());
        model.update(&state.db).await?;

        Ok(())
    }

    /// 회원 삭제
    pub async fn delete_member(state: &AppState, member_id: i64) -> Result<(), AppError> {
        let member = Self::find_member(state, member_id).await?;
        let login_id = member.login_id.clone();

        member::Entity::delete_by_id(member_id)
            .exec(&state.db)
            .await?;

        info!("Member {} has been deleted", member_id);

        ActivityLogService::log_activity(
            state,
            member_id,
            &login_id,
            ActivityType::MemberDelete,
            format!("회원 삭제: {}", login_id),
        )
        .await;

        Ok(())
    }

    async fn find_member(state: &AppState, member_id: i64) -> Result<member::Model, AppError> {
        member::Entity::find_by_id(member_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::MemberNotFound("존재하지 않는 회원입니다.".to_string()))
    }

    fn validate_birth_year(birth_year: i32) -> Result<(), AppError> {
        let current_year = Utc::now().year();
        if birth_year > current_year {
            return Err(AppError::ValidationError(
                "출생년도는 현재 연도보다 클 수 없습니다.".to_string(),
            ));
        }
        if birth_year < 1900 {
            return Err(AppError::ValidationError(
                "출생년도는 1900년 이후여야 합니다.".to_string(),
            ));
        }
        Ok(())
    }
}

/// 활동 로그 서비스
///
/// 기록 실패는 본 작업을 실패시키지 않고 경고 로그만 남깁니다.
pub struct ActivityLogService;

impl ActivityLogService {
    pub async fn log_activity(
        state: &AppState,
        member_id: i64,
        member_login_id: &str,
        activity_type: ActivityType,
        description: String,
    ) {
        let model = activity_log::ActiveModel {
            member_id: Set(member_id),
            member_login_id: Set(member_login_id.to_string()),
            activity_type: Set(activity_type),
            description: Set(description),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        if let Err(e) = model.insert(&state.db).await {
            warn!("Failed to write activity log for member {}: {}", member_id, e);
        }
    }

    /// 회원별 활동 로그 조회 (최신순)
    pub async fn get_logs_by_member(
        state: &AppState,
        member_id: i64,
    ) -> Result<Vec<activity_log::Model>, AppError> {
        let logs = activity_log::Entity::find()
            .filter(activity_log::Column::MemberId.eq(member_id))
            .order_by_desc(activity_log::Column::CreatedAt)
            .all(&state.db)
            .await?;

        Ok(logs)
    }
}
