use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use super::dto::{
    ApplicantResponse, ReservationCreateRequest, ReservationResponse, ReservationSummary,
};
use super::entity::reservation;
use crate::domain::application::admission;
use crate::domain::application::entity::application::{self, ApplicationStatus};
use crate::domain::application::service::ApplicationService;
use crate::domain::location::entity::location;
use crate::domain::location::service::LocationService;
use crate::domain::member::entity::activity_log::ActivityType;
use crate::domain::member::entity::member;
use crate::domain::member::service::ActivityLogService;
use crate::state::AppState;
use crate::utils::auth::assert_reservation_editable;
use crate::utils::error::AppError;

pub struct ReservationService;

impl ReservationService {
    /// 예약 생성
    ///
    /// 생성자는 자동으로 확정 신청됩니다 (is_creator 표시).
    pub async fn create_reservation(
        state: &AppState,
        creator_member_id: i64,
        req: ReservationCreateRequest,
    ) -> Result<ReservationResponse, AppError> {
        // 1. 날짜/시간 형식 및 과거 날짜 검증
        let reservation_date = Self::validate_and_parse_date(&req.reservation_date)?;
        let reservation_time = Self::validate_and_parse_time(&req.reservation_time)?;
        Self::validate_not_past(reservation_date)?;

        // 2. 생성자 회원 조회
        let creator = member::Entity::find_by_id(creator_member_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::MemberNotFound("존재하지 않는 회원입니다.".to_string()))?;

        // 3. 트랜잭션: 장소 확보 + 예약 생성 + 생성자 자동 신청
        let txn = state.db.begin().await?;

        let loc = LocationService::find_or_create(
            &txn,
            &req.location.name,
            &req.location.address,
            req.location.url.clone(),
        )
        .await?;

        let now = Utc::now().naive_utc();
        let reservation_model = reservation::ActiveModel {
            creator_member_id: Set(creator_member_id),
            title: Set(req.title.clone()),
            description: Set(req.description.clone()),
            location_id: Set(loc.location_id),
            max_capacity: Set(req.max_capacity),
            reservation_date: Set(reservation_date),
            reservation_time: Set(reservation_time),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = reservation_model.insert(&txn).await?;

        let creator_application = application::ActiveModel {
            member_id: Set(creator_member_id),
            reservation_id: Set(saved.reservation_id),
            status: Set(ApplicationStatus::Confirmed),
            note: Set(Some("예약 생성자 자동 신청".to_string())),
            is_creator: Set(true),
            applied_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        creator_application.insert(&txn).await?;

        txn.commit().await?;

        info!(
            "Reservation {} created by member {}",
            saved.reservation_id, creator_member_id
        );

        ActivityLogService::log_activity(
            state,
            creator_member_id,
            &creator.login_id,
            ActivityType::ReservationCreate,
            format!("예약 생성: {}", saved.title),
        )
        .await;

        // 생성 직후 확정 1명(생성자), 대기 0명
        Ok(ReservationResponse::build(
            &saved,
            &loc,
            Some(creator.name),
            1,
            0,
        ))
    }

    /// 예약 단건 조회
    pub async fn get_reservation_by_id(
        state: &AppState,
        reservation_id: i64,
    ) -> Result<ReservationResponse, AppError> {
        let found = Self::find_reservation(&state.db, reservation_id).await?;
        Self::to_response(state, found).await
    }

    /// 전체 예약 조회 (날짜 오름차순, 선택적 날짜 필터)
    pub async fn get_reservations(
        state: &AppState,
        date_filter: Option<String>,
    ) -> Result<Vec<ReservationResponse>, AppError> {
        let mut query = reservation::Entity::find()
            .order_by_asc(reservation::Column::ReservationDate)
            .order_by_asc(reservation::Column::ReservationTime);

        if let Some(raw) = date_filter {
            let date = Self::validate_and_parse_date(&raw)?;
            query = query.filter(reservation::Column::ReservationDate.eq(date));
        }

        let reservations = query.all(&state.db).await?;
        Self::to_responses(state, reservations).await
    }

    /// 신청 가능한 예약 조회 (오늘 이후, 정원 미달)
    pub async fn get_available_reservations(
        state: &AppState,
    ) -> Result<Vec<ReservationResponse>, AppError> {
        let today = Utc::now().date_naive();
        let reservations = reservation::Entity::find()
            .filter(reservation::Column::ReservationDate.gte(today))
            .order_by_asc(reservation::Column::ReservationDate)
            .order_by_asc(reservation::Column::ReservationTime)
            .all(&state.db)
            .await?;

        let responses = Self::to_responses(state, reservations).await?;
        Ok(responses.into_iter().filter(|r| !r.is_fully_booked).collect())
    }

    /// 예약 수정 (생성자 또는 관리자)
    ///
    /// 정원 축소는 확정 인원과의 비교가 원장 변경과 경합하므로
    /// 예약 락을 잡고 트랜잭션 안에서 검증/반영합니다.
    pub async fn update_reservation(
        state: &AppState,
        reservation_id: i64,
        actor: &member::Model,
        req: ReservationCreateRequest,
    ) -> Result<ReservationResponse, AppError> {
        let reservation_date = Self::validate_and_parse_date(&req.reservation_date)?;
        let reservation_time = Self::validate_and_parse_time(&req.reservation_time)?;
        Self::validate_not_past(reservation_date)?;

        let lock = state.reservation_lock(reservation_id).await;
        let _guard = lock.lock().await;

        let txn = state.db.begin().await?;

        let found = Self::find_reservation(&txn, reservation_id).await?;
        assert_reservation_editable(actor, found.creator_member_id)?;

        // 정원 검증: 현재 확정 인원 아래로는 줄일 수 없다
        let entries = ApplicationService::load_ledger(&txn, reservation_id).await?;
        let (confirmed, waiting) = admission::count_by_status(&entries);
        admission::validate_capacity_change(confirmed, req.max_capacity)?;

        let loc = LocationService::find_or_create(
            &txn,
            &req.location.name,
            &req.location.address,
            req.location.url.clone(),
        )
        .await?;

        let mut model: reservation::ActiveModel = found.into();
        model.title = Set(req.title);
        model.description = Set(req.description);
        model.location_id = Set(loc.location_id);
        model.max_capacity = Set(req.max_capacity);
        model.reservation_date = Set(reservation_date);
        model.reservation_time = Set(reservation_time);
        model.updated_at = Set(Utc::now().naive_utc());

        let saved = model.update(&txn).await?;

        txn.commit().await?;

        ActivityLogService::log_activity(
            state,
            actor.member_id,
            &actor.login_id,
            ActivityType::ReservationUpdate,
            format!("예약 수정: {}", saved.title),
        )
        .await;

        let creator_name = Self::find_creator_name(state, saved.creator_member_id).await?;
        Ok(ReservationResponse::build(
            &saved,
            &loc,
            creator_name,
            confirmed,
            waiting,
        ))
    }

    /// 예약 삭제 (생성자 또는 관리자)
    pub async fn delete_reservation(
        state: &AppState,
        reservation_id: i64,
        actor: &member::Model,
    ) -> Result<(), AppError> {
        let lock = state.reservation_lock(reservation_id).await;
        let _guard = lock.lock().await;

        let txn = state.db.begin().await?;

        let found = Self::find_reservation(&txn, reservation_id).await?;
        assert_reservation_editable(actor, found.creator_member_id)?;
        let title = found.title.clone();

        // 신청 원장도 함께 삭제
        application::Entity::delete_many()
            .filter(application::Column::ReservationId.eq(reservation_id))
            .exec(&txn)
            .await?;

        reservation::Entity::delete_by_id(reservation_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        // 삭제된 예약의 락 엔트리 회수 (현재 가드는 Arc로 계속 유효)
        state.release_reservation_lock(reservation_id).await;

        info!("Reservation {} deleted", reservation_id);

        ActivityLogService::log_activity(
            state,
            actor.member_id,
            &actor.login_id,
            ActivityType::ReservationDelete,
            format!("예약 삭제: {}", title),
        )
        .await;

        Ok(())
    }

    /// 예약 신청자 목록 조회 (신청 시각 오름차순, 동시각은 ID 오름차순)
    pub async fn get_applicants(
        state: &AppState,
        reservation_id: i64,
    ) -> Result<Vec<ApplicantResponse>, AppError> {
        // 존재 확인
        Self::find_reservation(&state.db, reservation_id).await?;

        let rows = application::Entity::find()
            .filter(application::Column::ReservationId.eq(reservation_id))
            .find_also_related(member::Entity)
            .order_by_asc(application::Column::AppliedAt)
            .order_by_asc(application::Column::ApplicationId)
            .all(&state.db)
            .await?;

        let applicants = rows
            .into_iter()
            .map(|(app, m)| {
                let (member_name, member_login_id) = match m {
                    Some(m) => (m.name, m.login_id),
                    None => ("탈퇴한 회원".to_string(), String::new()),
                };
                ApplicantResponse {
                    application_id: app.application_id,
                    member_id: app.member_id,
                    member_name,
                    member_login_id,
                    status: app.status,
                    status_description: app.status.description().to_string(),
                    applied_at: app.applied_at,
                    is_creator: app.is_creator,
                }
            })
            .collect();

        Ok(applicants)
    }

    /// 신청 응답에 포함할 예약 요약 조회
    pub async fn get_summary(
        state: &AppState,
        reservation_id: i64,
    ) -> Result<ReservationSummary, AppError> {
        let found = Self::find_reservation(&state.db, reservation_id).await?;
        Ok(ReservationSummary::from(&found))
    }

    // ============== 내부 헬퍼 ==============

    pub(crate) async fn find_reservation<C: ConnectionTrait>(
        conn: &C,
        reservation_id: i64,
    ) -> Result<reservation::Model, AppError> {
        reservation::Entity::find_by_id(reservation_id)
            .one(conn)
            .await?
            .ok_or_else(|| {
                AppError::ReservationNotFound("존재하지 않는 예약입니다.".to_string())
            })
    }

    async fn find_creator_name(
        state: &AppState,
        creator_member_id: i64,
    ) -> Result<Option<String>, AppError> {
        Ok(member::Entity::find_by_id(creator_member_id)
            .one(&state.db)
            .await?
            .map(|m| m.name))
    }

    async fn to_response(
        state: &AppState,
        r: reservation::Model,
    ) -> Result<ReservationResponse, AppError> {
        let entries = ApplicationService::load_ledger(&state.db, r.reservation_id).await?;
        let (confirmed, waiting) = admission::count_by_status(&entries);

        let loc = location::Entity::find_by_id(r.location_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 장소입니다.".to_string()))?;

        let creator_name = Self::find_creator_name(state, r.creator_member_id).await?;

        Ok(ReservationResponse::build(
            &r,
            &loc,
            creator_name,
            confirmed,
            waiting,
        ))
    }

    /// 목록 응답 조립 (신청 집계와 장소를 일괄 조회하여 N+1 방지)
    async fn to_responses(
        state: &AppState,
        reservations: Vec<reservation::Model>,
    ) -> Result<Vec<ReservationResponse>, AppError> {
        if reservations.is_empty() {
            return Ok(Vec::new());
        }

        let reservation_ids: Vec<i64> =
            reservations.iter().map(|r| r.reservation_id).collect();
        let location_ids: Vec<i64> = reservations.iter().map(|r| r.location_id).collect();
        let creator_ids: Vec<i64> =
            reservations.iter().map(|r| r.creator_member_id).collect();

        // 상태 집계
        let applications = application::Entity::find()
            .filter(application::Column::ReservationId.is_in(reservation_ids))
            .all(&state.db)
            .await?;

        let mut counts: HashMap<i64, (i32, i32)> = HashMap::new();
        for app in &applications {
            let entry = counts.entry(app.reservation_id).or_insert((0, 0));
            match app.status {
                ApplicationStatus::Confirmed => entry.0 += 1,
                ApplicationStatus::Waiting => entry.1 += 1,
                _ => {}
            }
        }

        // 장소
        let locations = location::Entity::find()
            .filter(location::Column::LocationId.is_in(location_ids))
            .all(&state.db)
            .await?;
        let locations: HashMap<i64, location::Model> = locations
            .into_iter()
            .map(|l| (l.location_id, l))
            .collect();

        // 생성자 이름
        let creators = member::Entity::find()
            .filter(member::Column::MemberId.is_in(creator_ids))
            .all(&state.db)
            .await?;
        let creators: HashMap<i64, String> = creators
            .into_iter()
            .map(|m| (m.member_id, m.name))
            .collect();

        let mut responses = Vec::with_capacity(reservations.len());
        for r in &reservations {
            let loc = locations.get(&r.location_id).ok_or_else(|| {
                AppError::InternalError(format!(
                    "Location {} missing for reservation {}",
                    r.location_id, r.reservation_id
                ))
            })?;
            let (confirmed, waiting) =
                counts.get(&r.reservation_id).copied().unwrap_or((0, 0));
            responses.push(ReservationResponse::build(
                r,
                loc,
                creators.get(&r.creator_member_id).cloned(),
                confirmed,
                waiting,
            ));
        }

        Ok(responses)
    }

    fn validate_and_parse_date(raw: &str) -> Result<NaiveDate, AppError> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError::ValidationError("날짜는 YYYY-MM-DD 형식이어야 합니다.".to_string())
        })
    }

    fn validate_and_parse_time(raw: &str) -> Result<NaiveTime, AppError> {
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| {
                AppError::ValidationError("시간은 HH:MM 형식이어야 합니다.".to_string())
            })
    }

    /// 과거 날짜 검증 (당일 예약은 가능)
    fn validate_not_past(date: NaiveDate) -> Result<(), AppError> {
        if date < Utc::now().date_naive() {
            return Err(AppError::ValidationError(
                "예약 날짜는 과거일 수 없습니다. (당일 예약은 가능합니다)".to_string(),
            ));
        }
        Ok(())
    }
}
