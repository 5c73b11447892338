use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use super::admission::{self, LedgerEntry};
use super::dto::{
    ApplicationApplyResponse, ApplicationCreateRequest, ApplicationResponse, ReservationSnapshot,
};
use super::entity::application::{self, ApplicationStatus};
use crate::domain::member::dto::MemberSummary;
use crate::domain::member::entity::activity_log::ActivityType;
use crate::domain::member::entity::member;
use crate::domain::member::service::ActivityLogService;
use crate::domain::reservation::dto::ReservationSummary;
use crate::domain::reservation::entity::reservation;
use crate::domain::reservation::service::ReservationService;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct ApplicationService;

impl ApplicationService {
    /// 예약 신청
    ///
    /// 예약 락 + 트랜잭션 안에서 승인 정책을 적용하고 새 원장 행을
    /// 추가합니다. 갱신된 예약 집계 스냅샷을 함께 돌려줍니다.
    pub async fn apply(
        state: &AppState,
        member_id: i64,
        req: ApplicationCreateRequest,
    ) -> Result<ApplicationApplyResponse, AppError> {
        // 1. 회원 존재 확인
        let member = member::Entity::find_by_id(member_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::MemberNotFound("존재하지 않는 회원입니다.".to_string()))?;

        // 2. 예약별 직렬화: 같은 예약에 대한 원장 변경은 제출 순서대로 반영
        let lock = state.reservation_lock(req.reservation_id).await;
        let _guard = lock.lock().await;

        let txn = state.db.begin().await?;

        let target = ReservationService::find_reservation(&txn, req.reservation_id).await?;

        // 3. 승인 판정 (생성자 본인/중복 신청 거부, 정원 기준 확정/대기)
        let entries = Self::load_ledger(&txn, req.reservation_id).await?;
        let status = admission::evaluate_admission(
            &entries,
            member_id,
            req.reservation_id,
            target.creator_member_id,
            target.max_capacity,
        )?;

        // 4. 원장 행 추가 (재신청도 항상 새 행, 취소 이력은 보존)
        let now = Utc::now().naive_utc();
        let model = application::ActiveModel {
            member_id: Set(member_id),
            reservation_id: Set(req.reservation_id),
            status: Set(status),
            note: Set(req.note.clone()),
            is_creator: Set(false),
            applied_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = model.insert(&txn).await?;

        // 5. 커밋 전 원장 재집계로 스냅샷 구성
        let entries = Self::load_ledger(&txn, req.reservation_id).await?;
        let (confirmed, waiting) = admission::count_by_status(&entries);

        txn.commit().await?;

        info!(
            "Member {} applied for reservation {} -> {:?}",
            member_id, req.reservation_id, status
        );

        ActivityLogService::log_activity(
            state,
            member_id,
            &member.login_id,
            ActivityType::ReservationApply,
            format!("예약 신청: {} ({})", target.title, status.description()),
        )
        .await;

        Ok(ApplicationApplyResponse {
            application_id: saved.application_id,
            status: saved.status,
            status_description: saved.status.description().to_string(),
            note: saved.note,
            applied_at: saved.applied_at,
            reservation: Self::snapshot(&target, confirmed, waiting),
        })
    }

    /// 예약 신청 취소
    ///
    /// 확정 신청 취소 시 가장 먼저 신청한 대기자 한 명이 같은 트랜잭션
    /// 안에서 확정으로 승격됩니다 (취소와 승격은 모두 반영되거나 모두
    /// 반영되지 않음).
    pub async fn cancel(
        state: &AppState,
        application_id: i64,
        actor: &member::Model,
    ) -> Result<(), AppError> {
        // 1. 대상 신청 조회 (락 획득 전에 예약 ID 확인용)
        let target = Self::find_application(&state.db, application_id).await?;

        // 2. 본인 또는 관리자만 취소 가능
        if target.member_id != actor.member_id && !actor.grade.is_admin() {
            return Err(AppError::Forbidden(
                "본인의 신청만 취소할 수 있습니다.".to_string(),
            ));
        }

        let lock = state.reservation_lock(target.reservation_id).await;
        let _guard = lock.lock().await;

        let txn = state.db.begin().await?;

        // 3. 락 획득 후 재조회 (그 사이 상태가 바뀌었을 수 있음)
        let target = Self::find_application(&txn, application_id).await?;
        admission::validate_cancellation(target.status)?;

        let was_confirmed = target.status == ApplicationStatus::Confirmed;
        let reservation_id = target.reservation_id;

        admission::validate_transition(target.status, ApplicationStatus::Cancelled)?;

        let now = Utc::now().naive_utc();
        let mut model: application::ActiveModel = target.into();
        model.status = Set(ApplicationStatus::Cancelled);
        model.updated_at = Set(now);
        model.update(&txn).await?;

        // 4. 확정 취소였다면 대기자 한 명 승격 (선착순)
        if was_confirmed {
            Self::promote_next_in_line(&txn, reservation_id).await?;
        }

        txn.commit().await?;

        info!("Application {} cancelled", application_id);

        ActivityLogService::log_activity(
            state,
            actor.member_id,
            &actor.login_id,
            ActivityType::ReservationCancel,
            format!("예약 신청 취소: 신청 ID {}", application_id),
        )
        .await;

        Ok(())
    }

    /// 관리자용 신청 상태 변경
    ///
    /// 상태 기계가 허용하는 전이만 수행합니다. 확정 자리를 비우는 전이는
    /// 취소와 동일하게 대기자 승격을 트리거합니다.
    pub async fn update_status(
        state: &AppState,
        application_id: i64,
        new_status: ApplicationStatus,
    ) -> Result<ApplicationResponse, AppError> {
        let target = Self::find_application(&state.db, application_id).await?;

        let lock = state.reservation_lock(target.reservation_id).await;
        let _guard = lock.lock().await;

        let txn = state.db.begin().await?;

        let target = Self::find_application(&txn, application_id).await?;
        let reservation_id = target.reservation_id;

        admission::validate_transition(target.status, new_status)?;

        // 대기 -> 확정 수동 승격도 정원을 넘을 수는 없다
        if target.status == ApplicationStatus::Waiting
            && new_status == ApplicationStatus::Confirmed
        {
            let reservation =
                ReservationService::find_reservation(&txn, reservation_id).await?;
            let entries = Self::load_ledger(&txn, reservation_id).await?;
            let (confirmed, _) = admission::count_by_status(&entries);
            if confirmed >= reservation.max_capacity {
                return Err(AppError::CapacityViolation(
                    "정원이 가득 차 확정으로 변경할 수 없습니다.".to_string(),
                ));
            }
        }

        let frees_confirmed_slot =
            target.status == ApplicationStatus::Confirmed && new_status != ApplicationStatus::Confirmed;

        let mut model: application::ActiveModel = target.into();
        model.status = Set(new_status);
        model.updated_at = Set(Utc::now().naive_utc());
        let saved = model.update(&txn).await?;

        if frees_confirmed_slot {
            Self::promote_next_in_line(&txn, reservation_id).await?;
        }

        txn.commit().await?;

        info!(
            "Application {} status changed to {:?}",
            application_id, new_status
        );

        Self::to_response(state, saved).await
    }

    /// 회원별 신청 목록 조회
    pub async fn get_applications_by_member(
        state: &AppState,
        member_id: i64,
    ) -> Result<Vec<ApplicationResponse>, AppError> {
        let member = member::Entity::find_by_id(member_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::MemberNotFound("존재하지 않는 회원입니다.".to_string()))?;

        let apps = application::Entity::find()
            .filter(application::Column::MemberId.eq(member_id))
            .order_by_desc(application::Column::AppliedAt)
            .all(&state.db)
            .await?;

        if apps.is_empty() {
            return Ok(Vec::new());
        }

        // 예약 요약 일괄 조회
        let reservation_ids: Vec<i64> = apps.iter().map(|a| a.reservation_id).collect();
        let reservations = reservation::Entity::find()
            .filter(reservation::Column::ReservationId.is_in(reservation_ids))
            .all(&state.db)
            .await?;
        let reservations: HashMap<i64, reservation::Model> = reservations
            .into_iter()
            .map(|r| (r.reservation_id, r))
            .collect();

        let summary = MemberSummary::from(&member);
        let responses = apps
            .iter()
            .filter_map(|app| {
                reservations.get(&app.reservation_id).map(|r| {
                    ApplicationResponse::build(
                        app,
                        MemberSummary {
                            member_id: summary.member_id,
                            name: summary.name.clone(),
                            grade_emoji: summary.grade_emoji.clone(),
                            grade_description: summary.grade_description.clone(),
                        },
                        ReservationSummary::from(r),
                    )
                })
            })
            .collect();

        Ok(responses)
    }

    // ============== 내부 헬퍼 ==============

    /// 예약의 원장 스냅샷 로드 (취소 포함 전체 이력)
    pub(crate) async fn load_ledger<C: ConnectionTrait>(
        conn: &C,
        reservation_id: i64,
    ) -> Result<Vec<LedgerEntry>, AppError> {
        let rows = application::Entity::find()
            .filter(application::Column::ReservationId.eq(reservation_id))
            .order_by_asc(application::Column::AppliedAt)
            .order_by_asc(application::Column::ApplicationId)
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| LedgerEntry {
                id: row.application_id,
                member_id: row.member_id,
                status: row.status,
                applied_at: row.applied_at,
                is_creator: row.is_creator,
            })
            .collect())
    }

    /// 대기자 승격: 가장 먼저 신청한 WAITING 한 명을 확정으로
    ///
    /// 취소 한 건당 승격도 정확히 한 명입니다. 대기자가 없으면 아무 일도
    /// 하지 않습니다.
    async fn promote_next_in_line<C: ConnectionTrait>(
        conn: &C,
        reservation_id: i64,
    ) -> Result<(), AppError> {
        let entries = Self::load_ledger(conn, reservation_id).await?;

        let Some(next) = admission::next_in_line(&entries) else {
            return Ok(());
        };

        admission::validate_transition(ApplicationStatus::Waiting, ApplicationStatus::Confirmed)?;

        let row = application::Entity::find_by_id(next.id)
            .one(conn)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!("Waiting application {} disappeared", next.id))
            })?;

        let promoted_id = row.application_id;
        let mut model: application::ActiveModel = row.into();
        model.status = Set(ApplicationStatus::Confirmed);
        model.updated_at = Set(Utc::now().naive_utc());
        model.update(conn).await?;

        info!(
            "Application {} promoted to CONFIRMED for reservation {}",
            promoted_id, reservation_id
        );

        Ok(())
    }

    async fn find_application<C: ConnectionTrait>(
        conn: &C,
        application_id: i64,
    ) -> Result<application::Model, AppError> {
        application::Entity::find_by_id(application_id)
            .one(conn)
            .await?
            .ok_or_else(|| {
                AppError::ApplicationNotFound("존재하지 않는 신청입니다.".to_string())
            })
    }

    fn snapshot(r: &reservation::Model, confirmed: i32, waiting: i32) -> ReservationSnapshot {
        ReservationSnapshot {
            reservation_id: r.reservation_id,
            max_capacity: r.max_capacity,
            confirmed_count: confirmed,
            waiting_count: waiting,
            available_slots: r.available_slots(confirmed),
            is_fully_booked: r.is_fully_booked(confirmed),
        }
    }

    async fn to_response(
        state: &AppState,
        app: application::Model,
    ) -> Result<ApplicationResponse, AppError> {
        let member = member::Entity::find_by_id(app.member_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::MemberNotFound("존재하지 않는 회원입니다.".to_string()))?;

        let summary = ReservationService::get_summary(state, app.reservation_id).await?;

        Ok(ApplicationResponse::build(
            &app,
            MemberSummary::from(&member),
            summary,
        ))
    }
}
