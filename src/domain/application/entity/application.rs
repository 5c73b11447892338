use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 예약 신청 상태
///
/// 취소는 상태 전이일 뿐 행을 삭제하지 않는다. 취소 이력이 남아 있어야
/// 재신청 검사와 감사가 가능하다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl ApplicationStatus {
    pub fn description(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "접수",
            ApplicationStatus::Confirmed => "확정",
            ApplicationStatus::Waiting => "대기",
            ApplicationStatus::Cancelled => "취소",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, ApplicationStatus::Cancelled)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation_application")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub application_id: i64,
    pub member_id: i64,
    pub reservation_id: i64,
    pub status: ApplicationStatus,
    pub note: Option<String>,
    pub is_creator: bool,
    pub applied_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::member::entity::member::Entity",
        from = "Column::MemberId",
        to = "crate::domain::member::entity::member::Column::MemberId"
    )]
    Member,
    #[sea_orm(
        belongs_to = "crate::domain::reservation::entity::reservation::Entity",
        from = "Column::ReservationId",
        to = "crate::domain::reservation::entity::reservation::Column::ReservationId"
    )]
    Reservation,
}

impl Related<crate::domain::member::entity::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl Related<crate::domain::reservation::entity::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
