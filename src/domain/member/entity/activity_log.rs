use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 활동 로그 유형
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    #[sea_orm(string_value = "LOGIN")]
    Login,
    #[sea_orm(string_value = "MEMBER_CREATE")]
    MemberCreate,
    #[sea_orm(string_value = "MEMBER_UPDATE")]
    MemberUpdate,
    #[sea_orm(string_value = "MEMBER_DELETE")]
    MemberDelete,
    #[sea_orm(string_value = "GRADE_UPGRADE")]
    GradeUpgrade,
    #[sea_orm(string_value = "RESERVATION_CREATE")]
    ReservationCreate,
    #[sea_orm(string_value = "RESERVATION_UPDATE")]
    ReservationUpdate,
    #[sea_orm(string_value = "RESERVATION_DELETE")]
    ReservationDelete,
    #[sea_orm(string_value = "RESERVATION_APPLY")]
    ReservationApply,
    #[sea_orm(string_value = "RESERVATION_CANCEL")]
    ReservationCancel,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub log_id: i64,
    pub member_id: i64,
    pub member_login_id: String,
    pub activity_type: ActivityType,
    pub description: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::MemberId"
    )]
    Member,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
