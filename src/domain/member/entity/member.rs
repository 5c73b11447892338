use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 회원 등급
///
/// 🥚 -> 🐣 -> 🐥 -> 🐤 -> 🐔 (관리자)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberGrade {
    #[sea_orm(string_value = "EGG")]
    Egg,
    #[sea_orm(string_value = "HATCHING")]
    Hatching,
    #[sea_orm(string_value = "CHICK")]
    Chick,
    #[sea_orm(string_value = "YOUNG_BIRD")]
    YoungBird,
    #[sea_orm(string_value = "ROOSTER")]
    Rooster,
}

impl MemberGrade {
    pub fn emoji(&self) -> &'static str {
        match self {
            MemberGrade::Egg => "🥚",
            MemberGrade::Hatching => "🐣",
            MemberGrade::Chick => "🐥",
            MemberGrade::YoungBird => "🐤",
            MemberGrade::Rooster => "🐔",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MemberGrade::Egg => "알",
            MemberGrade::Hatching => "부화중",
            MemberGrade::Chick => "병아리",
            MemberGrade::YoungBird => "어린새",
            MemberGrade::Rooster => "관리자",
        }
    }

    /// 등급 레벨 (1 ~ 5, 높을수록 상위)
    pub fn level(&self) -> i32 {
        match self {
            MemberGrade::Egg => 1,
            MemberGrade::Hatching => 2,
            MemberGrade::Chick => 3,
            MemberGrade::YoungBird => 4,
            MemberGrade::Rooster => 5,
        }
    }

    /// ROOSTER 등급은 관리자 권한을 가진다
    pub fn is_admin(&self) -> bool {
        matches!(self, MemberGrade::Rooster)
    }
}

impl Default for MemberGrade {
    fn default() -> Self {
        MemberGrade::Egg
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub member_id: i64,
    #[sea_orm(unique)]
    pub login_id: String,
    pub password_hash: String,
    pub password_salt: String,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub birth_year: i32,
    pub grade: MemberGrade,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::application::entity::application::Entity")]
    Application,
    #[sea_orm(has_many = "crate::domain::reservation::entity::reservation::Entity")]
    Reservation,
    #[sea_orm(has_many = "super::activity_log::Entity")]
    ActivityLog,
}

impl Related<crate::domain::application::entity::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl Related<crate::domain::reservation::entity::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl Related<super::activity_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
