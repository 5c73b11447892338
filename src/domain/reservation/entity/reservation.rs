use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub reservation_id: i64,
    pub creator_member_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub location_id: i64,
    pub max_capacity: i32,
    pub reservation_date: Date,
    pub reservation_time: Time,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    /// 정원 마감 여부 (확정 수는 원장에서 집계하여 전달)
    pub fn is_fully_booked(&self, confirmed_count: i32) -> bool {
        confirmed_count >= self.max_capacity
    }

    /// 남은 자리 수
    pub fn available_slots(&self, confirmed_count: i32) -> i32 {
        (self.max_capacity - confirmed_count).max(0)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::member::entity::member::Entity",
        from = "Column::CreatorMemberId",
        to = "crate::domain::member::entity::member::Column::MemberId"
    )]
    Creator,
    #[sea_orm(
        belongs_to = "crate::domain::location::entity::location::Entity",
        from = "Column::LocationId",
        to = "crate::domain::location::entity::location::Column::LocationId"
    )]
    Location,
    #[sea_orm(has_many = "crate::domain::application::entity::application::Entity")]
    Application,
}

impl Related<crate::domain::member::entity::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<crate::domain::location::entity::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<crate::domain::application::entity::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
