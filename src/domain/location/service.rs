use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use super::dto::{LocationCreateRequest, LocationResponse};
use super::entity::location;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct LocationService;

impl LocationService {
    /// 활성 장소 목록 조회
    pub async fn get_active_locations(state: &AppState) -> Result<Vec<LocationResponse>, AppError> {
        let locations = location::Entity::find()
            .filter(location::Column::IsActive.eq(true))
            .all(&state.db)
            .await?;

        Ok(locations.into_iter().map(LocationResponse::from).collect())
    }

    /// 장소 생성
    pub async fn create_location(
        state: &AppState,
        req: LocationCreateRequest,
    ) -> Result<LocationResponse, AppError> {
        let now = Utc::now().naive_utc();
        let model = location::ActiveModel {
            name: Set(req.name),
            address: Set(req.address),
            url: Set(req.url),
            description: Set(req.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = model.insert(&state.db).await?;

        Ok(LocationResponse::from(saved))
    }

    /// 이름+주소로 장소를 찾고 없으면 새로 생성
    ///
    /// 예약 생성/수정 시 호출되며, 호출부의 트랜잭션 안에서 실행됩니다.
    pub async fn find_or_create<C: ConnectionTrait>(
        conn: &C,
        name: &str,
        address: &str,
        url: Option<String>,
    ) -> Result<location::Model, AppError> {
        let existing = location::Entity::find()
            .filter(location::Column::Name.eq(name))
            .filter(location::Column::Address.eq(address))
            .one(conn)
            .await?;

        if let Some(found) = existing {
            return Ok(found);
        }

        let now = Utc::now().naive_utc();
        let model = location::ActiveModel {
            name: Set(name.to_string()),
            address: Set(address.to_string()),
            url: Set(url),
            description: Set(Some("자동 생성된 장소".to_string())),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(conn).await?)
    }
}
