use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::location;

/// 장소 생성 요청 (관리자 전용)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationCreateRequest {
    #[validate(length(min = 1, max = 100, message = "장소 이름을 입력해주세요."))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "주소를 입력해주세요."))]
    pub address: String,
    #[validate(url(message = "유효한 URL 형식이 아닙니다."))]
    pub url: Option<String>,
    pub description: Option<String>,
}

/// 장소 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub location_id: i64,
    pub name: String,
    pub address: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<location::Model> for LocationResponse {
    fn from(l: location::Model) -> Self {
        Self {
            location_id: l.location_id,
            name: l.name,
            address: l.address,
            url: l.url,
            description: l.description,
            is_active: l.is_active,
        }
    }
}

/// 예약 응답에 포함되는 간단한 장소 정보
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub location_id: i64,
    pub name: String,
    pub address: String,
    pub url: Option<String>,
    pub is_active: bool,
}

impl From<&location::Model> for LocationSummary {
    fn from(l: &location::Model) -> Self {
        Self {
            location_id: l.location_id,
            name: l.name.clone(),
            address: l.address.clone(),
            url: l.url.clone(),
            is_active: l.is_active,
        }
    }
}
