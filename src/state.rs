use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::config::AppConfig;

/// 애플리케이션 공유 상태
///
/// `reservation_locks`는 예약별 원장 변경 직렬화 장치입니다. 한 예약에 대한
/// 신청/취소/승격/정원 축소는 해당 예약의 락을 잡은 상태에서 트랜잭션으로
/// 수행되어 제출 순서대로 반영됩니다. 서로 다른 예약은 병렬로 진행됩니다.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    reservation_locks: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            db,
            config,
            reservation_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// 예약 ID에 대한 변경 락을 반환합니다.
    ///
    /// 락 객체는 예약별로 하나만 존재하며 최초 요청 시 생성됩니다.
    pub async fn reservation_lock(&self, reservation_id: i64) -> Arc<Mutex<()>> {
        let mut registry = self.reservation_locks.lock().await;
        registry
            .entry(reservation_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// 삭제된 예약의 락 엔트리를 레지스트리에서 제거합니다.
    ///
    /// 호출하지 않으면 레지스트리가 삭제된 예약만큼 계속 커집니다. 제거 시점에
    /// 해당 락을 잡고 있던 태스크는 자신의 `Arc`를 통해 그대로 완료됩니다.
    pub async fn release_reservation_lock(&self, reservation_id: i64) {
        let mut registry = self.reservation_locks.lock().await;
        registry.remove(&reservation_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        let config = AppConfig {
            server_port: 8080,
            database_url: "mysql://localhost/test".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
            refresh_token_expiration: 86400,
        };
        AppState::new(DatabaseConnection::default(), config)
    }

    #[tokio::test]
    async fn test_reservation_lock_is_reused_per_reservation() {
        let state = test_state();

        let first = state.reservation_lock(1).await;
        let second = state.reservation_lock(1).await;
        let other = state.reservation_lock(2).await;

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[tokio::test]
    async fn test_release_evicts_lock_entry() {
        let state = test_state();

        let before = state.reservation_lock(1).await;
        state.release_reservation_lock(1).await;
        let after = state.reservation_lock(1).await;

        // 제거 후 재요청은 새 락 객체를 만든다
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn test_release_of_unknown_reservation_is_noop() {
        let state = test_state();

        state.release_reservation_lock(999).await;

        let registry = state.reservation_locks.lock().await;
        assert!(registry.is_empty());
    }
}
