use std::net::SocketAddr;

use reservation_server::config::app_config::AppConfig;
use reservation_server::config::database::establish_connection;
use reservation_server::state::AppState;
use reservation_server::utils::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard가 drop되면 파일 로그 flush가 멈춘다)
    let _guard = init_logging();

    // 3. 설정 로드
    let config = AppConfig::from_env()?;

    // 4. DB 연결 및 스키마 준비
    let db = establish_connection(&config.database_url).await?;

    // 5. 라우터 설정
    let port = config.server_port;
    let state = AppState::new(db, config);
    let app = reservation_server::app(state);

    // 6. 서버 실행
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
