//! 로깅 초기화 모듈
//!
//! stdout에는 JSON 구조화 로그를, `LOG_DIR` 아래 일별 파일에는 ANSI 없는
//! JSON 로그를 동시에 남깁니다.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,reservation_server=debug";

/// 로깅 시스템을 초기화합니다.
///
/// 로그 레벨은 `RUST_LOG`로 조정합니다 (기본 `info,reservation_server=debug`).
/// 파일은 `reservation.log.YYYY-MM-DD` 형식으로 일별 롤링됩니다.
///
/// 반환된 `WorkerGuard`는 main에서 유지해야 종료 시 버퍼링된 로그가
/// 손실되지 않습니다.
pub fn init_logging() -> WorkerGuard {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::daily(&log_dir, "reservation.log"));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stdout_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true);

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .with_ansi(false)
        .with_writer(file_writer);

    // 테스트 등에서 이미 초기화된 경우는 무시한다
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init();

    guard
}
