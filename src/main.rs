use std::net::SocketAddr;
use std::sync::Arc;

use innerspell_server::app;
use innerspell_server::config::{establish_connection, AppConfig};
use innerspell_server::domain::reading::store::SeaOrmReadingStore;
use innerspell_server::state::AppState;
use innerspell_server::utils::logging::init_logging;

#[tokio::main]
async fn main() {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 프로세스 종료 시까지 유지)
    let _guard = init_logging();

    // 3. 설정 로드
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };

    // 4. 리딩 기록 저장소 연결
    let db = match establish_connection(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("데이터베이스 연결 실패: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        store: Arc::new(SeaOrmReadingStore::new(db)),
        config: config.clone(),
        started_at: std::time::Instant::now(),
    };

    // 5. 라우터 설정
    let server_port = config.server_port;
    let app = app(state);

    // 6. 서버 실행
    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("{} 바인딩 실패: {}", addr, e));
    axum::serve(listener, app)
        .await
        .expect("server task failed");
}
