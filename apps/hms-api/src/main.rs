//! 酒店后台 HTTP API：预订、房间、库存、员工、支付、看板、报表与联系申请。

mod handlers;
mod middleware;
mod routes;
mod state;
mod utils;

pub use state::AppState;

use axum::Router;
use hms_config::AppConfig;
use hms_telemetry::init_tracing;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let state = state::build_state(&config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %config.http_addr, "hms-api listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// 同一组路由同时挂在 `/` 与 `/api` 下。
pub fn build_app(state: AppState) -> Router {
    let api = routes::create_api_router();
    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_context))
        .layer(TraceLayer::new_for_http())
}
