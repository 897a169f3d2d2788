//! 电影查询服务
//!
//! 从 Neo4j 读取电影列表并以 JSON 返回：
//! - 启动时建立进程级驱动句柄，配置无效则直接退出
//! - 根路径接受任意方法，每个请求独立打开并释放一个只读会话
//! - 查询失败返回带诊断信息的错误响应

mod connection;
mod handlers;
mod routes;
mod service;
mod state;

use anyhow::Context;
use axum::{middleware, Router};
use common::config::{load_dotenv, AppConfig};
use common::middleware::request_id::request_id_middleware;
use common::response::SERVICE_NAME;
use connection::open_connection;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME);
    info!(service = SERVICE_NAME, neo4j = ?config.neo4j, "配置已加载");

    // 建立驱动句柄，失败时不监听端口
    let handle = open_connection(&config.neo4j)
        .await
        .context("无法创建 Neo4j 驱动")?;

    // 创建路由
    let app = create_router(AppState::new(config.clone(), handle));

    // 启动服务
    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {}", addr))?;
    info!(service = SERVICE_NAME, address = %addr, "启动服务");

    axum::serve(listener, app).await.context("服务异常退出")?;
    Ok(())
}

/// 初始化日志追踪，`LOG_FORMAT=json` 时输出 JSON 行
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
