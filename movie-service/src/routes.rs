//! 路由模块

use axum::{routing::any, Router};
use crate::handlers;
use crate::state::AppState;

/// 根路径接受任意 HTTP 方法
pub fn router() -> Router<AppState> {
    Router::new().route("/", any(handlers::list_movies))
}
