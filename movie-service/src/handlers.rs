//! Handler模块

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use common::errors::AppError;
use crate::state::AppState;

/// 每次请求返回的电影数量上限，与请求内容无关
pub const MOVIE_LIMIT: i64 = 10;

/// 列出电影
///
/// 任意方法访问根路径都会执行同一条只读查询，返回
/// `[{"movie": {"released": 1996, "title": "..."}}]` 形式的 JSON 数组。
pub async fn list_movies(State(state): State<AppState>) -> Result<Response, AppError> {
    let movies = state.movies.list(MOVIE_LIMIT).await.inspect_err(|e| {
        tracing::error!(service = %state.config.service_name, error = %e, "查询 Neo4j 失败");
    })?;

    let body = serde_json::to_vec(&movies).map_err(|e| AppError::Serialization(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
