//! 电影查询服务模块

use async_trait::async_trait;

use common::errors::AppResult;
use common::models::movie::MovieResult;
use crate::connection::{GraphHandle, MovieSession, SessionSource};

/// 电影服务 Trait
#[async_trait]
pub trait MovieServiceTrait: Send + Sync {
    /// 按数据库返回顺序列出最多 `limit` 部电影
    async fn list(&self, limit: i64) -> AppResult<Vec<MovieResult>>;
}

/// 基于会话来源的电影服务，默认使用 Neo4j 驱动句柄
pub struct MovieService<S = GraphHandle> {
    source: S,
}

impl<S: SessionSource> MovieService<S> {
    /// 创建新的电影服务实例
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S: SessionSource> MovieServiceTrait for MovieService<S> {
    async fn list(&self, limit: i64) -> AppResult<Vec<MovieResult>> {
        let mut session = self.source.read_session().await?;
        let fetched = session.fetch_movies(limit).await;

        // 释放失败只记录日志，不影响本次请求
        let released = match fetched {
            Ok(_) => session.close().await,
            Err(_) => session.abort().await,
        };
        if let Err(e) = released {
            tracing::warn!(database = %self.source.database(), error = %e, "会话释放失败");
        }

        let movies = fetched?;
        tracing::debug!(count = movies.len(), "电影查询完成");
        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use common::errors::AppError;
    use common::models::movie::Movie;
    use super::*;

    /// 记录会话生命周期的内存会话来源
    struct FakeSource {
        fetch_fails: bool,
        release_fails: bool,
        events: Arc<Mutex<Vec<&'static str>>>,
    }

    struct FakeSession {
        fetch_fails: bool,
        release_fails: bool,
        events: Arc<Mutex<Vec<&'static str>>>,
    }

    impl FakeSource {
        fn new(fetch_fails: bool, release_fails: bool) -> Self {
            Self {
                fetch_fails,
                release_fails,
                events: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn events(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SessionSource for FakeSource {
        type Session = FakeSession;

        async fn read_session(&self) -> AppResult<FakeSession> {
            self.events.lock().unwrap().push("open");
            Ok(FakeSession {
                fetch_fails: self.fetch_fails,
                release_fails: self.release_fails,
                events: self.events.clone(),
            })
        }

        fn database(&self) -> &str {
            "movies"
        }
    }

    impl FakeSession {
        fn release(&self, event: &'static str) -> AppResult<()> {
            self.events.lock().unwrap().push(event);
            if self.release_fails {
                return Err(AppError::SessionRelease("connection reset".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl MovieSession for FakeSession {
        async fn fetch_movies(&mut self, limit: i64) -> AppResult<Vec<MovieResult>> {
            self.events.lock().unwrap().push("fetch");
            if self.fetch_fails {
                return Err(AppError::DatabaseQuery("syntax error".to_string()));
            }
            let movie = Movie {
                released: 1999,
                title: "The Matrix".to_string(),
            };
            Ok(vec![MovieResult::from(movie); limit.min(2) as usize])
        }

        async fn close(self) -> AppResult<()> {
            self.release("close")
        }

        async fn abort(self) -> AppResult<()> {
            self.release("abort")
        }
    }

    #[tokio::test]
    async fn test_successful_fetch_closes_session() {
        let service = MovieService::new(FakeSource::new(false, false));
        let movies = service.list(10).await.unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(service.source.events(), vec!["open", "fetch", "close"]);
    }

    #[tokio::test]
    async fn test_release_failure_still_returns_movies() {
        let service = MovieService::new(FakeSource::new(false, true));
        let movies = service.list(10).await.unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(service.source.events(), vec!["open", "fetch", "close"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_aborts_session() {
        let service = MovieService::new(FakeSource::new(true, false));
        let err = service.list(10).await.unwrap_err();

        assert!(matches!(err, AppError::DatabaseQuery(_)));
        assert_eq!(service.source.events(), vec!["open", "fetch", "abort"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_reports_query_error_over_release_error() {
        let service = MovieService::new(FakeSource::new(true, true));
        let err = service.list(10).await.unwrap_err();

        assert!(matches!(err, AppError::DatabaseQuery(_)));
        assert_eq!(service.source.events(), vec!["open", "fetch", "abort"]);
    }
}
