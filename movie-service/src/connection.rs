//! Graph database connection provider.
//!
//! [`open_connection`] turns a [`Neo4jConfig`] into a process wide
//! [`GraphHandle`]. The handle hands out one [`ReadSession`] per request.

use async_trait::async_trait;
use common::config::Neo4jConfig;
use common::errors::{AppError, AppResult};
use common::models::movie::{MovieResult, MovieRow};
use neo4rs::{query, ConfigBuilder, Graph, Row, Txn};

/// Cypher run for every movie listing. `$limit` is always bound to a constant.
pub const MOVIES_QUERY: &str =
    "MATCH (movie:Movie) RETURN movie.title as title, movie.released as released LIMIT $limit";

/// Produces sessions bound to one database.
#[async_trait]
pub trait SessionSource: Send + Sync {
    type Session: MovieSession;

    /// Opens a session. Failure is `AppError::DatabaseConnection`.
    async fn read_session(&self) -> AppResult<Self::Session>;

    /// Database the sessions are bound to.
    fn database(&self) -> &str;
}

/// A session owned by a single request.
///
/// Must be finished with [`MovieSession::close`] or [`MovieSession::abort`].
#[async_trait]
pub trait MovieSession: Send {
    /// Runs [`MOVIES_QUERY`] and decodes every row, in the order the database
    /// returns them.
    async fn fetch_movies(&mut self, limit: i64) -> AppResult<Vec<MovieResult>>;

    /// Commits and releases the session.
    async fn close(self) -> AppResult<()>;

    /// Rolls back and releases the session after a failed query.
    async fn abort(self) -> AppResult<()>;
}

/// Shared driver handle.
///
/// `neo4rs::Graph` pools its connections internally and is `Send + Sync`, so
/// the handle is cloned into every request without extra locking.
#[derive(Clone)]
pub struct GraphHandle {
    graph: Graph,
    database: String,
}

/// Builds the driver handle. The pool is created without a round trip; an
/// unreachable server only shows up when the first session is opened.
///
/// # Errors
/// `AppError::Configuration` for a malformed URI, an unsupported scheme or any
/// other parameter the driver refuses.
pub async fn open_connection(config: &Neo4jConfig) -> AppResult<GraphHandle> {
    config.check()?;

    let driver_config = ConfigBuilder::default()
        .uri(config.uri.as_str())
        .user(config.username.as_str())
        .password(config.password.as_str())
        .max_connections(config.max_connections)
        .build()
        .map_err(|e| AppError::Configuration(e.to_string()))?;

    let graph = Graph::connect(driver_config)
        .await
        .map_err(|e| AppError::Configuration(format!("cannot create driver: {}", e)))?;

    tracing::info!(uri = %config.uri, database = %config.database, "Graph driver ready");

    Ok(GraphHandle {
        graph,
        database: config.database.clone(),
    })
}

#[async_trait]
impl SessionSource for GraphHandle {
    type Session = ReadSession;

    async fn read_session(&self) -> AppResult<ReadSession> {
        let txn = self
            .graph
            .start_txn_on(self.database.as_str())
            .await
            .map_err(|e| AppError::DatabaseConnection(e.to_string()))?;

        Ok(ReadSession { txn })
    }

    fn database(&self) -> &str {
        &self.database
    }
}

/// Transaction backed session on a [`GraphHandle`].
pub struct ReadSession {
    txn: Txn,
}

#[async_trait]
impl MovieSession for ReadSession {
    async fn fetch_movies(&mut self, limit: i64) -> AppResult<Vec<MovieResult>> {
        let mut rows = self
            .txn
            .execute(query(MOVIES_QUERY).param("limit", limit))
            .await
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))?;

        let mut movies = Vec::new();
        while let Some(row) = rows
            .next(self.txn.handle())
            .await
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))?
        {
            movies.push(decode_row(&row)?);
        }

        Ok(movies)
    }

    async fn close(self) -> AppResult<()> {
        self.txn
            .commit()
            .await
            .map_err(|e| AppError::SessionRelease(e.to_string()))
    }

    async fn abort(self) -> AppResult<()> {
        self.txn
            .rollback()
            .await
            .map_err(|e| AppError::SessionRelease(e.to_string()))
    }
}

fn decode_row(row: &Row) -> AppResult<MovieResult> {
    row.to::<MovieRow>()
        .map(MovieResult::from)
        .map_err(|e| AppError::RowDecode(e.to_string()))
}
