//! Application configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by [`load_dotenv`]. Anything unset falls back to the defaults below.

use std::fmt;

use validator::Validate;

use crate::errors::AppResult;
use crate::utils::uri_validator::validate_bolt_uri;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_NEO4J_URI: &str = "neo4j://neo4j:7687";
pub const DEFAULT_NEO4J_USERNAME: &str = "neo4j";
pub const DEFAULT_NEO4J_PASSWORD: &str = "testing";
pub const DEFAULT_NEO4J_DATABASE: &str = "neo4j";
pub const DEFAULT_NEO4J_MAX_CONNECTIONS: usize = 16;

/// Top level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service name used in logs.
    pub service_name: String,
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Graph database connection parameters.
    pub neo4j: Neo4jConfig,
}

/// Connection parameters for the graph database.
///
/// Immutable once loaded. The password is redacted from `Debug` output.
#[derive(Clone, Validate)]
pub struct Neo4jConfig {
    /// Bolt or neo4j URI, e.g. `neo4j://localhost:7687`.
    #[validate(custom(function = "validate_bolt_uri"))]
    pub uri: String,
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    pub password: String,
    /// Database every session is bound to.
    #[validate(length(min = 1, message = "database must not be empty"))]
    pub database: String,
    /// Upper bound on pooled driver connections.
    #[validate(range(min = 1, message = "max_connections must be at least 1"))]
    pub max_connections: usize,
}

impl fmt::Debug for Neo4jConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_NEO4J_URI.to_string(),
            username: DEFAULT_NEO4J_USERNAME.to_string(),
            password: DEFAULT_NEO4J_PASSWORD.to_string(),
            database: DEFAULT_NEO4J_DATABASE.to_string(),
            max_connections: DEFAULT_NEO4J_MAX_CONNECTIONS,
        }
    }
}

impl Neo4jConfig {
    /// Checks the parameters before a driver is built from them.
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        Ok(())
    }
}

impl AppConfig {
    /// Loads configuration for the named service from the environment.
    pub fn load_with_service(service_name: &str) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            service_name: service_name.to_string(),
            host: string("SERVER_HOST", DEFAULT_HOST),
            port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            neo4j: Neo4jConfig {
                uri: string("NEO4J_URI", DEFAULT_NEO4J_URI),
                username: string("NEO4J_USERNAME", DEFAULT_NEO4J_USERNAME),
                password: string("NEO4J_PASSWORD", DEFAULT_NEO4J_PASSWORD),
                database: string("NEO4J_DATABASE", DEFAULT_NEO4J_DATABASE),
                max_connections: lookup("NEO4J_MAX_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_NEO4J_MAX_CONNECTIONS),
            },
        }
    }

    /// `host:port` the listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loads `.env` from the working directory. Missing file is not an error and
/// variables already present in the environment win.
pub fn load_dotenv() {
    let Ok(content) = std::fs::read_to_string(".env") else {
        return;
    };

    for (key, value) in parse_dotenv(&content) {
        if std::env::var_os(key).is_none() {
            std::env::set_var(key, value);
        }
    }
}

fn parse_dotenv(content: &str) -> Vec<(&str, &str)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            (key.trim(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup("movie-service", lookup_from(&[]));
        assert_eq!(config.service_name, "movie-service");
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.neo4j.uri, "neo4j://neo4j:7687");
        assert_eq!(config.neo4j.username, "neo4j");
        assert_eq!(config.neo4j.password, "testing");
        assert_eq!(config.neo4j.database, "neo4j");
        assert!(config.neo4j.check().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(
            "movie-service",
            lookup_from(&[
                ("SERVER_PORT", "9090"),
                ("NEO4J_URI", "bolt://graph.internal:7687"),
                ("NEO4J_DATABASE", "movies"),
                ("NEO4J_MAX_CONNECTIONS", "4"),
            ]),
        );
        assert_eq!(config.port, 9090);
        assert_eq!(config.neo4j.uri, "bolt://graph.internal:7687");
        assert_eq!(config.neo4j.database, "movies");
        assert_eq!(config.neo4j.max_connections, 4);
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = AppConfig::from_lookup(
            "movie-service",
            lookup_from(&[("SERVER_PORT", "http"), ("NEO4J_MAX_CONNECTIONS", "-1")]),
        );
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.neo4j.max_connections, DEFAULT_NEO4J_MAX_CONNECTIONS);
    }

    #[test]
    fn test_check_rejects_bad_values() {
        let bad_uri = Neo4jConfig {
            uri: "http://localhost:7474".into(),
            ..Default::default()
        };
        assert!(bad_uri.check().is_err());

        let no_database = Neo4jConfig {
            database: String::new(),
            ..Default::default()
        };
        assert!(no_database.check().is_err());

        let no_pool = Neo4jConfig {
            max_connections: 0,
            ..Default::default()
        };
        assert!(no_pool.check().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", Neo4jConfig::default());
        assert!(!rendered.contains("testing"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_parse_dotenv() {
        let parsed = parse_dotenv("# comment\n\nNEO4J_URI = bolt://db:7687\nNEO4J_PASSWORD=\"s3cret\"\nbroken\n");
        assert_eq!(
            parsed,
            vec![("NEO4J_URI", "bolt://db:7687"), ("NEO4J_PASSWORD", "s3cret")]
        );
    }
}
