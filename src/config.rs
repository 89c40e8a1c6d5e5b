//! Configuration types.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// What a full update does when the body carries an `id` different from the
/// path `id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdMismatchPolicy {
    /// The path id wins; the body id is ignored.
    #[default]
    Override,
    /// The request is rejected with 400.
    Reject,
}

impl FromStr for IdMismatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "override" => Ok(Self::Override),
            "reject" => Ok(Self::Reject),
            other => Err(format!("expected 'override' or 'reject', got '{other}'")),
        }
    }
}

/// Which origins may call the API cross-origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    #[default]
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// SQLite database file (`:memory:` for a throwaway database).
    pub db_path: PathBuf,
    /// Full-update id mismatch behaviour.
    pub id_mismatch: IdMismatchPolicy,
    /// CORS allowed origins.
    pub cors_origins: CorsOrigins,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            db_path: PathBuf::from("./data/todo-app.db"),
            id_mismatch: IdMismatchPolicy::Override,
            cors_origins: CorsOrigins::Any,
        }
    }
}

impl ServerConfig {
    /// Read configuration from `TODO_API_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to
    /// defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("TODO_API_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "TODO_API_PORT".to_string(),
                message: format!("{e}"),
            })?,
            None => defaults.port,
        };

        let id_mismatch = match lookup("TODO_API_ID_MISMATCH") {
            Some(raw) => raw
                .parse::<IdMismatchPolicy>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "TODO_API_ID_MISMATCH".to_string(),
                    message,
                })?,
            None => defaults.id_mismatch,
        };

        Ok(Self {
            host: lookup("TODO_API_HOST").unwrap_or(defaults.host),
            port,
            db_path: lookup("TODO_API_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            id_mismatch,
            cors_origins: lookup("TODO_API_CORS_ORIGINS")
                .map(|raw| CorsOrigins::parse(&raw))
                .unwrap_or(defaults.cors_origins),
        })
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
