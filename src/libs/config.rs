//! Process configuration, read from environment variables with development
//! defaults.

use std::net::SocketAddr;

use crate::error::{AppError, AppResult};

pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/caregivers_platform";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,

    /// Interface the HTTP server binds to.
    pub bind_host: String,

    pub port: u16,

    /// Upper bound of pooled store connections.
    pub max_connections: u32,

    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_host: "0.0.0.0".to_string(),
            port: 5001,
            max_connections: 5,
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Reads the configuration.
    ///
    /// Environment variables:
    /// - `DATABASE_URL`: store connection string
    /// - `CAREGRID_BIND`: bind host (default: 0.0.0.0)
    /// - `PORT`: listen port (default: 5001)
    /// - `CAREGRID_DB_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `CAREGRID_LOG_JSON`: "true" or "false" (default: false)
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("invalid PORT value: {raw}")))?,
            None => defaults.port,
        };

        let max_connections = match lookup("CAREGRID_DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| AppError::Config(format!("invalid CAREGRID_DB_MAX_CONNECTIONS value: {raw}")))?,
            None => defaults.max_connections,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_host: lookup("CAREGRID_BIND").unwrap_or(defaults.bind_host),
            port,
            max_connections,
            log_json: lookup("CAREGRID_LOG_JSON")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(defaults.log_json),
        })
    }

    pub fn bind_addr(&self) -> AppResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("invalid bind address {addr}: {e}")))
    }

    /// The database URL with its credentials hidden.
    pub fn masked_database_url(&self) -> String {
        mask_credentials(&self.database_url)
    }
}

/// Replaces everything up to the last `@` with `***:***`, keeping the scheme.
pub fn mask_credentials(url: &str) -> String {
    let Some((_, host)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match url.split_once("://") {
        Some((scheme, _)) => format!("{scheme}://***:***@{host}"),
        None => format!("***:***@{host}"),
    }
}
