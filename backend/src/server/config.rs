//! Server settings loaded via OrthoConfig.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The pool was configured with zero connections.
    #[error("BLOODBANK_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    /// The bind address did not parse as a socket address.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The pool was configured with zero connections.
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
}

/// Listener and database settings, read from `BLOODBANK_*` variables,
/// configuration files and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOODBANK")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Socket address to bind, defaulting to `0.0.0.0:5000`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .trim()
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Trimmed database URL, which must be present.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Pool size, defaulting to 10 and never zero.
    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS) {
            0 => Err(SettingsError::ZeroConnections),
            size => Ok(size),
        }
    }
}
