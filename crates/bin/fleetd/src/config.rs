//! `fleet.toml` settings, overridden by `FLEET_*` and `RUST_LOG`.
//!
//! The file is optional; a missing section or key keeps its default.

use std::path::Path;

use serde::Deserialize;

use fleet_adapter_storage_sqlite_sqlx::DEFAULT_MAX_CONNECTIONS;

const CONFIG_FILE: &str = "fleet.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// `filter` uses `RUST_LOG` directive syntax.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Config {
    /// # Errors
    ///
    /// Fails on a malformed or unreadable `fleet.toml`, or when a pool size
    /// or port ends up as zero.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::read(Path::new(CONFIG_FILE))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    // FLEET_BIND beats FLEET_HOST/FLEET_PORT, RUST_LOG beats FLEET_LOG.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("FLEET_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("FLEET_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(bind) = lookup("FLEET_BIND")
            && let Some((host, port)) = bind.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(url) = lookup("FLEET_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(max) = lookup("FLEET_DATABASE_MAX_CONNECTIONS").and_then(|val| val.parse().ok())
        {
            self.database.max_connections = max;
        }
        if let Some(filter) = lookup("RUST_LOG").or_else(|| lookup("FLEET_LOG")) {
            self.logging.filter = filter;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be non-zero",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:fleet.db".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "fleetd=info,fleet_app=info,tower_http=debug".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed fleet.toml")]
    Parse(#[from] toml::de::Error),
    #[error("cannot read fleet.toml")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Validation(&'static str),
}
