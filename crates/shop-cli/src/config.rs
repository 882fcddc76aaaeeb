//! Application configuration.
//!
//! Loaded from a TOML file, then overridden by environment variables.
//! Command-line flags override both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use shop_graph::GraphConfig;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "shop.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub graph: GraphConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 3000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file holding customer accounts.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("data/customers.db") }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self { url: "redis://127.0.0.1:6379".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Directory uploaded images are written to.
    pub dir: PathBuf,
    /// URL prefix for stored images.
    pub base_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("data/media"), base_url: "/media".to_string() }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `shop.toml` is read if
    /// present, otherwise defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup("SHOP_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SHOP_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid SHOP_PORT value: {}", port))?;
        }
        if let Some(path) = lookup("SHOP_DB_PATH") {
            self.database.path = PathBuf::from(path);
        }
        if let Some(url) = lookup("REDIS_URL") {
            self.redis.url = url;
        }
        if let Some(uri) = lookup("NEO4J_URI") {
            self.graph.uri = uri;
        }
        if let Some(user) = lookup("NEO4J_USER") {
            self.graph.user = user;
        }
        if let Some(password) = lookup("NEO4J_PASSWORD") {
            self.graph.password = password;
        }
        if let Some(dir) = lookup("SHOP_MEDIA_DIR") {
            self.media.dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("SHOP_MEDIA_URL") {
            self.media.base_url = url;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.redis.url, "redis://127.0.0.1:6379");
        assert_eq!(config.graph.uri, "bolt://localhost:7687");
        assert_eq!(config.media.base_url, "/media");
    }

    #[test]
    fn test_partial_file() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [graph]
            uri = "bolt://graph:7687"
            password = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.graph.uri, "bolt://graph:7687");
        assert_eq!(config.graph.user, "neo4j");
        assert_eq!(config.database.path, PathBuf::from("data/customers.db"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SHOP_PORT", "4000"),
            ("REDIS_URL", "redis://cache:6379"),
            ("NEO4J_PASSWORD", "pw"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.redis.url, "redis://cache:6379");
        assert_eq!(config.graph.password, "pw");
        assert_eq!(config.graph.user, "neo4j");
    }

    #[test]
    fn test_bad_port_is_error() {
        let mut config = AppConfig::default();
        assert!(config.apply_env(|key| (key == "SHOP_PORT").then(|| "http".to_string())).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/shop.toml"))).is_err());
    }
}
