//! Process configuration from environment variables, optionally seeded from `.env`.
//!
//! Database: `DIALECT`, `HOST`, `DBPORT`, `USER`, `NAME`, `PASSWORD`.
//! Server: `LISTEN_ADDR`, `DB_MAX_CONNECTIONS`, `SEED_DEMO`.

use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Storage backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    /// In-process store; nothing survives a restart.
    Memory,
}

impl std::str::FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "memory" => Ok(Dialect::Memory),
            _ => Err(ConfigError::UnsupportedDialect(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub dialect: Dialect,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub name: String,
    pub password: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Key/value connection string: `host=.. user=.. dbname=.. sslmode=disable password=.. port=..`.
    pub fn dsn(&self) -> String {
        self.render_dsn(&self.password)
    }

    /// [`DbConfig::dsn`] with the password masked, for logs.
    pub fn redacted_dsn(&self) -> String {
        self.render_dsn("***")
    }

    fn render_dsn(&self, password: &str) -> String {
        format!(
            "host={} user={} dbname={} sslmode=disable password={} port={}",
            self.host, self.user, self.name, password, self.port
        )
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db: DbConfig,
    pub listen_addr: String,
    pub seed_demo: bool,
}

/// Apply `.env` from the working directory (or a parent) to the process environment.
/// Variables already set win. Must run before the tracing subscriber reads `RUST_LOG`.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Apply a specific env file; `None` if it cannot be read or parsed.
pub fn load_dotenv_from(path: &Path) -> Option<PathBuf> {
    dotenvy::from_path(path).ok().map(|()| path.to_path_buf())
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let get = |key: &'static str| get(key).filter(|v| !v.trim().is_empty());

        let dialect: Dialect = match get("DIALECT") {
            Some(d) => d.parse()?,
            None => Dialect::Postgres,
        };
        let required = |key: &'static str| -> Result<String, ConfigError> {
            match dialect {
                Dialect::Postgres => get(key).ok_or(ConfigError::Missing(key)),
                Dialect::Memory => Ok(get(key).unwrap_or_default()),
            }
        };
        let host = required("HOST")?;
        let user = required("USER")?;
        let name = required("NAME")?;
        let port = parse_or("DBPORT", get("DBPORT"), DEFAULT_DB_PORT)?;
        let max_connections =
            parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?;

        let seed_demo = match get("SEED_DEMO") {
            None => false,
            Some(v) => match v.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::Invalid { var: "SEED_DEMO", value: v }),
            },
        };

        Ok(AppConfig {
            db: DbConfig {
                dialect,
                host,
                port,
                user,
                name,
                password: get("PASSWORD").unwrap_or_default(),
                max_connections,
            },
            listen_addr: get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into()),
            seed_demo,
        })
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { var, value: v }),
    }
}
