use shared_types::{AppConfig, FeatureFlags};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default path of the feature-flag file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_STATEMENT_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Errors raised while assembling the startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("failed to parse {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid database url: {0}")]
    DatabaseUrl(#[from] sqlx::Error),
}

/// Service settings, read once at startup and passed by reference to
/// whatever needs them.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub config_path: PathBuf,
    pub features: FeatureFlags,
}

impl ServiceConfig {
    /// Build the configuration from the process environment (after loading
    /// `.env` if present) and the feature-flag file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup. Tests pass a
    /// closure over a map instead of touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }
        let acquire_secs = parse_or(
            &lookup,
            "DATABASE_ACQUIRE_TIMEOUT_SECS",
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?;
        let statement_ms = parse_or(
            &lookup,
            "DATABASE_STATEMENT_TIMEOUT_MS",
            DEFAULT_STATEMENT_TIMEOUT_MS,
        )?;

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let config_path = PathBuf::from(
            lookup("CONFIG_PATH").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string()),
        );
        let features = load_feature_flags(&config_path)?;

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_secs),
            statement_timeout: Duration::from_millis(statement_ms),
            bind_addr,
            config_path,
            features,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
        }),
    }
}

/// Read the `[features]` table from `path`.
///
/// A missing file yields the defaults. A file that exists but does not parse
/// is a startup error.
pub fn load_feature_flags(path: &Path) -> Result<FeatureFlags, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_feature_flags(&contents).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        }),
        Err(e) => {
            tracing::info!(path = %path.display(), error = %e, "config file not found, using default feature flags");
            Ok(FeatureFlags::default())
        }
    }
}

pub fn parse_feature_flags(contents: &str) -> Result<FeatureFlags, toml::de::Error> {
    let config: AppConfig = toml::from_str(contents)?;
    Ok(config.features)
}
