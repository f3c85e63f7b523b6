//! Runtime configuration.
//!
//! # Invariants
//! - Required keys are never defaulted; a missing key fails start-up.
//! - The signing secret is carried in [`AuthConfig`] and passed explicitly.
//! - Process environment variables take precedence over `.env` entries.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Dotenv file read by [`ApiConfig::from_env`], relative to the working directory.
pub const DOTENV_FILE: &str = ".env";

pub const ENV_KEY: &str = "GIZZMD_ENV";
pub const DB_PATH_KEY: &str = "GIZZMD_DB_PATH";
pub const LOG_LEVEL_KEY: &str = "GIZZMD_LOG_LEVEL";
pub const LOG_DIR_KEY: &str = "GIZZMD_LOG_DIR";
pub const JWT_SECRET_KEY: &str = "GIZZMD_JWT_SECRET";
pub const TOKEN_TTL_KEY: &str = "GIZZMD_TOKEN_TTL_SECS";

const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Configuration loading failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    /// The dotenv file exists but could not be read or parsed.
    EnvFile { path: PathBuf, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing required configuration `{key}`"),
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid value `{value}` for `{key}`: {reason}")
            }
            Self::EnvFile { path, reason } => {
                write!(f, "cannot load `{}`: {reason}", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Deployment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::Invalid {
                key: ENV_KEY,
                value: value.to_string(),
                reason: "expected development|production".to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Token signing settings.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub secret: String,
    pub token_ttl_secs: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub env: AppEnv,
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: String,
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Loads configuration from the process environment, falling back to
    /// `./.env` for keys the environment does not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_and_file(DOTENV_FILE)
    }

    /// Like [`ApiConfig::from_env`] with an explicit dotenv path. A missing
    /// file is not an error.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file_values = read_dotenv(path.as_ref())?;
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_values.get(key).cloned())
        })
    }

    /// Loads configuration through `lookup`. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let env = AppEnv::parse(&require(ENV_KEY)?)?;
        let db_path = PathBuf::from(require(DB_PATH_KEY)?);
        let log_level =
            get(LOG_LEVEL_KEY).unwrap_or_else(|| gizzmd_core::default_log_level().to_string());
        let log_dir = require(LOG_DIR_KEY)?;
        let secret = require(JWT_SECRET_KEY)?;
        let token_ttl_secs = match get(TOKEN_TTL_KEY) {
            None => DEFAULT_TOKEN_TTL_SECS,
            Some(raw) => parse_ttl(&raw)?,
        };

        Ok(Self {
            env,
            db_path,
            log_level,
            log_dir,
            auth: AuthConfig {
                secret,
                token_ttl_secs,
            },
        })
    }
}

fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let env_file_error = |reason: String| ConfigError::EnvFile {
        path: path.to_path_buf(),
        reason,
    };

    let entries = match dotenv::from_path_iter(path) {
        Ok(entries) => entries,
        Err(dotenv::Error::Io(err)) if err.kind() == ErrorKind::NotFound => {
            return Ok(HashMap::new());
        }
        Err(err) => return Err(env_file_error(err.to_string())),
    };

    entries
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(|err| env_file_error(err.to_string()))
}

fn parse_ttl(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: TOKEN_TTL_KEY,
        value: raw.to_string(),
        reason,
    };
    let ttl = raw.parse::<u64>().map_err(|err| invalid(err.to_string()))?;
    if ttl == 0 {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(ttl)
}

#[cfg(test)]
mod tests {
    use super::{ApiConfig, AppEnv, ConfigError, DEFAULT_TOKEN_TTL_SECS};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("GIZZMD_ENV", "development"),
        ("GIZZMD_DB_PATH", "/tmp/gizzmd.db"),
        ("GIZZMD_LOG_DIR", "/tmp/gizzmd-logs"),
        ("GIZZMD_JWT_SECRET", "s3cret"),
    ];

    #[test]
    fn loads_required_keys_and_defaults() {
        let config = ApiConfig::from_lookup(lookup_from(BASE)).unwrap();
        assert_eq!(config.env, AppEnv::Development);
        assert_eq!(config.db_path.to_str(), Some("/tmp/gizzmd.db"));
        assert_eq!(config.log_level, gizzmd_core::default_log_level());
        assert_eq!(config.auth.secret, "s3cret");
        assert_eq!(config.auth.token_ttl_secs, DEFAULT_TOKEN_TTL_SECS);
    }

    #[test]
    fn blank_secret_is_missing() {
        let mut pairs = BASE.to_vec();
        pairs[3] = ("GIZZMD_JWT_SECRET", "   ");
        let err = ApiConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("GIZZMD_JWT_SECRET"));
    }

    #[test]
    fn rejects_bad_env_and_ttl() {
        let mut pairs = BASE.to_vec();
        pairs[0] = ("GIZZMD_ENV", "staging");
        assert!(matches!(
            ApiConfig::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::Invalid { key: "GIZZMD_ENV", .. })
        ));

        let mut pairs = BASE.to_vec();
        pairs.push(("GIZZMD_TOKEN_TTL_SECS", "0"));
        assert!(matches!(
            ApiConfig::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::Invalid {
                key: "GIZZMD_TOKEN_TTL_SECS",
                ..
            })
        ));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = ApiConfig::from_lookup(lookup_from(BASE)).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
