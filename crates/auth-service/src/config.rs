use crate::crypto::SigningSecret;
use chrono::Duration;
use common::config::{LogFormat, ObservabilityConfig};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Environment variable holding the HMAC signing secret.
pub const SECRET_ENV_VAR: &str = "JWT_SECRET";

/// Default bind address for the HTTP listener.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default access token lifetime (15 minutes).
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 15 * 60;

/// Default refresh token lifetime (7 days).
pub const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Upper bound for any configured token lifetime (1 year).
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub signing_secret: SigningSecret,
    pub token_lifetimes: TokenLifetimes,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Signing secret is not configured: set JWT_SECRET")]
    SecretUnconfigured,

    #[error("Signing secret too short: {actual} bytes (minimum {minimum})")]
    WeakSecret { actual: usize, minimum: usize },

    #[error("Invalid token lifetime: {0}")]
    InvalidTokenLifetime(String),

    #[error("Invalid log format: {0}")]
    InvalidLogFormat(String),
}

/// Access and refresh token lifetimes.
///
/// Both are stored as whole seconds, since that is the resolution of the
/// `iat`/`exp` claims. Both are at least one second and the access lifetime
/// is strictly shorter than the refresh lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    access: Duration,
    refresh: Duration,
}

impl TokenLifetimes {
    /// Sub-second remainders are truncated before the checks run.
    pub fn new(access: Duration, refresh: Duration) -> Result<Self, ConfigError> {
        let access_seconds = access.num_seconds();
        let refresh_seconds = refresh.num_seconds();

        if access_seconds < 1 || refresh_seconds < 1 {
            return Err(ConfigError::InvalidTokenLifetime(format!(
                "token lifetimes must be at least one whole second, got {}ms and {}ms",
                access.num_milliseconds(),
                refresh.num_milliseconds()
            )));
        }

        if access_seconds >= refresh_seconds {
            return Err(ConfigError::InvalidTokenLifetime(format!(
                "access lifetime ({access_seconds}s) must be shorter than refresh lifetime ({refresh_seconds}s)"
            )));
        }

        Ok(Self {
            access: Duration::seconds(access_seconds),
            refresh: Duration::seconds(refresh_seconds),
        })
    }

    pub fn access(&self) -> Duration {
        self.access
    }

    pub fn refresh(&self) -> Duration {
        self.refresh
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECONDS),
            refresh: Duration::seconds(DEFAULT_REFRESH_TOKEN_TTL_SECONDS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let signing_secret = vars
            .get(SECRET_ENV_VAR)
            .ok_or(ConfigError::SecretUnconfigured)
            .and_then(|raw| SigningSecret::new(raw.as_bytes().to_vec()))?;

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let access = parse_ttl(
            vars,
            "ACCESS_TOKEN_TTL_SECONDS",
            DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
        )?;
        let refresh = parse_ttl(
            vars,
            "REFRESH_TOKEN_TTL_SECONDS",
            DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
        )?;
        let token_lifetimes = TokenLifetimes::new(access, refresh)?;

        let log_format = match vars.get("LOG_FORMAT") {
            Some(value) => value
                .parse::<LogFormat>()
                .map_err(ConfigError::InvalidLogFormat)?,
            None => LogFormat::default(),
        };

        Ok(Config {
            bind_address,
            signing_secret,
            token_lifetimes,
            observability: ObservabilityConfig { log_format },
        })
    }
}

fn parse_ttl(
    vars: &HashMap<String, String>,
    name: &str,
    default_seconds: i64,
) -> Result<Duration, ConfigError> {
    let seconds = match vars.get(name) {
        Some(value) => value.trim().parse::<i64>().map_err(|e| {
            ConfigError::InvalidTokenLifetime(format!("{name} must be an integer: {e}"))
        })?,
        None => default_seconds,
    };

    if seconds <= 0 || seconds > MAX_TOKEN_TTL_SECONDS {
        return Err(ConfigError::InvalidTokenLifetime(format!(
            "{name} must be between 1 and {MAX_TOKEN_TTL_SECONDS}, got {seconds}"
        )));
    }

    Ok(Duration::seconds(seconds))
}
