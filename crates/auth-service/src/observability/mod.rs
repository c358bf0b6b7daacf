//! Observability module for the token service
//!
//! # Privacy by Default
//!
//! Instrumented functions use `#[instrument(skip_all)]` and explicit safe
//! field allow-listing. Fields are categorized as:
//! - **SAFE**: Can be logged in plaintext (token kind, error codes, user ids)
//! - **HASHED**: Must be SHA-256 hashed for correlation (usernames)
//! - **NEVER**: Must never appear in logs (token strings, signing secret)

pub mod metrics;

pub use metrics::{
    init_metrics_recorder, record_token_issuance, record_token_refresh, record_token_validation,
};

use common::config::LogFormat;
use sha2::{Digest, Sha256};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "auth_service=debug,tower_http=debug";

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// This is a one-way hash for correlating log entries, not a secret-safe
/// transform. The truncation limits reversibility.
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    hex::encode(result.get(..4).unwrap_or_default())
}

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}
