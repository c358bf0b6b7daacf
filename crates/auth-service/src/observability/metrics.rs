//! Metrics definitions for the token service
//!
//! All metrics follow Prometheus naming conventions:
//! - `auth_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `token_type`: 2 values (access, refresh)
//! - `status`: 2 values (success, error)
//! - `error_code`: bounded by `AuthError::code` (8 values) plus `none`

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the global Prometheus recorder.
///
/// Returns an error if a recorder is already installed in this process.
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        // Signing is sub-millisecond; buckets resolve down to 50µs
        .set_buckets_for_metric(
            Matcher::Prefix("auth_token_issuance".to_string()),
            &[
                0.000_05, 0.000_1, 0.000_25, 0.000_5, 0.001, 0.002_5, 0.005, 0.010, 0.050,
            ],
        )
        .map_err(|e| format!("Failed to set token issuance buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// Token Metrics
// ============================================================================

/// Record token issuance duration and outcome
///
/// Metric: `auth_token_issuance_duration_seconds`, `auth_token_issuance_total`
/// Labels: `token_type`, `status`
pub fn record_token_issuance(token_type: &str, status: &str, duration: Duration) {
    histogram!("auth_token_issuance_duration_seconds", "token_type" => token_type.to_string(), "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("auth_token_issuance_total", "token_type" => token_type.to_string(), "status" => status.to_string())
        .increment(1);
}

/// Record token validation result
///
/// Metric: `auth_token_validations_total`
/// Labels: `status`, `error_code`
pub fn record_token_validation(status: &str, error_code: Option<&str>) {
    let code = error_code.unwrap_or("none");
    counter!("auth_token_validations_total", "status" => status.to_string(), "error_code" => code.to_string())
        .increment(1);
}

/// Record refresh exchange result
///
/// Metric: `auth_token_refresh_total`
/// Labels: `status`, `error_code`
pub fn record_token_refresh(status: &str, error_code: Option<&str>) {
    let code = error_code.unwrap_or("none");
    counter!("auth_token_refresh_total", "status" => status.to_string(), "error_code" => code.to_string())
        .increment(1);
}
