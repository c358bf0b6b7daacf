//! Liveness probe.

use tracing::instrument;

/// Handler for GET /health
///
/// The service has no external dependencies, so liveness is the only signal.
#[instrument(skip_all, name = "auth.health.check")]
pub async fn health_check() -> &'static str {
    "OK"
}
