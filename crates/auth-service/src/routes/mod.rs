//! HTTP routes for the token service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use crate::middleware::{require_auth, AuthState};
use crate::services::{RefreshService, TokenIssuer, TokenValidator};
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
///
/// Built once from [`Config`]; every member is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<TokenIssuer>,
    pub validator: Arc<TokenValidator>,
    pub refresh_service: Arc<RefreshService>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let issuer = Arc::new(TokenIssuer::new(
            &config.signing_secret,
            config.token_lifetimes,
        ));
        let validator = Arc::new(TokenValidator::new(&config.signing_secret));
        let refresh_service = Arc::new(RefreshService::new(
            Arc::clone(&issuer),
            Arc::clone(&validator),
        ));

        Self {
            issuer,
            validator,
            refresh_service,
        }
    }
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/health` - Liveness probe
/// - `/metrics` - Prometheus scrape endpoint
/// - `/api/v1/auth/refresh` - Refresh token exchange
/// - `/api/v1/auth/me` - Authenticated principal (bearer access token required)
/// - TraceLayer for request logging
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let auth_state = Arc::new(AuthState {
        validator: Arc::clone(&state.validator),
    });

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/v1/auth/refresh", post(handlers::handle_refresh))
        .with_state(Arc::clone(&state));

    // Metrics route has its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Protected routes; the gate runs only for matched routes
    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(handlers::handle_me))
        .route_layer(from_fn_with_state(auth_state, require_auth));

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    public_routes
        .merge(metrics_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
