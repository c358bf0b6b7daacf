//! Test server harness for E2E testing
//!
//! Provides `TestAuthServer` for spawning real token service instances in tests.

use crate::crypto_fixtures::TEST_SIGNING_SECRET;
use auth_service::config::Config;
use auth_service::errors::AuthError;
use auth_service::models::TokenPair;
use auth_service::observability::init_metrics_recorder;
use auth_service::routes::{self, AppState};
use chrono::Utc;
use common::types::Principal;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Test harness for spawning the token service in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_refresh_flow() -> Result<()> {
///     let server = TestAuthServer::spawn().await?;
///     let pair = server.issue_pair(&alice())?;
///
///     let response = reqwest::Client::new()
///         .post(format!("{}/api/v1/auth/refresh", server.url()))
///         .json(&serde_json::json!({ "refresh_token": pair.refresh_token }))
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestAuthServer {
    addr: SocketAddr,
    config: Config,
    state: Arc<AppState>,
    _handle: JoinHandle<()>,
}

impl TestAuthServer {
    /// Spawn a server with the test secret and default token lifetimes
    ///
    /// The server binds to a random available port (127.0.0.1:0) and runs
    /// in a background task until dropped.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_vars(HashMap::new()).await
    }

    /// Spawn a server with custom token lifetimes in seconds
    pub async fn spawn_with_lifetimes(
        access_seconds: i64,
        refresh_seconds: i64,
    ) -> Result<Self, anyhow::Error> {
        Self::spawn_with_vars(HashMap::from([
            (
                "ACCESS_TOKEN_TTL_SECONDS".to_string(),
                access_seconds.to_string(),
            ),
            (
                "REFRESH_TOKEN_TTL_SECONDS".to_string(),
                refresh_seconds.to_string(),
            ),
        ]))
        .await
    }

    async fn spawn_with_vars(mut vars: HashMap<String, String>) -> Result<Self, anyhow::Error> {
        vars.insert(
            "JWT_SECRET".to_string(),
            String::from_utf8(TEST_SIGNING_SECRET.to_vec())?,
        );
        vars.insert("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string());

        let config = Config::from_vars(&vars)
            .map_err(|e| anyhow::anyhow!("Failed to build test config: {}", e))?;

        let state = Arc::new(AppState::new(&config));

        // The global recorder can only be installed once per process; later
        // servers get a standalone handle that is never written to.
        let metrics_handle = match init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let recorder = PrometheusBuilder::new().build_recorder();
                recorder.handle()
            }
        };

        let app = routes::build_routes(Arc::clone(&state), metrics_handle);

        let listener = tokio::net::TcpListener::bind(&config.bind_address)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            state,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Issue a token pair for `principal` at the current time, as the
    /// (out of scope) login flow would
    pub fn issue_pair(&self, principal: &Principal) -> Result<TokenPair, AuthError> {
        self.state.issuer.issue_pair(principal, Utc::now())
    }
}

impl Drop for TestAuthServer {
    fn drop(&mut self) {
        self._handle.abort();
    }
}
