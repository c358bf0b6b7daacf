use crate::errors::AuthError;
use crate::middleware::PrincipalExt;
use crate::models::TokenPair;
use crate::routes::AppState;
use axum::{
    extract::{Request, State},
    Json,
};
use chrono::Utc;
use common::secret::{ExposeSecret, SecretString};
use common::types::UserId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// Body of a refresh request.
///
/// The token is held as a `SecretString` so it never reaches Debug output.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: SecretString,
}

/// Handle refresh request
///
/// POST /api/v1/auth/refresh
///
/// Exchanges a valid refresh token for a new access/refresh pair. The
/// presented token stays valid until its own expiry.
#[instrument(skip_all, name = "auth.handlers.refresh")]
pub async fn handle_refresh(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, AuthError> {
    let pair = state
        .refresh_service
        .refresh(payload.refresh_token.expose_secret(), Utc::now())?;

    Ok(Json(pair))
}

/// Response for `/api/v1/auth/me`.
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user_id: UserId,
    pub username: String,
}

/// Handler for GET /api/v1/auth/me
///
/// Returns the principal recovered from the bearer access token. Without the
/// auth middleware in front there is no principal and the request is
/// rejected as unauthenticated.
#[instrument(skip_all, name = "auth.handlers.me")]
pub async fn handle_me(req: Request) -> Result<Json<MeResponse>, AuthError> {
    let principal = req.principal().ok_or(AuthError::MissingCredentials)?;

    Ok(Json(MeResponse {
        user_id: principal.user_id,
        username: principal.username.clone(),
    }))
}
