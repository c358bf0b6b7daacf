//! Authentication gate for protected routes.
//!
//! Extracts the Bearer token from the Authorization header, validates it
//! against the current wall clock, and injects the recovered [`Principal`]
//! into request extensions.

use crate::errors::AuthError;
use crate::models::TokenKind;
use crate::services::TokenValidator;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use common::types::Principal;
use std::sync::Arc;
use tracing::instrument;

const BEARER_PREFIX: &str = "Bearer ";

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<TokenValidator>,
}

/// Resolve an `Authorization` header value to a principal at `now`.
///
/// Only access tokens are accepted; a refresh token presented here fails
/// with `WrongTokenKind`.
pub fn authenticate_bearer(
    validator: &TokenValidator,
    header: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Principal, AuthError> {
    let header = header.ok_or_else(|| {
        tracing::debug!(target: "auth.middleware", "Missing Authorization header");
        AuthError::MissingCredentials
    })?;

    let token = header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        tracing::debug!(target: "auth.middleware", "Invalid Authorization header format");
        AuthError::MissingCredentials
    })?;

    let claims = validator.validate(token, now)?;

    if claims.token_type != TokenKind::Access {
        tracing::debug!(
            target: "auth.middleware",
            token_type = %claims.token_type,
            "Non-access token presented as bearer credential"
        );
        return Err(AuthError::WrongTokenKind {
            expected: TokenKind::Access,
            actual: claims.token_type,
        });
    }

    Ok(claims.principal())
}

/// Authentication middleware that validates bearer access tokens.
///
/// # Response
///
/// - 401 Unauthorized with `WWW-Authenticate: Bearer` if the token is
///   missing or invalid; the downstream handler is not invoked
/// - Otherwise continues with the [`Principal`] in request extensions
#[instrument(skip_all, name = "auth.middleware.require_auth")]
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let principal = authenticate_bearer(&state.validator, header, Utc::now())?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Extension trait for reading the authenticated principal from a request.
pub trait PrincipalExt {
    /// Returns `None` if the auth middleware was not applied to this request.
    fn principal(&self) -> Option<&Principal>;
}

impl<B> PrincipalExt for axum::extract::Request<B> {
    fn principal(&self) -> Option<&Principal> {
        self.extensions().get::<Principal>()
    }
}
