use crate::errors::AuthError;
use crate::models::{TokenKind, TokenPair};
use crate::observability::record_token_refresh;
use crate::services::token_issuer::TokenIssuer;
use crate::services::token_validator::TokenValidator;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;

/// Exchanges a valid refresh token for a fresh token pair.
///
/// The presented refresh token is not consumed: it stays valid until its own
/// `exp`, and nothing records that it was used.
pub struct RefreshService {
    issuer: Arc<TokenIssuer>,
    validator: Arc<TokenValidator>,
}

impl RefreshService {
    pub fn new(issuer: Arc<TokenIssuer>, validator: Arc<TokenValidator>) -> Self {
        Self { issuer, validator }
    }

    /// Validate `refresh_token` at `now` and issue a new pair for the same
    /// principal, timestamped at `now`.
    ///
    /// # Errors
    ///
    /// Any validation error from [`TokenValidator::validate`], or
    /// `AuthError::WrongTokenKind` if an access token is presented.
    #[instrument(skip_all)]
    pub fn refresh(&self, refresh_token: &str, now: DateTime<Utc>) -> Result<TokenPair, AuthError> {
        let result = self.exchange(refresh_token, now);

        match &result {
            Ok(_) => record_token_refresh("success", None),
            Err(e) => {
                record_token_refresh("error", Some(e.code()));
                tracing::debug!(
                    target: "auth.refresh",
                    error_code = e.code(),
                    "Refresh rejected"
                );
            }
        }

        result
    }

    fn exchange(&self, refresh_token: &str, now: DateTime<Utc>) -> Result<TokenPair, AuthError> {
        let claims = self.validator.validate(refresh_token, now)?;

        if claims.token_type != TokenKind::Refresh {
            return Err(AuthError::WrongTokenKind {
                expected: TokenKind::Refresh,
                actual: claims.token_type,
            });
        }

        let principal = claims.principal();
        let pair = self.issuer.issue_pair(&principal, now)?;

        tracing::info!(
            target: "auth.refresh",
            user_id = %principal.user_id,
            "Token pair refreshed"
        );

        Ok(pair)
    }
}
