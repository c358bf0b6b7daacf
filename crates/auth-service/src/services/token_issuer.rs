use crate::config::TokenLifetimes;
use crate::crypto::{self, SigningSecret};
use crate::errors::AuthError;
use crate::models::{Claims, TokenKind, TokenPair};
use crate::observability::{hash_for_correlation, record_token_issuance};
use chrono::{DateTime, Duration, Utc};
use common::types::Principal;
use jsonwebtoken::{EncodingKey, Header};
use std::time::Instant;
use tracing::instrument;

/// Creates signed access and refresh tokens.
///
/// Holds only the immutable encoding key and lifetime policy; safe to share
/// across request tasks behind an `Arc`.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    header: Header,
    lifetimes: TokenLifetimes,
}

impl TokenIssuer {
    pub fn new(secret: &SigningSecret, lifetimes: TokenLifetimes) -> Self {
        Self {
            encoding_key: secret.encoding_key(),
            header: crypto::token_header(),
            lifetimes,
        }
    }

    pub fn lifetimes(&self) -> &TokenLifetimes {
        &self.lifetimes
    }

    /// Issue a single token of `kind` valid from `now` for `lifetime`.
    #[instrument(skip_all, fields(token_type = %kind))]
    pub fn issue(
        &self,
        principal: &Principal,
        kind: TokenKind,
        lifetime: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let start = Instant::now();

        let result = Claims::new(principal, kind, lifetime, now)
            .and_then(|claims| crypto::sign_claims(&claims, &self.header, &self.encoding_key));

        let status = if result.is_ok() { "success" } else { "error" };
        record_token_issuance(kind.as_str(), status, start.elapsed());

        match &result {
            Ok(_) => tracing::debug!(
                target: "auth.token.issuer",
                user_id = %principal.user_id,
                username_hash = %hash_for_correlation(&principal.username),
                lifetime_secs = lifetime.num_seconds(),
                "Token issued"
            ),
            Err(e) => tracing::warn!(
                target: "auth.token.issuer",
                user_id = %principal.user_id,
                error = %e,
                "Token issuance failed"
            ),
        }

        result
    }

    /// Issue an access token and a refresh token for the same principal and
    /// instant.
    #[instrument(skip_all)]
    pub fn issue_pair(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError> {
        let access_token = self.issue(principal, TokenKind::Access, self.lifetimes.access(), now)?;
        let refresh_token =
            self.issue(principal, TokenKind::Refresh, self.lifetimes.refresh(), now)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.lifetimes.access().num_seconds(),
            refresh_expires_in: self.lifetimes.refresh().num_seconds(),
        })
    }
}
