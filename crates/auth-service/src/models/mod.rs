use chrono::{DateTime, Duration, Utc};
use common::types::Principal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::AuthError;

/// Role of a credential.
///
/// Carried as the signed `token_type` claim so an access token can never be
/// presented where a refresh token is required, or the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed token payload.
///
/// Timestamps are Unix seconds. Issued tokens satisfy `nbf <= iat < exp`.
/// The `username` field is redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub username: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub token_type: TokenKind,
}

impl Claims {
    /// Build claims for a token valid from `now` for `lifetime`.
    ///
    /// `now` is truncated to whole seconds.
    pub fn new(
        principal: &Principal,
        kind: TokenKind,
        lifetime: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, AuthError> {
        let lifetime_secs = lifetime.num_seconds();
        if lifetime_secs <= 0 {
            return Err(AuthError::InvalidLifetime(lifetime_secs));
        }

        let iat = now.timestamp();
        let exp = iat
            .checked_add(lifetime_secs)
            .ok_or(AuthError::InvalidLifetime(lifetime_secs))?;

        Ok(Self {
            user_id: principal.user_id.0,
            username: principal.username.clone(),
            iat,
            nbf: iat,
            exp,
            token_type: kind,
        })
    }

    /// The identity this token was issued to.
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.username.clone())
    }

    /// Seconds from `now` until expiry (negative once expired).
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        self.exp - now.timestamp()
    }
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("user_id", &self.user_id)
            .field("username", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("nbf", &self.nbf)
            .field("exp", &self.exp)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Access/refresh credential pair returned to callers.
///
/// Never stored server-side. Token strings are redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires.
    pub access_expires_in: i64,
    /// Seconds until the refresh token expires.
    pub refresh_expires_in: i64,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("access_expires_in", &self.access_expires_in)
            .field("refresh_expires_in", &self.refresh_expires_in)
            .finish()
    }
}
