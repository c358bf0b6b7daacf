use crate::crypto::{self, SigningSecret};
use crate::errors::AuthError;
use crate::models::Claims;
use crate::observability::record_token_validation;
use chrono::{DateTime, Utc};
use common::jwt::split_compact;
use jsonwebtoken::{DecodingKey, Validation};
use tracing::instrument;

/// Verifies presented tokens and recovers their claims.
///
/// Validation is a pure function of the token, the secret and `now`; no
/// store is consulted, so a token cannot be revoked before it expires.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            decoding_key: secret.decoding_key(),
            validation: crypto::signature_validation(),
        }
    }

    /// Validate `token` at instant `now`.
    ///
    /// Checks run in this order, and the first failure wins:
    /// 1. structure: three non-empty base64url segments within the size limit
    /// 2. header algorithm and HMAC signature
    /// 3. claims parsing
    /// 4. `now < nbf` → `NotYetValid`, `now >= exp` → `Expired`
    #[instrument(skip_all)]
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let result = self.check(token, now);

        match &result {
            Ok(claims) => {
                record_token_validation("success", None);
                tracing::debug!(
                    target: "auth.token.validator",
                    user_id = claims.user_id,
                    token_type = %claims.token_type,
                    "Token validated"
                );
            }
            Err(e) => {
                record_token_validation("error", Some(e.code()));
                tracing::debug!(
                    target: "auth.token.validator",
                    error_code = e.code(),
                    "Token rejected"
                );
            }
        }

        result
    }

    fn check(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        split_compact(token).map_err(|_| AuthError::Malformed)?;

        let claims = crypto::verify_signature(token, &self.decoding_key, &self.validation)?;

        let now = now.timestamp();
        if now < claims.nbf {
            return Err(AuthError::NotYetValid);
        }
        if now >= claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}
