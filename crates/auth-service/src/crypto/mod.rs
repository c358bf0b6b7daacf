//! Signing secret and HS256 token primitives.
//!
//! Tokens are compact JWTs: `base64url(header).base64url(claims).base64url(hmac)`,
//! where the HMAC is HMAC-SHA256 over the first two segments. Signing and
//! verification go through `jsonwebtoken`, which compares signatures in
//! constant time.

use crate::config::ConfigError;
use crate::errors::AuthError;
use crate::models::Claims;
use common::secret::{ExposeSecret, SecretBox};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::fmt;
use tracing::instrument;

/// Minimum accepted signing secret length in bytes.
///
/// HMAC-SHA256 keys shorter than the hash output weaken the MAC.
pub const MIN_SECRET_BYTES: usize = 32;

/// The only signing algorithm this service issues or accepts.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Process-wide symmetric signing secret.
///
/// Constructed once at startup from configuration and handed by reference to
/// the issuer and validator. The bytes are held in a `SecretBox` and are
/// redacted in Debug output.
pub struct SigningSecret {
    key: SecretBox<Vec<u8>>,
}

impl SigningSecret {
    /// Wrap raw secret bytes.
    ///
    /// # Errors
    ///
    /// - `ConfigError::SecretUnconfigured` if `bytes` is empty
    /// - `ConfigError::WeakSecret` if shorter than [`MIN_SECRET_BYTES`]
    pub fn new(bytes: Vec<u8>) -> Result<Self, ConfigError> {
        if bytes.is_empty() {
            return Err(ConfigError::SecretUnconfigured);
        }

        if bytes.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::WeakSecret {
                actual: bytes.len(),
                minimum: MIN_SECRET_BYTES,
            });
        }

        Ok(Self {
            key: SecretBox::new(Box::new(bytes)),
        })
    }

    /// Raw secret bytes.
    pub fn expose(&self) -> &[u8] {
        self.key.expose_secret().as_slice()
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.expose())
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.expose())
    }
}

impl Clone for SigningSecret {
    fn clone(&self) -> Self {
        Self {
            key: SecretBox::new(Box::new(self.key.expose_secret().clone())),
        }
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Header written into every issued token: `{"typ":"JWT","alg":"HS256"}`.
pub fn token_header() -> Header {
    Header::new(TOKEN_ALGORITHM)
}

/// Validation settings for signature-only verification.
///
/// Temporal checks are disabled here because they are applied against an
/// explicit `now` by the token validator, not against the system clock.
pub fn signature_validation() -> Validation {
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.required_spec_claims.clear();
    validation
}

/// Sign claims into a compact token.
#[instrument(skip_all)]
pub fn sign_claims(
    claims: &Claims,
    header: &Header,
    key: &EncodingKey,
) -> Result<String, AuthError> {
    encode(header, claims, key)
        .map_err(|e| AuthError::Crypto(format!("Token signing operation failed: {}", e)))
}

/// Verify the signature of a compact token and decode its claims.
///
/// `jsonwebtoken` checks the header algorithm, then the signature, and only
/// then deserializes the payload, so no claims content is read from an
/// unauthenticated token.
#[instrument(skip_all)]
pub fn verify_signature(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
) -> Result<Claims, AuthError> {
    decode::<Claims>(token, key, validation)
        .map(|data| data.claims)
        .map_err(|e| {
            let error = match e.kind() {
                ErrorKind::InvalidSignature => AuthError::BadSignature,
                _ => AuthError::Malformed,
            };
            tracing::debug!(target: "crypto", error = %e, "Token verification failed");
            error
        })
}
