//! Builder patterns for test data construction
//!
//! Provides a fluent API for hand-crafting signed tokens with arbitrary
//! claims: future `nbf`, unknown kinds, foreign algorithms.

use crate::crypto_fixtures::hmac_sha256_segment;
use crate::test_ids::test_t0;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use common::types::Principal;
use serde_json::json;

/// Builder for creating signed test tokens
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::for_principal(&alice())
///     .kind("refresh")
///     .issued_at(test_t0())
///     .lifetime(Duration::hours(1))
///     .sign(TEST_SIGNING_SECRET);
/// ```
pub struct TestTokenBuilder {
    user_id: u64,
    username: String,
    iat: i64,
    nbf: i64,
    exp: i64,
    token_type: String,
    alg: String,
}

impl TestTokenBuilder {
    /// Create a builder for an access token issued at [`test_t0`] with a
    /// 15 minute lifetime
    pub fn for_principal(principal: &Principal) -> Self {
        let iat = test_t0().timestamp();
        Self {
            user_id: principal.user_id.0,
            username: principal.username.clone(),
            iat,
            nbf: iat,
            exp: iat + 15 * 60,
            token_type: "access".to_string(),
            alg: "HS256".to_string(),
        }
    }

    /// Set the `token_type` claim verbatim
    pub fn kind(mut self, token_type: &str) -> Self {
        self.token_type = token_type.to_string();
        self
    }

    /// Set `iat` and `nbf`, keeping the current lifetime
    pub fn issued_at(mut self, at: DateTime<Utc>) -> Self {
        let lifetime = self.exp - self.iat;
        self.iat = at.timestamp();
        self.nbf = self.iat;
        self.exp = self.iat + lifetime;
        self
    }

    /// Set `nbf` independently of `iat`
    pub fn not_before(mut self, at: DateTime<Utc>) -> Self {
        self.nbf = at.timestamp();
        self
    }

    /// Set `exp` relative to `iat`
    pub fn lifetime(mut self, lifetime: Duration) -> Self {
        self.exp = self.iat + lifetime.num_seconds();
        self
    }

    /// Set the header `alg` field
    pub fn algorithm(mut self, alg: &str) -> Self {
        self.alg = alg.to_string();
        self
    }

    /// Build the claims as a JSON value
    pub fn claims(&self) -> serde_json::Value {
        json!({
            "user_id": self.user_id,
            "username": self.username,
            "iat": self.iat,
            "nbf": self.nbf,
            "exp": self.exp,
            "token_type": self.token_type,
        })
    }

    /// Encode and sign with HMAC-SHA256 under `secret`
    pub fn sign(self, secret: &[u8]) -> String {
        let header = json!({ "typ": "JWT", "alg": self.alg });
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header.to_string()),
            URL_SAFE_NO_PAD.encode(self.claims().to_string())
        );
        let signature = hmac_sha256_segment(secret, &signing_input);
        format!("{signing_input}.{signature}")
    }
}
