//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions over a token's decoded header and claims.
//! They inspect structure only; signature checks belong to the validator.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// Token claims structure
#[derive(Debug, Deserialize)]
struct JwtClaims {
    pub user_id: u64,
    pub username: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub token_type: String,
}

fn decode_segment(token: &str, index: usize) -> Vec<u8> {
    let segment = token
        .split('.')
        .nth(index)
        .unwrap_or_else(|| panic!("Token has no segment {index}"));
    URL_SAFE_NO_PAD
        .decode(segment)
        .unwrap_or_else(|e| panic!("Segment {index} is not base64url: {e}"))
}

fn decode_claims(token: &str) -> JwtClaims {
    serde_json::from_slice(&decode_segment(token, 1)).expect("Failed to parse token claims")
}

/// Custom assertions for issued tokens
///
/// # Example
/// ```rust,ignore
/// pair.access_token
///     .assert_valid_jwt()
///     .assert_token_kind("access")
///     .assert_lifetime(900);
/// ```
pub trait TokenAssertions {
    /// Assert three segments, an HS256/JWT header and well-formed claims
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert the `token_type` claim
    fn assert_token_kind(&self, kind: &str) -> &Self;

    /// Assert the embedded principal
    fn assert_for_principal(&self, user_id: u64, username: &str) -> &Self;

    /// Assert `exp - iat` equals `seconds`
    fn assert_lifetime(&self, seconds: i64) -> &Self;
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        let header: JwtHeader = serde_json::from_slice(&decode_segment(self, 0))
            .expect("Failed to parse JWT header JSON");
        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        let claims = decode_claims(self);
        assert!(
            claims.nbf <= claims.iat && claims.iat < claims.exp,
            "Expected nbf <= iat < exp, got nbf={} iat={} exp={}",
            claims.nbf,
            claims.iat,
            claims.exp
        );

        assert_eq!(
            decode_segment(self, 2).len(),
            32,
            "Expected a 32-byte HMAC-SHA256 signature"
        );

        self
    }

    fn assert_token_kind(&self, kind: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.token_type, kind,
            "Expected token kind '{}', got '{}'",
            kind, claims.token_type
        );
        self
    }

    fn assert_for_principal(&self, user_id: u64, username: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(claims.user_id, user_id, "Unexpected user_id");
        assert_eq!(claims.username, username, "Unexpected username");
        self
    }

    fn assert_lifetime(&self, seconds: i64) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.exp - claims.iat,
            seconds,
            "Expected lifetime of {} seconds, got {}",
            seconds,
            claims.exp - claims.iat
        );
        self
    }
}
