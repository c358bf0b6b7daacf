//! Deterministic cryptographic fixtures for testing
//!
//! Provides a fixed signing secret and an HMAC-SHA256 signer that does not
//! go through the service's own signing path, so tests can check issued
//! tokens against an independent implementation and craft tokens the
//! issuer would refuse to produce.

use auth_service::crypto::SigningSecret;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use common::jwt::split_compact;
use ring::hmac;

/// Fixed 48-byte signing secret used by every test server.
pub const TEST_SIGNING_SECRET: &[u8] = b"test-signing-secret-do-not-use-in-production-48b";

/// A second, unrelated secret for "signed by someone else" cases.
pub const OTHER_SIGNING_SECRET: &[u8] = b"another-secret-that-the-server-never-trusts-1234";

/// The test secret wrapped as the service type.
pub fn test_signing_secret() -> SigningSecret {
    SigningSecret::new(TEST_SIGNING_SECRET.to_vec()).expect("test secret meets minimum length")
}

/// Compute the base64url signature segment for `signing_input`
/// (`header.payload`) under `secret`.
pub fn hmac_sha256_segment(secret: &[u8], signing_input: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
    let tag = hmac::sign(&key, signing_input.as_bytes());
    URL_SAFE_NO_PAD.encode(tag.as_ref())
}

/// Re-sign an existing token's header and payload under `secret`.
pub fn resign(token: &str, secret: &[u8]) -> String {
    let signing_input = split_compact(token)
        .expect("token is structurally valid")
        .signing_input();
    let signature = hmac_sha256_segment(secret, &signing_input);
    format!("{signing_input}.{signature}")
}
