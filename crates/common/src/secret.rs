//! Secret types for protecting sensitive values from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate. Use these types
//! for every value that would let a reader mint or replay credentials: the
//! token signing secret, bearer tokens, and refresh tokens received in
//! request bodies.
//!
//! # Compile-Time Safety
//!
//! `SecretBox<T>` and `SecretString` implement `Debug` with redaction, so any
//! struct deriving `Debug` that holds one is safe to pass to `{:?}` or to a
//! `tracing` field.
//!
//! # Memory Safety
//!
//! Secrets are zeroized when dropped.
//!
//! # Example
//!
//! ```rust
//! use common::secret::SecretString;
//! use secrecy::ExposeSecret;
//!
//! #[derive(Debug)]
//! struct RefreshRequest {
//!     refresh_token: SecretString,  // Debug shows "[REDACTED]"
//! }
//!
//! let req = RefreshRequest {
//!     refresh_token: SecretString::from("eyJhbGciOiJIUzI1NiJ9.e30.sig"),
//! };
//!
//! println!("{:?}", req);
//!
//! // Access requires an explicit call
//! let token: &str = req.refresh_token.expose_secret();
//! ```
//!
//! # Usage Guidelines
//!
//! Use `SecretString` for:
//! - Bearer tokens and refresh tokens
//! - Secrets read from the environment as text
//!
//! Use `SecretBox<T>` for:
//! - Binary key material (e.g., `SecretBox<Vec<u8>>` for the HMAC signing key)
//!
//! # Serde Integration
//!
//! With the `serde` feature enabled, secrets can be deserialized from JSON:
//!
//! ```rust
//! use serde::Deserialize;
//! use common::secret::SecretString;
//!
//! #[derive(Debug, Deserialize)]
//! struct RefreshRequest {
//!     refresh_token: SecretString,
//! }
//!
//! let json = r#"{"refresh_token": "header.payload.signature"}"#;
//! let req: RefreshRequest = serde_json::from_str(json).unwrap();
//!
//! // Debug output is safe
//! println!("{:?}", req);
//! ```

// Re-export the main types from secrecy
pub use secrecy::{ExposeSecret, SecretBox, SecretString};
