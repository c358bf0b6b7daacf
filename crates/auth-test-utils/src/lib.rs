//! # Token Service Test Utilities
//!
//! Shared test utilities for the token service.
//!
//! This crate provides:
//! - Deterministic signing secret fixtures and an independent HMAC signer
//! - Test data builders (`TestTokenBuilder` for arbitrary, hand-crafted claims)
//! - Server test harness (`TestAuthServer` for E2E tests)
//! - Fixed test principals and instants
//! - Custom assertions (`TokenAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let server = TestAuthServer::spawn().await?;
//!     let pair = server.issue_pair(&alice())?;
//!
//!     pair.access_token
//!         .assert_valid_jwt()
//!         .assert_token_kind("access")
//!         .assert_for_principal(TEST_USER_ALICE_ID, TEST_USER_ALICE_NAME);
//!
//!     // Hand-craft a token the issuer would never produce
//!     let future = TestTokenBuilder::for_principal(&alice())
//!         .not_before(test_t0() + chrono::Duration::hours(1))
//!         .sign(TEST_SIGNING_SECRET);
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod crypto_fixtures;
pub mod server_harness;
pub mod test_ids;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use crypto_fixtures::*;
pub use server_harness::*;
pub use test_ids::*;
pub use token_builders::*;
