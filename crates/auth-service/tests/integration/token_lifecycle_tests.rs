//! Token lifecycle tests against the library API
//!
//! Issue, validate and refresh at fixed instants, plus hand-crafted tokens
//! the issuer would never produce.

use auth_service::config::TokenLifetimes;
use auth_service::errors::AuthError;
use auth_service::models::TokenKind;
use auth_service::services::{RefreshService, TokenIssuer, TokenValidator};
use auth_test_utils::*;
use chrono::Duration;
use std::sync::Arc;

fn services() -> (Arc<TokenIssuer>, Arc<TokenValidator>, RefreshService) {
    let secret = test_signing_secret();
    let issuer = Arc::new(TokenIssuer::new(&secret, TokenLifetimes::default()));
    let validator = Arc::new(TokenValidator::new(&secret));
    let refresh = RefreshService::new(Arc::clone(&issuer), Arc::clone(&validator));
    (issuer, validator, refresh)
}

// ============================================================================
// Issuance
// ============================================================================

#[test]
fn test_issued_pair_has_expected_shape() {
    let (issuer, _, _) = services();

    let pair = issuer.issue_pair(&alice(), test_t0()).unwrap();

    pair.access_token
        .assert_valid_jwt()
        .assert_token_kind("access")
        .assert_for_principal(TEST_USER_ALICE_ID, TEST_USER_ALICE_NAME)
        .assert_lifetime(15 * 60);
    pair.refresh_token
        .assert_valid_jwt()
        .assert_token_kind("refresh")
        .assert_for_principal(TEST_USER_ALICE_ID, TEST_USER_ALICE_NAME)
        .assert_lifetime(7 * 24 * 60 * 60);
}

#[test]
fn test_issued_tokens_verify_under_independent_hmac() {
    let (issuer, _, _) = services();
    let pair = issuer.issue_pair(&bob(), test_t0()).unwrap();

    assert_eq!(resign(&pair.access_token, TEST_SIGNING_SECRET), pair.access_token);
    assert_ne!(resign(&pair.access_token, OTHER_SIGNING_SECRET), pair.access_token);
}

#[test]
fn test_tokens_for_different_principals_differ() {
    let (issuer, validator, _) = services();

    let a = issuer.issue_pair(&alice(), test_t0()).unwrap();
    let b = issuer.issue_pair(&bob(), test_t0()).unwrap();

    assert_ne!(a.access_token, b.access_token);
    assert_eq!(
        validator.validate(&b.access_token, test_t0()).unwrap().principal(),
        bob()
    );
}

// ============================================================================
// Validation Window
// ============================================================================

#[test]
fn test_access_token_fifteen_minute_window() {
    let (issuer, validator, _) = services();
    let token = issuer
        .issue(&alice(), TokenKind::Access, Duration::minutes(15), test_t0())
        .unwrap();

    let claims = validator
        .validate(&token, test_t0() + Duration::minutes(14) + Duration::seconds(59))
        .unwrap();
    assert_eq!(claims.principal(), alice());
    assert_eq!(claims.token_type, TokenKind::Access);

    assert_eq!(
        validator.validate(&token, test_t0() + Duration::minutes(15)),
        Err(AuthError::Expired)
    );
    assert_eq!(
        validator.validate(&token, test_t0() + Duration::minutes(15) + Duration::seconds(1)),
        Err(AuthError::Expired)
    );
}

#[test]
fn test_future_not_before_is_not_yet_valid() {
    let (_, validator, _) = services();
    let token = TestTokenBuilder::for_principal(&alice())
        .lifetime(Duration::hours(2))
        .not_before(test_t0() + Duration::hours(1))
        .sign(TEST_SIGNING_SECRET);

    assert_eq!(
        validator.validate(&token, test_t0() + Duration::minutes(30)),
        Err(AuthError::NotYetValid)
    );
    assert!(validator
        .validate(&token, test_t0() + Duration::minutes(90))
        .is_ok());
}

#[test]
fn test_not_yet_valid_is_checked_before_expiry() {
    let (_, validator, _) = services();
    // nbf after exp: both temporal checks fail, nbf wins
    let token = TestTokenBuilder::for_principal(&alice())
        .lifetime(Duration::minutes(10))
        .not_before(test_t0() + Duration::hours(1))
        .sign(TEST_SIGNING_SECRET);

    assert_eq!(
        validator.validate(&token, test_t0() + Duration::minutes(30)),
        Err(AuthError::NotYetValid)
    );
}

// ============================================================================
// Crafted Tokens
// ============================================================================

#[test]
fn test_foreign_secret_is_bad_signature() {
    let (_, validator, _) = services();
    let token = TestTokenBuilder::for_principal(&alice()).sign(OTHER_SIGNING_SECRET);

    assert_eq!(
        validator.validate(&token, test_t0()),
        Err(AuthError::BadSignature)
    );
}

#[test]
fn test_unknown_kind_is_malformed() {
    let (_, validator, _) = services();
    let token = TestTokenBuilder::for_principal(&alice())
        .kind("admin")
        .sign(TEST_SIGNING_SECRET);

    assert_eq!(
        validator.validate(&token, test_t0()),
        Err(AuthError::Malformed)
    );
}

#[test]
fn test_other_algorithm_is_malformed() {
    let (_, validator, _) = services();
    let token = TestTokenBuilder::for_principal(&alice())
        .algorithm("HS384")
        .sign(TEST_SIGNING_SECRET);

    assert_eq!(
        validator.validate(&token, test_t0()),
        Err(AuthError::Malformed)
    );
}

// ============================================================================
// Refresh
// ============================================================================

#[test]
fn test_refresh_after_one_hour() {
    let (issuer, validator, refresh) = services();
    let original = issuer.issue_pair(&alice(), test_t0()).unwrap();
    let later = test_t0() + Duration::hours(1);

    let pair = refresh.refresh(&original.refresh_token, later).unwrap();

    let access = validator.validate(&pair.access_token, later).unwrap();
    assert_eq!(access.principal(), alice());
    assert_eq!(access.exp, (later + Duration::minutes(15)).timestamp());
    // Original refresh token is still usable until its own expiry
    assert!(validator.validate(&original.refresh_token, later).is_ok());
}

#[test]
fn test_refresh_with_access_token_issues_nothing() {
    let (issuer, _, refresh) = services();
    let original = issuer.issue_pair(&alice(), test_t0()).unwrap();

    let result = refresh.refresh(&original.access_token, test_t0());

    assert_eq!(
        result,
        Err(AuthError::WrongTokenKind {
            expected: TokenKind::Refresh,
            actual: TokenKind::Access,
        })
    );
}

#[test]
fn test_refresh_with_expired_refresh_token() {
    let (issuer, _, refresh) = services();
    let original = issuer.issue_pair(&alice(), test_t0()).unwrap();

    assert_eq!(
        refresh.refresh(&original.refresh_token, test_t0() + Duration::days(7)),
        Err(AuthError::Expired)
    );
}
