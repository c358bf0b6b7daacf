//! Integration tests for POST /api/v1/auth/refresh

use auth_service::models::TokenPair;
use auth_test_utils::*;
use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::json;

async fn post_refresh(
    server: &TestAuthServer,
    body: serde_json::Value,
) -> Result<reqwest::Response, anyhow::Error> {
    Ok(reqwest::Client::new()
        .post(format!("{}/api/v1/auth/refresh", server.url()))
        .json(&body)
        .send()
        .await?)
}

/// A valid refresh token yields a fresh pair for the same principal.
#[tokio::test]
async fn test_refresh_returns_new_pair() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let original = server.issue_pair(&alice())?;

    let response = post_refresh(&server, json!({ "refresh_token": original.refresh_token })).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let pair: TokenPair = response.json().await?;
    assert_eq!(pair.access_expires_in, 15 * 60);
    assert_eq!(pair.refresh_expires_in, 7 * 24 * 60 * 60);
    pair.access_token
        .assert_valid_jwt()
        .assert_token_kind("access")
        .assert_for_principal(TEST_USER_ALICE_ID, TEST_USER_ALICE_NAME);
    pair.refresh_token
        .assert_valid_jwt()
        .assert_token_kind("refresh");

    Ok(())
}

/// The presented refresh token is not consumed.
#[tokio::test]
async fn test_refresh_token_can_be_reused() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let original = server.issue_pair(&alice())?;

    for _ in 0..2 {
        let response =
            post_refresh(&server, json!({ "refresh_token": original.refresh_token })).await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    Ok(())
}

/// Configured lifetimes flow through to refreshed pairs.
#[tokio::test]
async fn test_refresh_uses_configured_lifetimes() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_with_lifetimes(120, 3600).await?;
    let original = server.issue_pair(&bob())?;

    let response = post_refresh(&server, json!({ "refresh_token": original.refresh_token })).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let pair: TokenPair = response.json().await?;
    assert_eq!(pair.access_expires_in, 120);
    assert_eq!(pair.refresh_expires_in, 3600);
    pair.access_token.assert_lifetime(120);

    Ok(())
}

/// An access token is never accepted in place of a refresh token.
#[tokio::test]
async fn test_refresh_rejects_access_token() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let original = server.issue_pair(&alice())?;

    let response = post_refresh(&server, json!({ "refresh_token": original.access_token })).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");

    Ok(())
}

#[tokio::test]
async fn test_refresh_rejects_expired_refresh_token() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let expired = TestTokenBuilder::for_principal(&alice())
        .kind("refresh")
        .issued_at(Utc::now() - Duration::days(8))
        .lifetime(Duration::days(7))
        .sign(TEST_SIGNING_SECRET);

    let response = post_refresh(&server, json!({ "refresh_token": expired })).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_refresh_rejects_foreign_signature() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let original = server.issue_pair(&alice())?;
    let forged = resign(&original.refresh_token, OTHER_SIGNING_SECRET);

    let response = post_refresh(&server, json!({ "refresh_token": forged })).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_refresh_rejects_garbage() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = post_refresh(&server, json!({ "refresh_token": "not.a.token" })).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );

    Ok(())
}

#[tokio::test]
async fn test_refresh_without_token_field_is_client_error() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = post_refresh(&server, json!({ "token": "x" })).await?;

    assert!(response.status().is_client_error());

    Ok(())
}
