//! Integration tests for the bearer gate on GET /api/v1/auth/me

use auth_service::errors::INVALID_TOKEN_MESSAGE;
use auth_test_utils::*;
use chrono::{Duration, Utc};
use reqwest::StatusCode;

async fn get_me(
    server: &TestAuthServer,
    authorization: Option<String>,
) -> Result<reqwest::Response, anyhow::Error> {
    let mut request = reqwest::Client::new().get(format!("{}/api/v1/auth/me", server.url()));
    if let Some(value) = authorization {
        request = request.header("Authorization", value);
    }
    Ok(request.send().await?)
}

async fn assert_unauthorized(response: reqwest::Response) -> Result<(), anyhow::Error> {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    Ok(())
}

#[tokio::test]
async fn test_access_token_reaches_handler() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let pair = server.issue_pair(&alice())?;

    let response = get_me(&server, Some(format!("Bearer {}", pair.access_token))).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["user_id"], TEST_USER_ALICE_ID);
    assert_eq!(body["username"], TEST_USER_ALICE_NAME);

    Ok(())
}

#[tokio::test]
async fn test_missing_header_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    assert_unauthorized(get_me(&server, None).await?).await
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let pair = server.issue_pair(&alice())?;

    assert_unauthorized(get_me(&server, Some(format!("Token {}", pair.access_token))).await?)
        .await
}

#[tokio::test]
async fn test_refresh_token_is_not_a_bearer_credential() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let pair = server.issue_pair(&alice())?;

    assert_unauthorized(get_me(&server, Some(format!("Bearer {}", pair.refresh_token))).await?)
        .await
}

#[tokio::test]
async fn test_expired_access_token_is_rejected_generically() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let expired = TestTokenBuilder::for_principal(&alice())
        .issued_at(Utc::now() - Duration::hours(1))
        .sign(TEST_SIGNING_SECRET);

    let response = get_me(&server, Some(format!("Bearer {expired}"))).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await?;
    // The caller learns nothing about why the token failed
    assert_eq!(body["error"]["message"], INVALID_TOKEN_MESSAGE);

    Ok(())
}

#[tokio::test]
async fn test_not_yet_valid_access_token_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let future = TestTokenBuilder::for_principal(&alice())
        .issued_at(Utc::now() + Duration::hours(1))
        .sign(TEST_SIGNING_SECRET);

    assert_unauthorized(get_me(&server, Some(format!("Bearer {future}"))).await?).await
}

#[tokio::test]
async fn test_token_signed_elsewhere_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let forged = TestTokenBuilder::for_principal(&alice())
        .issued_at(Utc::now())
        .sign(OTHER_SIGNING_SECRET);

    assert_unauthorized(get_me(&server, Some(format!("Bearer {forged}"))).await?).await
}

#[tokio::test]
async fn test_tampered_payload_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let pair = server.issue_pair(&alice())?;
    let bob_payload = TestTokenBuilder::for_principal(&bob())
        .issued_at(Utc::now())
        .sign(TEST_SIGNING_SECRET);

    // Splice bob's payload under alice's signature
    let alice_parts: Vec<&str> = pair.access_token.split('.').collect();
    let bob_parts: Vec<&str> = bob_payload.split('.').collect();
    let spliced = format!("{}.{}.{}", alice_parts[0], bob_parts[1], alice_parts[2]);

    assert_unauthorized(get_me(&server, Some(format!("Bearer {spliced}"))).await?).await
}
