use crate::models::TokenKind;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Generic message returned for every token rejection.
///
/// The precise reason is logged and counted, never returned to the caller.
pub const INVALID_TOKEN_MESSAGE: &str = "The token is invalid or expired";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Token has expired")]
    Expired,

    #[error("Wrong token kind: expected {expected}, got {actual}")]
    WrongTokenKind {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("Missing or invalid Authorization header")]
    MissingCredentials,

    #[error("Token lifetime must be positive, got {0}s")]
    InvalidLifetime(i64),

    #[error("Cryptographic error: {0}")]
    Crypto(String),
}

impl AuthError {
    /// Stable, bounded code used in metrics labels and logs.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Malformed => "malformed",
            AuthError::BadSignature => "bad_signature",
            AuthError::NotYetValid => "not_yet_valid",
            AuthError::Expired => "expired",
            AuthError::WrongTokenKind { .. } => "wrong_token_kind",
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::InvalidLifetime(_) => "invalid_lifetime",
            AuthError::Crypto(_) => "crypto",
        }
    }

    /// Whether this error rejects the caller's credential (401) as opposed
    /// to an internal fault on our side (500).
    pub fn is_unauthorized(&self) -> bool {
        !matches!(self, AuthError::InvalidLifetime(_) | AuthError::Crypto(_))
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = if !self.is_unauthorized() {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        } else if self == AuthError::MissingCredentials {
            (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                self.to_string(),
            )
        } else {
            (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                INVALID_TOKEN_MESSAGE.to_string(),
            )
        };

        let mut response = (
            status,
            Json(ErrorResponse {
                error: ErrorDetail {
                    code: code.to_string(),
                    message,
                },
            }),
        )
            .into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }

        response
    }
}
