//! Compact JWT structure checks shared by token producers and consumers.
//!
//! This module performs the cheap, key-independent part of token validation:
//! - Size limits for DoS prevention
//! - Segment count and emptiness
//! - base64url (unpadded) decodability of each segment
//!
//! Nothing here trusts the decoded bytes. Signature verification and claims
//! parsing happen afterwards in the service that owns the signing key.
//!
//! # Usage
//!
//! ```rust,ignore
//! use common::jwt::{split_compact, MAX_JWT_SIZE_BYTES};
//!
//! let parts = split_compact(token)?;
//! // parts.header / parts.payload / parts.signature are still base64url text
//! ```

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed JWT size in bytes (8KB).
///
/// Tokens larger than this are rejected BEFORE any base64 decoding or
/// cryptographic work. Issued tokens are ~250 bytes.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// Separator between the three compact segments.
pub const SEGMENT_SEPARATOR: char = '.';

// =============================================================================
// Error Types
// =============================================================================

/// Structural errors in a compact JWT.
///
/// Messages are intentionally generic; the detailed reason is logged at debug
/// level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtFormatError {
    /// Token size exceeds maximum allowed.
    #[error("The token is invalid or expired")]
    TokenTooLarge,

    /// Token is not three non-empty base64url segments.
    #[error("The token is invalid or expired")]
    MalformedToken,
}

// =============================================================================
// Types
// =============================================================================

/// The three still-encoded segments of a compact JWT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactParts<'a> {
    /// base64url header segment
    pub header: &'a str,
    /// base64url payload segment
    pub payload: &'a str,
    /// base64url signature segment
    pub signature: &'a str,
}

impl CompactParts<'_> {
    /// The bytes covered by the signature: `header "." payload`.
    #[must_use]
    pub fn signing_input(&self) -> String {
        format!("{}{}{}", self.header, SEGMENT_SEPARATOR, self.payload)
    }
}

// =============================================================================
// Functions
// =============================================================================

/// Split a compact JWT into its three segments, checking structure only.
///
/// # Errors
///
/// - `TokenTooLarge` - token exceeds `MAX_JWT_SIZE_BYTES`
/// - `MalformedToken` - not exactly three segments, an empty segment, or a
///   segment that is not unpadded base64url
pub fn split_compact(token: &str) -> Result<CompactParts<'_>, JwtFormatError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtFormatError::TokenTooLarge);
    }

    let mut segments = token.split(SEGMENT_SEPARATOR);
    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        tracing::debug!(target: "common.jwt", "Token rejected: expected three segments");
        return Err(JwtFormatError::MalformedToken);
    };

    for (name, segment) in [
        ("header", header),
        ("payload", payload),
        ("signature", signature),
    ] {
        if segment.is_empty() {
            tracing::debug!(target: "common.jwt", segment = name, "Token rejected: empty segment");
            return Err(JwtFormatError::MalformedToken);
        }
        if let Err(e) = URL_SAFE_NO_PAD.decode(segment) {
            tracing::debug!(
                target: "common.jwt",
                segment = name,
                error = %e,
                "Token rejected: segment is not base64url"
            );
            return Err(JwtFormatError::MalformedToken);
        }
    }

    Ok(CompactParts {
        header,
        payload,
        signature,
    })
}
