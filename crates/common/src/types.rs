//! Common data types for the token service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque numeric identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The authenticated identity a token represents.
///
/// A principal is copied into a token at issuance and recovered verbatim at
/// validation time. It is never re-checked against a user store while the
/// token is live.
///
/// The `username` field is redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// User account identifier.
    pub user_id: UserId,

    /// Display name at the time of issuance.
    pub username: String,
}

impl Principal {
    /// Creates a new principal.
    #[must_use]
    pub fn new(user_id: u64, username: impl Into<String>) -> Self {
        Self {
            user_id: UserId(user_id),
            username: username.into(),
        }
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("user_id", &self.user_id)
            .field("username", &"[REDACTED]")
            .finish()
    }
}
