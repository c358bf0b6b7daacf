//! HTTP middleware for the token service.
//!
//! # Components
//!
//! - `auth` - Bearer access-token gate for protected routes

pub mod auth;

pub use auth::{authenticate_bearer, require_auth, AuthState, PrincipalExt};
