//! Common utilities and types shared across the token service crates.

#![warn(clippy::pedantic)]

/// Module for common data types
pub mod types;

/// Module for common configuration
pub mod config;

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for compact JWT structure checks (size, segments, encoding)
pub mod jwt;
