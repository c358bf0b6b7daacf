//! Token Service Library
//!
//! Stateless bearer-token authentication: HS256-signed access and refresh
//! tokens, signature and expiry validation, refresh exchange, and the HTTP
//! gate that protects routes.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Signing secret and HS256 primitives
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - Bearer authentication gate
//! - `models` - Claims and token pair types
//! - `observability` - Tracing setup and metrics
//! - `routes` - Router and application state
//! - `services` - Issuance, validation and refresh

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
