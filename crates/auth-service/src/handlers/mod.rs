//! HTTP request handlers for the token service.

pub mod auth_handler;
pub mod health;
pub mod metrics;

pub use auth_handler::{handle_me, handle_refresh};
pub use health::health_check;
pub use metrics::metrics_handler;
