pub mod refresh_service;
pub mod token_issuer;
pub mod token_validator;

pub use refresh_service::RefreshService;
pub use token_issuer::TokenIssuer;
pub use token_validator::TokenValidator;
