#![no_main]

use auth_service::crypto::SigningSecret;
use auth_service::services::TokenValidator;
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

fn validator() -> &'static TokenValidator {
    static VALIDATOR: OnceLock<TokenValidator> = OnceLock::new();
    VALIDATOR.get_or_init(|| {
        let secret = SigningSecret::new(vec![0x42; 32]).expect("fixed secret is long enough");
        TokenValidator::new(&secret)
    })
}

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must be rejected with an error, never a panic
    if let Ok(token) = std::str::from_utf8(data) {
        if let Some(now) = Utc.timestamp_opt(1_700_000_000, 0).single() {
            let _ = validator().validate(token, now);
        }
    }
});
