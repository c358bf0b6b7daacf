//! Fixed test principals and instants for deterministic tests

use chrono::{DateTime, TimeZone, Utc};
use common::types::Principal;

// Users
pub const TEST_USER_ALICE_ID: u64 = 2;
pub const TEST_USER_ALICE_NAME: &str = "alice";
pub const TEST_USER_BOB_ID: u64 = 3;
pub const TEST_USER_BOB_NAME: &str = "bob";

pub fn alice() -> Principal {
    Principal::new(TEST_USER_ALICE_ID, TEST_USER_ALICE_NAME)
}

pub fn bob() -> Principal {
    Principal::new(TEST_USER_BOB_ID, TEST_USER_BOB_NAME)
}

/// Fixed issuance instant (2025-01-15T10:00:00Z).
pub fn test_t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0)
        .single()
        .expect("valid fixed instant")
}
