//! Email verification codes: 3 random bytes as 6 upper-case hex characters.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};

pub fn generate() -> String {
    let mut bytes = [0u8; 3];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

pub fn expires_at(now: DateTime<Utc>, ttl_minutes: i64) -> DateTime<Utc> {
    now + Duration::minutes(ttl_minutes)
}

/// A code is accepted only if one is stored, it matches exactly and it has not expired.
pub fn is_valid(stored: Option<&str>, expires_at: Option<DateTime<Utc>>, submitted: &str, now: DateTime<Utc>) -> bool {
    match (stored, expires_at) {
        (Some(code), Some(exp)) => code == submitted && now <= exp,
        _ => false,
    }
}
