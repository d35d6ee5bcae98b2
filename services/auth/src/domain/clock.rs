//! Timestamp arithmetic for OTP expiry.

use chrono::{DateTime, Duration, Utc};

/// `now + secs`.
pub fn expiration_after(now: DateTime<Utc>, secs: i64) -> DateTime<Utc> {
    now + Duration::seconds(secs)
}

/// Strict chronological order: `a` happens before `b`.
pub fn is_before(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a < b
}

/// A code is expired once `now` reaches its expiration time.
pub fn has_expired(expiration_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    !is_before(now, expiration_time)
}
