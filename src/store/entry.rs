//! Cache Entry Module
//!
//! A single value held by the in-process store, with its expiry deadline.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value and the instant it stops being visible.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Expiry deadline, None = no expiration
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_seconds` from now.
    ///
    /// A deadline beyond what `Instant` can represent means no expiration.
    pub fn new(value: String, ttl_seconds: Option<u64>) -> Self {
        let expires_at = ttl_seconds
            .and_then(|ttl| Instant::now().checked_add(Duration::from_secs(ttl)));
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// An entry is expired once the current instant reaches its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Remaining lifetime, `Some(Duration::ZERO)` once expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Remaining lifetime in whole seconds, rounded up.
    ///
    /// Non-zero for as long as the entry is live and never above the TTL it
    /// was created with.
    pub fn ttl_remaining_secs(&self) -> Option<u64> {
        self.ttl_remaining().map(|remaining| {
            let secs = remaining.as_secs();
            if remaining.subsec_nanos() > 0 {
                secs + 1
            } else {
                secs
            }
        })
    }
}
