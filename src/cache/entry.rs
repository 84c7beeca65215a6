use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub inserted_at: Instant,
    /// `None` when `inserted_at + ttl` is past what `Instant` can hold.
    pub expires_at: Option<Instant>,
}

impl<T: Clone> CacheEntry<T> {
    pub fn new(data: T, ttl: Duration) -> Self {
        Self::inserted_at(data, ttl, Instant::now())
    }

    pub fn inserted_at(data: T, ttl: Duration, now: Instant) -> Self {
        Self {
            data,
            inserted_at: now,
            expires_at: now.checked_add(ttl),
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }
}
