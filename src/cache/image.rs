use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use super::CacheEntry;
use crate::images::EncodedImage;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

// Rendered images keyed by request cache key. Entries expire a fixed time
// after they were written; reads never extend them. There is no size bound.
pub struct ImageCache {
    images: RwLock<HashMap<String, CacheEntry<EncodedImage>>>,
    pub ttl: Duration,
}

impl ImageCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            images: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Live entry under `key` together with its age in seconds.
    pub fn get_image(&self, key: &str) -> Option<(EncodedImage, u64)> {
        self.get_image_at(key, Instant::now())
    }

    pub fn get_image_at(&self, key: &str, now: Instant) -> Option<(EncodedImage, u64)> {
        let images = self.images.read();

        images
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| (entry.data.clone(), entry.age_at(now).as_secs()))
    }

    pub fn store_image(&self, key: &str, image: EncodedImage) {
        self.store_image_at(key, image, Instant::now());
    }

    pub fn store_image_at(&self, key: &str, image: EncodedImage, now: Instant) {
        let mut images = self.images.write();
        images.insert(key.to_string(), CacheEntry::inserted_at(image, self.ttl, now));
    }

    /// Drops expired entries and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut images = self.images.write();
        let before = images.len();
        images.retain(|_, entry| !entry.is_expired_at(now));
        before - images.len()
    }

    pub fn len(&self) -> usize {
        self.images.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.read().is_empty()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::OutputFormat;
    use std::sync::Arc;

    fn encoded(byte: u8) -> EncodedImage {
        EncodedImage {
            data: vec![byte; 4],
            format: OutputFormat::Png,
        }
    }

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn entries_expire_sixty_minutes_after_insertion() {
        let cache = ImageCache::default();
        let t0 = Instant::now();
        cache.store_image_at("k", encoded(1), t0);

        assert_eq!(
            cache.get_image_at("k", t0 + 59 * MINUTE),
            Some((encoded(1), 59 * 60))
        );
        assert_eq!(cache.get_image_at("k", t0 + 61 * MINUTE), None);
    }

    #[test]
    fn reads_do_not_extend_lifetime() {
        let cache = ImageCache::default();
        let t0 = Instant::now();
        cache.store_image_at("k", encoded(1), t0);

        for minute in [10, 30, 50, 59] {
            assert!(cache.get_image_at("k", t0 + minute * MINUTE).is_some());
        }
        assert!(cache.get_image_at("k", t0 + 61 * MINUTE).is_none());
    }

    #[test]
    fn later_writes_replace_earlier_ones() {
        let cache = ImageCache::default();
        let t0 = Instant::now();
        cache.store_image_at("k", encoded(1), t0);
        cache.store_image_at("k", encoded(2), t0 + 30 * MINUTE);

        assert_eq!(
            cache.get_image_at("k", t0 + 61 * MINUTE).map(|(image, _)| image),
            Some(encoded(2))
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unbounded_ttl_is_stored_without_panicking() {
        let cache = ImageCache::new(Duration::MAX);
        let t0 = Instant::now();
        cache.store_image_at("k", encoded(1), t0);

        assert!(cache.get_image_at("k", t0 + 24 * 60 * MINUTE).is_some());
        assert_eq!(cache.purge_expired_at(t0 + 24 * 60 * MINUTE), 0);
    }

    #[test]
    fn purge_removes_only_expired_entries() {
        let cache = ImageCache::default();
        let t0 = Instant::now();
        cache.store_image_at("old", encoded(1), t0);
        cache.store_image_at("new", encoded(2), t0 + 30 * MINUTE);

        assert_eq!(cache.purge_expired_at(t0 + 61 * MINUTE), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get_image_at("new", t0 + 61 * MINUTE).is_some());
    }

    #[test]
    fn concurrent_access_is_safe() {
        let cache = Arc::new(ImageCache::default());

        std::thread::scope(|scope| {
            for i in 0..8u8 {
                let cache = Arc::clone(&cache);
                scope.spawn(move || {
                    for _ in 0..100 {
                        cache.store_image("shared", encoded(i));
                        let (read, _) = cache.get_image("shared").unwrap();
                        assert_eq!(read.data.len(), 4);
                    }
                });
            }
        });

        assert_eq!(cache.len(), 1);
    }
}
