use std::sync::Arc;
use std::time::Duration;

use log::debug;

use super::ImageCache;

/// Purges expired entries every `every`, forever.
pub async fn sweep_expired(cache: Arc<ImageCache>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        let removed = cache.purge_expired();
        if removed > 0 {
            debug!("Purged {} expired images, {} left in cache", removed, cache.len());
        }
    }
}
