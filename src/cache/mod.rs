mod entry;
mod image;
mod sweeper;

pub use entry::CacheEntry;
pub use self::image::{ImageCache, DEFAULT_TTL};
pub use sweeper::sweep_expired;
