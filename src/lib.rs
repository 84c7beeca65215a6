#[macro_use]
extern crate rocket;

pub mod api;
pub mod cache;
pub mod config;
pub mod images;
pub mod models;
pub mod service;
pub mod source;

use std::sync::Arc;

use log::info;
use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::{Build, Rocket};

use cache::ImageCache;
use config::AppConfig;
use service::ImageService;
use source::ZipArchiveSource;

/// Wires the cache, the archive source and the routes into a Rocket instance.
pub fn build_rocket(figment: Figment, config: AppConfig) -> Rocket<Build> {
    let cache = Arc::new(ImageCache::new(config.cache_ttl()));
    info!(
        "Image cache initialized (ttl {}s, sweep every {}s)",
        cache.ttl.as_secs(),
        config.cache_sweep_interval().as_secs()
    );

    let source = Arc::new(ZipArchiveSource::with_prefix(
        &config.images_zip_file,
        config.archive_prefix.clone(),
    ));
    info!(
        "Serving images from {} (prefix '{}')",
        config.images_zip_file.display(),
        config.archive_prefix
    );

    let service = ImageService::new(source, Arc::clone(&cache));
    let sweep_every = config.cache_sweep_interval();

    rocket::custom(figment)
        .attach(AdHoc::on_liftoff("Cache sweeper", move |_| {
            let cache = Arc::clone(&cache);
            Box::pin(async move {
                rocket::tokio::spawn(crate::cache::sweep_expired(cache, sweep_every));
            })
        }))
        .manage(service)
        .manage(config)
        .mount(
            "/api",
            routes![api::images::post_image, api::images::get_image],
        )
        .register(
            "/api",
            catchers![api::error::bad_request, api::error::unprocessable],
        )
}
