use std::env;
use std::path::PathBuf;
use std::time::Duration;

use rocket::figment::providers::{Format, Toml};
use rocket::figment::{Figment, Profile};
use rocket::Config;
use serde::Deserialize;

use crate::source::zip_archive::DEFAULT_PREFIX;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub address: String,
    pub images_zip_file: PathBuf,
    #[serde(default = "default_archive_prefix")]
    pub archive_prefix: String,
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,
    #[serde(default = "default_cache_sweep_interval_secs")]
    pub cache_sweep_interval_secs: u64,
}

impl AppConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_minutes.saturating_mul(60))
    }

    pub fn cache_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache_sweep_interval_secs.max(1))
    }
}

/// Rocket defaults, then `App.toml`, then environment overrides.
pub fn figment() -> Figment {
    let mut figment = Figment::from(Config::default()).merge(Toml::file("App.toml").nested());

    if let Ok(path) = env::var("IMAGES_ZIP_FILE") {
        figment = figment.merge(("images_zip_file", path));
    }

    if let Ok(minutes) = env::var("CACHE_TTL_MINUTES") {
        match minutes.trim().parse::<u64>() {
            Ok(minutes) => figment = figment.merge(("cache_ttl_minutes", minutes)),
            Err(e) => log::warn!("Ignoring CACHE_TTL_MINUTES={}: {}", minutes, e),
        }
    }

    figment.select(Profile::from_env_or("APP_PROFILE", "default"))
}

fn default_archive_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_cache_ttl_minutes() -> u64 {
    60
}

fn default_cache_sweep_interval_secs() -> u64 {
    300
}
