use dotenv::dotenv;
use env_logger::Env;
use log::info;

use prodimg::config::{self, AppConfig};

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let figment = config::figment();
    let config = figment.extract::<AppConfig>()?;
    info!("Configuration loaded successfully");

    info!(
        "Starting product image server on {}:{}",
        config.address, config.port
    );

    prodimg::build_rocket(figment, config).launch().await?;

    Ok(())
}
