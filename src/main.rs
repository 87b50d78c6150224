mod aggregator;
mod catalog;
mod config;
mod model;
mod normalizer;
mod scraper;
mod server;
mod sites;

use crate::config::load_config;
use crate::scraper::ScraperImpl;
use crate::server::AppState;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_logging();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let config = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            std::process::exit(1);
        }
    };

    let scraper = match ScraperImpl::new(config.fetch_retries) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Sources: {} and {} (timeout {}s, retries {})",
        config.auto_ru_url, config.avito_url, config.fetch_timeout_secs, config.fetch_retries
    );
    let state = Arc::new(AppState::new(&config, scraper));

    if let Err(e) = server::serve(config.port, state).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moto_sniper=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}
