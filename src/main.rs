// Coin board server: proxies coin listings and price history from a
// third-party market-data API and serves the static frontend bundle.

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::time::Duration;

mod config;
mod error;
mod handlers;
mod static_files;
#[cfg(test)]
mod test_stub;
mod types;
mod upstream;

use config::ServerConfig;
use handlers::{frontend, get_chart, get_coins, health_check, index};
use types::AppState;
use upstream::MarketClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::load().map_err(|e| {
        eprintln!("Failed to load server configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    config.setup_logging();

    // One pooled client for all outbound calls, with a fixed timeout so a
    // stalled upstream surfaces as an error instead of hanging the request
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let state = web::Data::new(AppState {
        upstream: MarketClient::new(client, &config.upstream_api_url),
        frontend_dir: config.frontend_dir.clone().into(),
        index_file: config.index_file.clone(),
    });

    info!(
        "Starting coin board server on http://{}:{}",
        config.bind_host, config.http_port
    );
    info!("Proxying market data from {}", config.upstream_api_url);
    info!("Serving frontend from {}/", config.frontend_dir);

    let cors = config.cors.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(cors.middleware())
            .service(get_coins)
            .service(get_chart)
            .service(health_check)
            .service(index)
            .service(frontend)
    })
    .bind((config.bind_host.as_str(), config.http_port))?
    .run()
    .await
}
