/*
 * Tickscope - concentrated-liquidity calculator
 * Main entry point for the API server
 */

use std::sync::Arc;
use tickscope::{api, config::Config, service::PositionService};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    init_tracing(&config.server.log_level);

    info!("Starting Tickscope calculator");

    let service = Arc::new(PositionService::new(&config));

    let api_state = api::ApiState {
        config: config.clone(),
        service,
    };

    info!("Starting API server on {}:{}", config.server.host, config.server.port);

    let rocket = api::create_rocket(api_state);
    rocket.launch().await?;

    Ok(())
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tickscope={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
