use std::sync::Arc;

use anyhow::Result;
use common::notify::LogNotifier;
use parking::{Parking, ParkingConfig, SystemClock};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod models;
mod routes;
mod state;

use crate::{config::ApiConfig, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting parking API service");

    let parking_config = ParkingConfig::from_env()?;
    let api_config = ApiConfig::from_env()?;

    let parking = Parking::open(
        &parking_config,
        Arc::new(LogNotifier),
        Arc::new(SystemClock),
    )?;

    // Check the data directory is usable before accepting requests
    if parking.health_check()? {
        info!("Data directory is writable");
    } else {
        anyhow::bail!("Data directory is not writable");
    }

    let app = routes::create_router(AppState::new(parking));

    let listener = TcpListener::bind(&api_config.listen_addr).await?;
    info!("Parking API listening on {}", api_config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
