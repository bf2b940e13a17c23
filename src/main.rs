mod api;
mod config;
mod models;
mod services;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use api::ApiClient;
use config::{ApiConfig, APP_NAME};
use services::ChatSession;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;
    let client = ApiClient::new(config);
    tracing::info!("{} using backend at {}", APP_NAME, client.config().api_url);
    let mut session = ChatSession::new(Arc::new(client));

    ui::run(&mut session).await
}
