//! Arqueo engine server binary.

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use arqueo_engine::api::{create_router, AppState};
use arqueo_engine::config::EngineConfig;
use arqueo_engine::error::{EngineError, EngineResult};
use arqueo_engine::store::ArqueoStore;

#[tokio::main]
async fn main() -> EngineResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path =
        std::env::var("ARQUEO_CONFIG").unwrap_or_else(|_| "./arqueo.yaml".to_string());
    let config = if Path::new(&config_path).exists() {
        EngineConfig::load(&config_path)?
    } else {
        info!(path = %config_path, "No configuration file, using defaults");
        EngineConfig::default()
    };

    let store = ArqueoStore::open(&config.database_path)?;
    info!(database = %config.database_path, "Store opened");

    let listen_addr = config.listen_addr.clone();
    let state = AppState::new(config, store);
    let router = create_router(state);

    let listener =
        tokio::net::TcpListener::bind(&listen_addr)
            .await
            .map_err(|e| EngineError::Server {
                message: format!("cannot bind {}: {}", listen_addr, e),
            })?;
    info!(addr = %listen_addr, "Listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| EngineError::Server {
            message: e.to_string(),
        })?;

    Ok(())
}
