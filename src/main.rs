use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod domain;
mod http;
mod metrics;
mod settings;
mod store;

use domain::customer::CustomerRepository;
use settings::{AppConfig, DatabaseBackend};
use store::{InMemoryCustomerRepository, PgCustomerRepository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // Structured logging; RUST_LOG wins over the configured filter
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter))
        )
        .init();

    tracing::info!("🚀 Starting customer registry");

    // === 1. Repository backend ===
    let repository: Arc<dyn CustomerRepository> = match config.database.backend {
        DatabaseBackend::Postgres => {
            tracing::info!("Connecting to PostgreSQL...");
            let repository =
                PgCustomerRepository::connect(&config.database.url, config.database.max_connections).await?;
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory storage; customers are lost on shutdown");
            Arc::new(InMemoryCustomerRepository::new())
        }
    };

    // === 2. Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!("📊 Metrics registry created");

    // === 3. HTTP server ===
    let state = http::AppState::new(repository, metrics, config.pagination);
    http::run_server(state, &config.server.host, config.server.port).await?;

    tracing::info!("Customer registry stopped");
    Ok(())
}
