use std::net::SocketAddr;
use std::sync::Arc;

use burrow_core::{Repository, SystemClock};
use burrow_gateway::cli::{Cli, StorageBackendArg};
use burrow_gateway::{telemetry, App, AppState, FileRequestLogger, RequestLogger, TracingRequestLogger};
use burrow_generator::RandomGenerator;
use burrow_shortener::{Shortener, ShortenerService, ShortenerSettings};
use burrow_storage::{InMemoryRepository, SqliteRepository};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    telemetry::init(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        default_validity_minutes = config.default_validity_minutes,
        max_attempts = config.max_attempts,
        "starting burrow gateway"
    );

    let settings = ShortenerSettings::builder()
        .default_validity_minutes(config.default_validity_minutes)
        .max_attempts(config.max_attempts)
        .build();

    let shortener = match config.storage {
        StorageBackendArg::InMemory => shortener(InMemoryRepository::new(), settings),
        StorageBackendArg::Sqlite => {
            let repository = SqliteRepository::connect(&config.sqlite_url).await?;
            info!(sqlite_url = %config.sqlite_url, "connected to sqlite");
            shortener(repository, settings)
        }
    };

    let request_logger: Arc<dyn RequestLogger> = match &config.access_log {
        Some(path) => {
            info!(path = %path.display(), "writing access log to file");
            Arc::new(FileRequestLogger::open(path)?)
        }
        None => Arc::new(TracingRequestLogger),
    };

    let state = AppState::new(shortener, config.public_base_url, request_logger);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(
        listener,
        App::router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("gateway stopped");
    Ok(())
}

fn shortener<R: Repository>(repository: R, settings: ShortenerSettings) -> Arc<dyn Shortener> {
    Arc::new(ShortenerService::with_clock(
        repository,
        RandomGenerator::new(),
        SystemClock,
        settings,
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
