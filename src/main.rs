use anyhow::Context;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use venue_booking::{build_router, config::Config, services::completion::CompletionService, AppState};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Venue Booking API ({})", config.app.environment);

    // Каталог площадок и in-memory хранилище броней
    let app_state = AppState::new(config.clone()).context("failed to load venue catalog")?;
    info!("Catalog loaded");

    // --- Start background tasks ---

    // Закрываем прошедшие брони по расписанию
    CompletionService::new(app_state.clone()).spawn();

    // --- Start the web server ---

    let app = build_router(app_state);

    let ip = config.app.host.parse().with_context(|| format!("invalid HOST {}", config.app.host))?;
    let addr = SocketAddr::new(ip, config.app.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
