pub mod config;
pub mod error;
pub mod clock;
pub mod models;
pub mod catalog;
pub mod controllers;
pub mod middleware;
pub mod services;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::error::CatalogError;
use crate::services::store::BookingStore;

// Shared state для всего приложения.
// Write-lock на store держится всю операцию validate -> mutate.
pub struct AppState {
    pub store: RwLock<BookingStore>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, CatalogError> {
        let venues = catalog::load(config.catalog.path.as_deref())?;
        let mut store = BookingStore::new(venues, config.booking.policy())?;

        if config.catalog.seed_sample_bookings {
            seed_sample_bookings(&mut store);
        }

        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: BookingStore, config: config::Config) -> Arc<Self> {
        Arc::new(Self {
            store: RwLock::new(store),
            config,
        })
    }
}

// Демо-бронь, как в витрине: два места на вечерний сеанс сегодня
fn seed_sample_bookings(store: &mut BookingStore) {
    let today = store.today();
    match store.create_booking("user1", "cinema1", ["A5", "A6"], today, "19:00") {
        Ok(b) => info!("Seeded sample booking {}", b.id()),
        Err(e) => warn!("Sample booking skipped: {}", e),
    }
}

/// Полный роутер приложения поверх общего состояния.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Venue Booking API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
