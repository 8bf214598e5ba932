use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::booking_error;
use crate::error::BookingError;
use crate::models::Venue;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/{id}", get(get_venue))
        .route("/venues/{id}/seats", get(get_seat_map))
}

#[derive(Debug, Serialize)]
struct VenueResponse {
    #[serde(flatten)]
    venue: Venue,
    icon: &'static str,
    seat_price: String,
}

impl From<&Venue> for VenueResponse {
    fn from(venue: &Venue) -> Self {
        Self {
            icon: venue.venue_type.icon(),
            seat_price: venue.seat_price(),
            venue: venue.clone(),
        }
    }
}

// GET /api/venues
async fn list_venues(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read().await;
    let payload: Vec<VenueResponse> = store.list_venues().iter().map(VenueResponse::from).collect();
    (StatusCode::OK, Json(payload))
}

// GET /api/venues/{id}
async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let store = state.store.read().await;
    let venue = store
        .venue(&id)
        .ok_or_else(|| booking_error(BookingError::UnknownVenue(id.clone())))?;
    Ok((StatusCode::OK, Json(VenueResponse::from(venue))))
}

// GET /api/venues/{id}/seats?date=2030-01-15&time=19:00
#[derive(Debug, Deserialize)]
struct SeatMapQuery {
    date: NaiveDate,
    time: String,
}

async fn get_seat_map(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<SeatMapQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let store = state.store.read().await;
    let seats = store
        .seat_map(&id, params.date, &params.time)
        .map_err(booking_error)?;
    Ok((StatusCode::OK, Json(seats)))
}
