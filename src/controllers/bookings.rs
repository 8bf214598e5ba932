use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{booking_error, validation_error};
use crate::error::BookingError;
use crate::middleware::CallerId;
use crate::services::store::BookingFilter;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/cancel", patch(cancel_booking))
}

/* ---------- BOOKINGS ---------- */

// GET /api/bookings?user_id=&venue_id=
async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<BookingFilter>,
) -> impl IntoResponse {
    let store = state.store.read().await;
    let bookings: Vec<_> = store.list_bookings(&filter).into_iter().cloned().collect();
    (StatusCode::OK, Json(bookings))
}

// GET /api/bookings/{id}
async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let store = state.store.read().await;
    let booking = store
        .booking(id)
        .cloned()
        .ok_or_else(|| booking_error(BookingError::NotFound(id)))?;
    Ok((StatusCode::OK, Json(booking)))
}

// POST /api/bookings
// Пустой список мест не отсекаем здесь: это решает валидатор (NoSeatsSelected)
#[derive(Debug, Deserialize, Validate)]
struct CreateBookingRequest {
    #[validate(length(min = 1))]
    venue_id: String,
    #[serde(default)]
    seats: Vec<String>,
    date: NaiveDate,
    #[validate(length(min = 1))]
    time: String,
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    CallerId(user_id): CallerId,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    req.validate().map_err(validation_error)?;

    let mut store = state.store.write().await;
    let booking = store
        .create_booking(&user_id, &req.venue_id, req.seats, req.date, &req.time)
        .map_err(|e| {
            tracing::debug!("create_booking rejected: {}", e);
            booking_error(e)
        })?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// PATCH /api/bookings/cancel
#[derive(Debug, Deserialize)]
struct CancelBookingRequest {
    booking_id: Uuid,
}

async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CancelBookingRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut store = state.store.write().await;
    store.cancel_booking(req.booking_id).map_err(booking_error)?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Booking cancelled", "booking_id": req.booking_id })),
    ))
}
