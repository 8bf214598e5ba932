pub mod venues;
pub mod bookings;

use axum::{http::StatusCode, Router};
use std::sync::Arc;

use crate::error::BookingError;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(venues::routes())
        .merge(bookings::routes())
}

/* ---------- helpers ---------- */

// Ошибки домена -> HTTP статус + сообщение для пользователя
pub(crate) fn booking_error(err: BookingError) -> (StatusCode, String) {
    let status = match &err {
        BookingError::NotFound(_) | BookingError::UnknownVenue(_) => StatusCode::NOT_FOUND,
        BookingError::SeatConflict | BookingError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
        BookingError::NoSeatsSelected
        | BookingError::InvalidDate
        | BookingError::MaxSeatsExceeded(_)
        | BookingError::InvalidTimeSlot(_)
        | BookingError::PriceOutOfRange => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, err.to_string())
}

pub(crate) fn validation_error(errors: validator::ValidationErrors) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, errors.to_string())
}
