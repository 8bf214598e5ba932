//! error.rs
//!
//! Ошибки домена бронирования. Все ошибки восстановимы: вызывающая сторона
//! показывает сообщение пользователю и даёт повторить ввод.

use thiserror::Error;
use uuid::Uuid;

use crate::models::BookingStatus;

/// Ошибки создания и отмены бронирования.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Please select at least one seat")]
    NoSeatsSelected,

    #[error("Selected date must be in the future")]
    InvalidDate,

    #[error("Maximum {0} seats per booking")]
    MaxSeatsExceeded(u32),

    #[error("Time slot {0} is not offered by this venue")]
    InvalidTimeSlot(String),

    #[error("One or more seats are already booked")]
    SeatConflict,

    #[error("Booking price is out of range")]
    PriceOutOfRange,

    #[error("Venue {0} not found")]
    UnknownVenue(String),

    #[error("Booking {0} not found")]
    NotFound(Uuid),

    #[error("Booking cannot move from {from} to {to}")]
    InvalidStatusTransition { from: BookingStatus, to: BookingStatus },
}

/// Ошибки загрузки и проверки каталога площадок.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate venue id: {0}")]
    DuplicateVenue(String),

    #[error("venue {venue}: {reason}")]
    InvalidVenue { venue: String, reason: String },
}

impl CatalogError {
    pub(crate) fn invalid(venue: &str, reason: impl Into<String>) -> Self {
        CatalogError::InvalidVenue {
            venue: venue.to_string(),
            reason: reason.into(),
        }
    }
}

/// Ошибки чтения конфигурации из окружения.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}
