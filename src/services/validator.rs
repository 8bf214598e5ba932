//! validator.rs
//!
//! Проверка заявки на бронирование относительно площадки и уже существующих
//! броней. Функция чистая: ничего не мутирует, "сегодня" передаётся снаружи.
//!
//! Порядок проверок фиксирован, срабатывает первая ошибка:
//! 1.  пустой выбор мест -> `NoSeatsSelected`;
//! 2.  дата раньше сегодняшнего дня -> `InvalidDate`;
//! 3.  мест больше лимита площадки -> `MaxSeatsExceeded(limit)`;
//! 4.  время не из расписания площадки (если включено политикой) -> `InvalidTimeSlot`;
//! 5.  хотя бы одно место вне зала, закрыто в схеме зала или занято
//!     подтверждённой бронью на тот же сеанс -> `SeatConflict`.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::BookingError;
use crate::models::{Booking, Venue};

/// Заявка на бронь в том виде, в котором её собрал вызывающий код.
#[derive(Debug, Clone, Copy)]
pub struct BookingCandidate<'a> {
    pub venue: &'a Venue,
    pub seats: &'a BTreeSet<String>,
    pub date: NaiveDate,
    pub time: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Требовать, чтобы время брони было одним из слотов площадки.
    pub enforce_time_slots: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self { enforce_time_slots: true }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BookingValidator {
    policy: ValidationPolicy,
}

impl BookingValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn validate(
        &self,
        candidate: &BookingCandidate<'_>,
        existing: &[Booking],
        today: NaiveDate,
    ) -> Result<(), BookingError> {
        let venue = candidate.venue;

        if candidate.seats.is_empty() {
            return Err(BookingError::NoSeatsSelected);
        }

        if candidate.date < today {
            return Err(BookingError::InvalidDate);
        }

        if candidate.seats.len() > venue.max_seats_per_booking as usize {
            return Err(BookingError::MaxSeatsExceeded(venue.max_seats_per_booking));
        }

        if self.policy.enforce_time_slots && !venue.offers_time_slot(candidate.time) {
            return Err(BookingError::InvalidTimeSlot(candidate.time.to_string()));
        }

        let conflicting: Vec<&String> = candidate
            .seats
            .iter()
            .filter(|seat| is_conflicting(candidate, seat, existing))
            .collect();

        if !conflicting.is_empty() {
            debug!(
                venue_id = %venue.id,
                date = %candidate.date,
                time = candidate.time,
                "seat conflict on {:?}",
                conflicting
            );
            return Err(BookingError::SeatConflict);
        }

        Ok(())
    }
}

fn is_conflicting(candidate: &BookingCandidate<'_>, seat: &str, existing: &[Booking]) -> bool {
    let layout = &candidate.venue.seat_layout;
    if !layout.contains(seat) || !layout.is_seat_available(seat) {
        return true;
    }
    existing
        .iter()
        .any(|b| b.holds_seat(&candidate.venue.id, seat, candidate.date, candidate.time))
}
