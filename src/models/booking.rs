use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Разрешённые переходы: Confirmed -> Cancelled | Completed.
    /// Повторная отмена считается no-op и тоже разрешена.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Confirmed, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
                | (BookingStatus::Cancelled, BookingStatus::Cancelled)
        )
    }

    /// Только подтверждённая бронь держит места.
    pub fn holds_seats(self) -> bool {
        self == BookingStatus::Confirmed
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        };
        f.write_str(s)
    }
}

/// Бронь. Всё, кроме `status`, фиксируется при создании.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    id: Uuid,
    user_id: String,
    venue_id: String,
    seat_numbers: BTreeSet<String>,
    booking_date: NaiveDate,
    booking_time: String,
    status: BookingStatus,
    price: Decimal,
    created_at: DateTime<Utc>,
}

impl Booking {
    pub(crate) fn confirmed(
        user_id: String,
        venue_id: String,
        seat_numbers: BTreeSet<String>,
        booking_date: NaiveDate,
        booking_time: String,
        price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            venue_id,
            seat_numbers,
            booking_date,
            booking_time,
            status: BookingStatus::Confirmed,
            price,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn venue_id(&self) -> &str {
        &self.venue_id
    }

    pub fn seat_numbers(&self) -> &BTreeSet<String> {
        &self.seat_numbers
    }

    pub fn booking_date(&self) -> NaiveDate {
        self.booking_date
    }

    pub fn booking_time(&self) -> &str {
        &self.booking_time
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Держит ли бронь место `seat` на указанный сеанс площадки.
    pub fn holds_seat(&self, venue_id: &str, seat: &str, date: NaiveDate, time: &str) -> bool {
        self.status.holds_seats()
            && self.venue_id == venue_id
            && self.booking_date == date
            && self.booking_time == time
            && self.seat_numbers.contains(seat)
    }

    pub(crate) fn set_status(&mut self, status: BookingStatus) {
        self.status = status;
    }
}
