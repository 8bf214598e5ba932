use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::seat::{SeatLayout, MAX_COLUMNS, MAX_ROWS};
use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueType {
    Restaurant,
    Cinema,
}

impl VenueType {
    // Иконка для UI, на логику не влияет
    pub fn icon(self) -> &'static str {
        match self {
            VenueType::Restaurant => "fork.knife",
            VenueType::Cinema => "film",
        }
    }
}

impl fmt::Display for VenueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenueType::Restaurant => f.write_str("Restaurant"),
            VenueType::Cinema => f.write_str("Cinema"),
        }
    }
}

/// Площадка из каталога. После загрузки каталога не меняется.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub venue_type: VenueType,
    pub seat_layout: SeatLayout,
    pub available_time_slots: Vec<String>,
    pub max_seats_per_booking: u32,
    pub base_price: Decimal,
    #[serde(default)]
    pub image_name: String,
}

impl Venue {
    /// Цена за место в виде "$12.99/seat".
    pub fn seat_price(&self) -> String {
        format!("${:.2}/seat", self.base_price)
    }

    /// Стоимость брони на `seats` мест, `None` при переполнении.
    pub fn price_for(&self, seats: usize) -> Option<Decimal> {
        self.base_price.checked_mul(Decimal::from(seats as u64))
    }

    fn max_booking_price(&self) -> Option<Decimal> {
        self.price_for(self.max_seats_per_booking as usize)
    }

    pub fn offers_time_slot(&self, time: &str) -> bool {
        self.available_time_slots.iter().any(|slot| slot == time)
    }

    /// Проверка инвариантов площадки при загрузке каталога.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let layout = &self.seat_layout;
        if self.id.trim().is_empty() {
            return Err(CatalogError::invalid(&self.id, "id must not be empty"));
        }
        if layout.rows == 0 || layout.columns == 0 {
            return Err(CatalogError::invalid(&self.id, "seat layout must have rows and columns"));
        }
        if layout.rows > MAX_ROWS {
            return Err(CatalogError::invalid(
                &self.id,
                format!("seat layout supports at most {} rows", MAX_ROWS),
            ));
        }
        if layout.columns > MAX_COLUMNS {
            return Err(CatalogError::invalid(
                &self.id,
                format!("seat layout supports at most {} columns", MAX_COLUMNS),
            ));
        }
        if let Some(seat) = layout.unavailable_seats.iter().find(|s| !layout.contains(s)) {
            return Err(CatalogError::invalid(
                &self.id,
                format!("unavailable seat {} is outside the layout", seat),
            ));
        }
        if self.max_seats_per_booking == 0 {
            return Err(CatalogError::invalid(&self.id, "max_seats_per_booking must be > 0"));
        }
        if self.base_price.is_sign_negative() {
            return Err(CatalogError::invalid(&self.id, "base_price must be >= 0"));
        }
        // Цена самой крупной брони должна помещаться в Decimal
        if self.max_booking_price().is_none() {
            return Err(CatalogError::invalid(&self.id, "base_price is too large"));
        }
        Ok(())
    }
}
