//! store.rs
//!
//! In-memory хранилище площадок и броней.
//!
//! Каталог площадок заполняется один раз при создании и дальше только читается.
//! Брони лежат в `Vec` в порядке создания, этот же порядок отдаётся наружу.
//! Любая мутация идёт через `BookingValidator`: при ошибке состояние не меняется.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{BookingError, CatalogError};
use crate::models::seat::parse_seat_code;
use crate::models::{Booking, BookingStatus, Venue};
use crate::services::validator::{BookingCandidate, BookingValidator, ValidationPolicy};

/// Фильтр для выборки броней. Пустой фильтр отдаёт всё.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookingFilter {
    pub user_id: Option<String>,
    pub venue_id: Option<String>,
}

impl BookingFilter {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self { user_id: Some(user_id.into()), venue_id: None }
    }

    pub fn for_venue(venue_id: impl Into<String>) -> Self {
        Self { user_id: None, venue_id: Some(venue_id.into()) }
    }

    fn matches(&self, booking: &Booking) -> bool {
        self.user_id.as_deref().map_or(true, |u| booking.user_id() == u)
            && self.venue_id.as_deref().map_or(true, |v| booking.venue_id() == v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeatState {
    Available,
    /// Закрыто в схеме зала
    Unavailable,
    /// Занято подтверждённой бронью на этот сеанс
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatStatus {
    pub code: String,
    pub row: u32,
    pub number: u32,
    pub state: SeatState,
}

pub struct BookingStore {
    venues: Vec<Venue>,
    venue_index: HashMap<String, usize>,
    bookings: Vec<Booking>,
    validator: BookingValidator,
    clock: Box<dyn Clock>,
}

impl BookingStore {
    /// Создаёт хранилище с каталогом `venues`. Каталог проверяется целиком:
    /// уникальность id и инварианты каждой площадки.
    pub fn new(venues: Vec<Venue>, policy: ValidationPolicy) -> Result<Self, CatalogError> {
        let mut venue_index = HashMap::with_capacity(venues.len());
        for (idx, venue) in venues.iter().enumerate() {
            venue.validate()?;
            if venue_index.insert(venue.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateVenue(venue.id.clone()));
            }
        }
        info!("Booking store initialized with {} venues", venues.len());

        Ok(Self {
            venues,
            venue_index,
            bookings: Vec::new(),
            validator: BookingValidator::new(policy),
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn list_venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn venue(&self, venue_id: &str) -> Option<&Venue> {
        self.venue_index.get(venue_id).map(|&idx| &self.venues[idx])
    }

    pub fn booking(&self, booking_id: Uuid) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id() == booking_id)
    }

    pub fn list_bookings(&self, filter: &BookingFilter) -> Vec<&Booking> {
        self.bookings.iter().filter(|b| filter.matches(b)).collect()
    }

    /// Создаёт подтверждённую бронь. Повторяющиеся коды мест схлопываются.
    pub fn create_booking<I, S>(
        &mut self,
        user_id: &str,
        venue_id: &str,
        seats: I,
        date: NaiveDate,
        time: &str,
    ) -> Result<Booking, BookingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let venue = self
            .venue(venue_id)
            .ok_or_else(|| BookingError::UnknownVenue(venue_id.to_string()))?;
        let seats: BTreeSet<String> = seats.into_iter().map(Into::into).collect();

        let candidate = BookingCandidate { venue, seats: &seats, date, time };
        if let Err(e) = self.validator.validate(&candidate, &self.bookings, self.clock.today()) {
            debug!("booking rejected for user {} at {}: {}", user_id, venue_id, e);
            return Err(e);
        }

        // Каталог гарантирует, что полная бронь помещается в Decimal
        let price = venue
            .price_for(seats.len())
            .ok_or(BookingError::PriceOutOfRange)?;
        let booking = Booking::confirmed(
            user_id.to_string(),
            venue.id.clone(),
            seats,
            date,
            time.to_string(),
            price,
        );
        info!(
            booking_id = %booking.id(),
            venue_id = %booking.venue_id(),
            seats = booking.seat_numbers().len(),
            price = %booking.price(),
            "booking confirmed"
        );

        self.bookings.push(booking.clone());
        Ok(booking)
    }

    /// Отмена брони. Повторная отмена уже отменённой брони проходит без ошибки.
    pub fn cancel_booking(&mut self, booking_id: Uuid) -> Result<(), BookingError> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id() == booking_id)
            .ok_or(BookingError::NotFound(booking_id))?;

        let from = booking.status();
        if !from.can_transition_to(BookingStatus::Cancelled) {
            warn!("refusing to cancel booking {} in status {}", booking_id, from);
            return Err(BookingError::InvalidStatusTransition {
                from,
                to: BookingStatus::Cancelled,
            });
        }
        if from == BookingStatus::Cancelled {
            debug!("booking {} already cancelled", booking_id);
            return Ok(());
        }

        booking.set_status(BookingStatus::Cancelled);
        info!("booking {} cancelled", booking_id);
        Ok(())
    }

    /// Переводит подтверждённые брони с датой раньше сегодняшней в Completed.
    /// Возвращает число изменённых броней.
    pub fn complete_past_bookings(&mut self) -> usize {
        let today = self.clock.today();
        let mut completed = 0;
        for booking in self
            .bookings
            .iter_mut()
            .filter(|b| b.status() == BookingStatus::Confirmed && b.booking_date() < today)
        {
            booking.set_status(BookingStatus::Completed);
            completed += 1;
        }
        if completed > 0 {
            info!("{} bookings marked as completed", completed);
        }
        completed
    }

    /// Схема зала на конкретный сеанс: каждое место со своим состоянием.
    pub fn seat_map(
        &self,
        venue_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> Result<Vec<SeatStatus>, BookingError> {
        let venue = self
            .venue(venue_id)
            .ok_or_else(|| BookingError::UnknownVenue(venue_id.to_string()))?;
        let layout = &venue.seat_layout;

        let booked: BTreeSet<&str> = self
            .bookings
            .iter()
            .filter(|b| {
                b.status().holds_seats()
                    && b.venue_id() == venue.id
                    && b.booking_date() == date
                    && b.booking_time() == time
            })
            .flat_map(|b| b.seat_numbers().iter().map(String::as_str))
            .collect();

        let map = layout
            .seat_codes()
            .filter_map(|code| {
                let (row, col) = parse_seat_code(&code)?;
                let state = if !layout.is_seat_available(&code) {
                    SeatState::Unavailable
                } else if booked.contains(code.as_str()) {
                    SeatState::Booked
                } else {
                    SeatState::Available
                };
                Some(SeatStatus { code, row: row + 1, number: col + 1, state })
            })
            .collect();
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_venues;
    use crate::clock::FixedClock;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()
    }

    fn store() -> BookingStore {
        BookingStore::new(sample_venues(), ValidationPolicy::default())
            .unwrap()
            .with_clock(FixedClock(today()))
    }

    fn snapshot(store: &BookingStore) -> Vec<Booking> {
        store.list_bookings(&BookingFilter::default()).into_iter().cloned().collect()
    }

    // ── Создание ─────────────────────────────────────────────────────────────

    #[test]
    fn test_create_booking_computes_price_and_confirms() {
        let mut store = store();
        let booking = store
            .create_booking("user1", "cinema1", ["A5", "A6"], today(), "19:00")
            .unwrap();
        assert_eq!(booking.status(), BookingStatus::Confirmed);
        assert_eq!(booking.price(), Decimal::new(2598, 2));
        assert_eq!(store.list_bookings(&BookingFilter::default()).len(), 1);
    }

    #[test]
    fn test_duplicate_seat_codes_are_counted_once() {
        let mut store = store();
        let booking = store
            .create_booking("user1", "rest1", ["C1", "C1"], today(), "19:00")
            .unwrap();
        assert_eq!(booking.seat_numbers().len(), 1);
        assert_eq!(booking.price(), Decimal::new(25, 0));
    }

    #[test]
    fn test_unknown_venue_is_rejected() {
        let mut store = store();
        assert_eq!(
            store.create_booking("user1", "opera", ["A1"], today(), "19:00"),
            Err(BookingError::UnknownVenue("opera".to_string()))
        );
    }

    #[test]
    fn test_failed_create_leaves_bookings_untouched() {
        let mut store = store();
        store.create_booking("user1", "cinema1", ["A1"], today(), "19:00").unwrap();
        let before = snapshot(&store);

        let yesterday = today().pred_opt().unwrap();
        let attempts = [
            store.create_booking("user1", "cinema1", Vec::<String>::new(), today(), "19:00"),
            store.create_booking("user1", "cinema1", ["A2"], yesterday, "19:00"),
            store.create_booking("user1", "rest1", ["C1", "C2", "C3", "C4", "C5", "C6", "D1"], today(), "19:00"),
            store.create_booking("user1", "cinema1", ["A1"], today(), "19:00"),
            store.create_booking("user1", "cinema1", ["A3"], today(), "10:00"),
        ];
        assert_eq!(
            attempts.map(|r| r.unwrap_err()),
            [
                BookingError::NoSeatsSelected,
                BookingError::InvalidDate,
                BookingError::MaxSeatsExceeded(6),
                BookingError::SeatConflict,
                BookingError::SeatConflict,
            ]
        );
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_cancel_releases_seat_for_rebooking() {
        let mut store = store();
        let first = store.create_booking("user1", "cinema1", ["A1"], today(), "19:00").unwrap();
        assert_eq!(
            store.create_booking("user2", "cinema1", ["A1"], today(), "19:00"),
            Err(BookingError::SeatConflict)
        );

        store.cancel_booking(first.id()).unwrap();
        let second = store.create_booking("user2", "cinema1", ["A1"], today(), "19:00").unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(store.list_bookings(&BookingFilter::default()).len(), 2);
    }

    // ── Отмена ───────────────────────────────────────────────────────────────

    #[test]
    fn test_cancel_unknown_booking_is_not_found() {
        let mut store = store();
        let id = Uuid::new_v4();
        assert_eq!(store.cancel_booking(id), Err(BookingError::NotFound(id)));
    }

    #[test]
    fn test_cancel_twice_succeeds_and_keeps_cancelled() {
        let mut store = store();
        let booking = store.create_booking("user1", "cinema1", ["B1"], today(), "13:00").unwrap();
        assert_eq!(store.cancel_booking(booking.id()), Ok(()));
        assert_eq!(store.cancel_booking(booking.id()), Ok(()));
        let stored = store.booking(booking.id()).unwrap();
        assert_eq!(stored.status(), BookingStatus::Cancelled);
        assert_eq!(stored.price(), booking.price());
    }

    #[test]
    fn test_cancel_completed_booking_is_rejected() {
        let mut store = store();
        let booking = store.create_booking("user1", "cinema1", ["B1"], today(), "13:00").unwrap();
        let mut store = store.with_clock(FixedClock(today().succ_opt().unwrap()));
        assert_eq!(store.complete_past_bookings(), 1);
        assert_eq!(
            store.cancel_booking(booking.id()),
            Err(BookingError::InvalidStatusTransition {
                from: BookingStatus::Completed,
                to: BookingStatus::Cancelled,
            })
        );
    }

    // ── Выборки ──────────────────────────────────────────────────────────────

    #[test]
    fn test_list_bookings_filters_by_user_and_venue_in_insertion_order() {
        let mut store = store();
        let a = store.create_booking("user1", "cinema1", ["A1"], today(), "19:00").unwrap();
        let b = store.create_booking("user2", "cinema1", ["A2"], today(), "19:00").unwrap();
        let c = store.create_booking("user1", "rest1", ["C1"], today(), "19:00").unwrap();

        let ids = |f: &BookingFilter| store.list_bookings(f).iter().map(|b| b.id()).collect::<Vec<_>>();
        assert_eq!(ids(&BookingFilter::default()), vec![a.id(), b.id(), c.id()]);
        assert_eq!(ids(&BookingFilter::for_user("user1")), vec![a.id(), c.id()]);
        assert_eq!(ids(&BookingFilter::for_venue("cinema1")), vec![a.id(), b.id()]);
        let both = BookingFilter { user_id: Some("user1".into()), venue_id: Some("rest1".into()) };
        assert_eq!(ids(&both), vec![c.id()]);
    }

    #[test]
    fn test_complete_past_bookings_skips_cancelled_and_future() {
        let mut store = store();
        let past = store.create_booking("user1", "cinema1", ["A1"], today(), "19:00").unwrap();
        let cancelled = store.create_booking("user1", "cinema1", ["A2"], today(), "19:00").unwrap();
        let future = store
            .create_booking("user1", "cinema1", ["A1"], today() + chrono::Duration::days(5), "19:00")
            .unwrap();
        store.cancel_booking(cancelled.id()).unwrap();

        let mut store = store.with_clock(FixedClock(today() + chrono::Duration::days(1)));
        assert_eq!(store.complete_past_bookings(), 1);
        assert_eq!(store.booking(past.id()).unwrap().status(), BookingStatus::Completed);
        assert_eq!(store.booking(cancelled.id()).unwrap().status(), BookingStatus::Cancelled);
        assert_eq!(store.booking(future.id()).unwrap().status(), BookingStatus::Confirmed);
        assert_eq!(store.complete_past_bookings(), 0);
    }

    #[test]
    fn test_seat_map_marks_unavailable_and_booked_seats() {
        let mut store = store();
        store.create_booking("user1", "cinema1", ["A1", "A2"], today(), "19:00").unwrap();

        let map = store.seat_map("cinema1", today(), "19:00").unwrap();
        assert_eq!(map.len(), 48);
        let state = |code: &str| map.iter().find(|s| s.code == code).unwrap().state;
        assert_eq!(state("A1"), SeatState::Booked);
        assert_eq!(state("A3"), SeatState::Unavailable);
        assert_eq!(state("A4"), SeatState::Available);

        let other_slot = store.seat_map("cinema1", today(), "22:00").unwrap();
        assert!(other_slot.iter().all(|s| s.state != SeatState::Booked));
    }

    #[test]
    fn test_new_rejects_price_that_would_overflow() {
        let mut venues = sample_venues();
        venues[0].base_price = Decimal::MAX;
        assert!(matches!(
            BookingStore::new(venues, ValidationPolicy::default()),
            Err(CatalogError::InvalidVenue { venue, .. }) if venue == "cinema1"
        ));
    }

    #[test]
    fn test_max_price_single_seat_venue_books_without_overflow() {
        let mut venues = sample_venues();
        venues[0].base_price = Decimal::MAX;
        venues[0].max_seats_per_booking = 1;
        let mut store = BookingStore::new(venues, ValidationPolicy::default())
            .unwrap()
            .with_clock(FixedClock(today()));

        let booking = store.create_booking("user1", "cinema1", ["A1"], today(), "19:00").unwrap();
        assert_eq!(booking.price(), Decimal::MAX);
        assert_eq!(
            store.create_booking("user1", "cinema1", ["A2", "A4"], today(), "19:00"),
            Err(BookingError::MaxSeatsExceeded(1))
        );
    }

    #[test]
    fn test_new_rejects_duplicate_venue_ids() {
        let mut venues = sample_venues();
        venues.push(venues[0].clone());
        assert!(matches!(
            BookingStore::new(venues, ValidationPolicy::default()),
            Err(CatalogError::DuplicateVenue(id)) if id == "cinema1"
        ));
    }
}
