pub mod seat;
pub mod venue;
pub mod booking;

pub use seat::SeatLayout;
pub use venue::{Venue, VenueType};
pub use booking::{Booking, BookingStatus};
