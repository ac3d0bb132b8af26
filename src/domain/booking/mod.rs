//! Booking aggregate

pub mod model;
pub mod repository;

pub use model::{Booking, BookingStatus};
pub use repository::BookingRepository;
