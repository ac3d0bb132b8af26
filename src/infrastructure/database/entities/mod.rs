//! Database entities module

pub mod booking;
pub mod booking_slot;
pub mod facility;
pub mod slot;
pub mod user;

pub use booking::Entity as Booking;
pub use booking_slot::Entity as BookingSlot;
pub use facility::Entity as Facility;
pub use slot::Entity as Slot;
pub use user::Entity as User;
