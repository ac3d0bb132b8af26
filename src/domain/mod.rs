//! Core business entities, repository traits and the error taxonomy

pub mod booking;
pub mod error;
pub mod facility;
pub mod repositories;
pub mod slot;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingStatus};
pub use error::{DomainError, DomainResult};
pub use facility::Facility;
pub use repositories::RepositoryProvider;
pub use slot::Slot;
pub use user::{Principal, Role, User};
