//! API data transfer objects

mod booking;
mod common;
mod facility;
mod slot;

pub use booking::{
    BookingResponse, BookingUser, CompletionResponse, CreateBookingRequest,
    CreatedBookingResponse,
};
pub use common::{ApiResponse, EmptyData, PaginatedResponse, PaginationParams};
pub use facility::{FacilityRequest, FacilityResponse};
pub use slot::{SlotRequest, SlotResponse};
