//! Application services

mod catalog;
mod expiry_sweep;
mod reservation;

pub use catalog::{CatalogService, FacilityUpdate, NewFacility, SlotInput};
pub use expiry_sweep::ExpirySweep;
pub use reservation::{
    BookingView, CompletionOutcome, ReservationPolicy, ReservationService,
};
