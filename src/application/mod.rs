//! Application layer - use cases built on the domain repositories

pub mod services;

pub use services::{
    BookingView, CatalogService, CompletionOutcome, ExpirySweep, FacilityUpdate,
    NewFacility, ReservationPolicy, ReservationService, SlotInput,
};
