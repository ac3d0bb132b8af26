//! Facility aggregate

pub mod model;
pub mod repository;

pub use model::Facility;
pub use repository::FacilityRepository;
