//! SeaORM repository implementations

pub mod booking_repository;
pub mod facility_repository;
pub mod repository_provider;
pub mod slot_repository;
pub mod user_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use facility_repository::SeaOrmFacilityRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use slot_repository::SeaOrmSlotRepository;
pub use user_repository::SeaOrmUserRepository;
