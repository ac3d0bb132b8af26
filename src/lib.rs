//! # Courtly
//!
//! Sports facility booking service: administrators publish facilities and
//! bookable time slots, players reserve them.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, repository traits and errors
//! - **application**: Business logic and use cases
//! - **infrastructure**: External concerns (database, in-memory storage)
//! - **api**: REST API with Swagger documentation
//! - **auth**: JWT authentication

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig, InMemoryRepositoryProvider};

// Re-export API router
pub use api::create_api_router;
