//! User aggregate

pub mod model;
pub mod repository;

pub use model::{Principal, Role, User};
pub use repository::UserRepository;
