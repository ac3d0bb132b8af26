//! Authentication and authorization
//!
//! JWT bearer tokens; the middleware resolves a token into an
//! `AuthenticatedUser` whose `principal()` is what services consume.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{create_token, verify_token, AuthError, Claims, JwtConfig};
pub use middleware::{auth_middleware, AuthState, AuthenticatedUser};
pub use password::{hash_password, verify_password};
