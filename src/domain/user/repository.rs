//! User repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user
    async fn save(&self, user: User) -> DomainResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Find user by unique username
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    /// Number of registered users
    async fn count(&self) -> DomainResult<u64>;
}
