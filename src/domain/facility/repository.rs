//! Facility repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Facility;
use crate::domain::DomainResult;

#[async_trait]
pub trait FacilityRepository: Send + Sync {
    /// Save a new facility
    async fn save(&self, facility: Facility) -> DomainResult<()>;

    /// Find facility by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Facility>>;

    /// Find facility by ID, scoped to its owning administrator
    async fn find_by_id_for_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> DomainResult<Option<Facility>>;

    /// List facilities of an administrator, newest first, with optional
    /// name/location substring search. Returns the page plus total count.
    async fn find_for_owner(
        &self,
        owner_id: Uuid,
        search: Option<&str>,
        page: u32,
        limit: u32,
    ) -> DomainResult<(Vec<Facility>, u64)>;

    /// Update an existing facility
    async fn update(&self, facility: Facility) -> DomainResult<()>;

    /// Delete a facility (cascades to its slots)
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
