//! Booking repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Booking, BookingStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Save a new booking together with its slot attachments
    async fn save(&self, booking: Booking, slot_ids: &[Uuid]) -> DomainResult<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>>;

    /// Find booking by ID, scoped to its owning user. Ownership misses are
    /// indistinguishable from missing rows by design.
    async fn find_by_id_for_user(&self, id: Uuid, user_id: Uuid)
        -> DomainResult<Option<Booking>>;

    /// Find booking by ID, scoped to bookings whose facility is owned by
    /// the given administrator
    async fn find_by_id_for_facility_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> DomainResult<Option<Booking>>;

    /// All bookings of a user, newest first
    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Booking>>;

    /// All bookings against facilities owned by an administrator, newest first
    async fn find_for_facility_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Booking>>;

    /// All bookings still in pending status (for the expiry sweep)
    async fn find_pending(&self) -> DomainResult<Vec<Booking>>;

    /// Persist a status transition
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> DomainResult<()>;

    /// Delete a booking and its slot attachments
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
