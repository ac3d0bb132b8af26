//! Slot repository interface

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::model::Slot;
use crate::domain::DomainResult;

#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Save a new slot
    async fn save(&self, slot: Slot) -> DomainResult<()>;

    /// Find slot by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Slot>>;

    /// All slots of a facility, ordered by (date, start_time)
    async fn find_for_facility(&self, facility_id: Uuid) -> DomainResult<Vec<Slot>>;

    /// Available slots of a facility with date in `[from, to]` inclusive,
    /// ordered by (date, start_time)
    async fn find_available_in_window(
        &self,
        facility_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<Slot>>;

    /// Slots attached to a booking, ordered by (date, start_time)
    async fn find_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<Slot>>;

    /// Whether the facility already has a slot on `date` whose time range
    /// intersects `[start, end)`. `exclude` skips one slot id (for updates).
    async fn exists_overlapping(
        &self,
        facility_id: Uuid,
        date: NaiveDate,
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
        exclude: Option<Uuid>,
    ) -> DomainResult<bool>;

    /// Conditionally flip `is_available` true -> false for the given slots,
    /// restricted to `facility_id`. Returns the ids actually reserved; a
    /// concurrent request racing on the same slot loses here rather than
    /// double-booking.
    async fn reserve_if_available(
        &self,
        facility_id: Uuid,
        slot_ids: &[Uuid],
    ) -> DomainResult<Vec<Uuid>>;

    /// Flip `is_available` back to true for the given slots
    async fn release(&self, slot_ids: &[Uuid]) -> DomainResult<()>;

    /// Update an existing slot
    async fn update(&self, slot: Slot) -> DomainResult<()>;

    /// Delete a slot
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
