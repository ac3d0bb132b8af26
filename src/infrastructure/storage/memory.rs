//! In-memory repository implementations for development and testing

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::facility::{Facility, FacilityRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::slot::{Slot, SlotRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, DomainResult};

/// Shared backing maps for the in-memory repositories
#[derive(Default)]
struct Store {
    users: DashMap<Uuid, User>,
    facilities: DashMap<Uuid, Facility>,
    slots: DashMap<Uuid, Slot>,
    bookings: DashMap<Uuid, Booking>,
    /// booking id -> attached slot ids
    booking_slots: DashMap<Uuid, Vec<Uuid>>,
}

/// In-memory `RepositoryProvider` for development and tests.
///
/// Mirrors the SeaORM provider's semantics, including the conditional
/// slot reserve (the per-entry lock of the map plays the role of the
/// conditional UPDATE).
pub struct InMemoryRepositoryProvider {
    users: InMemoryUserRepository,
    facilities: InMemoryFacilityRepository,
    slots: InMemorySlotRepository,
    bookings: InMemoryBookingRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let store = Arc::new(Store::default());
        Self {
            users: InMemoryUserRepository {
                store: store.clone(),
            },
            facilities: InMemoryFacilityRepository {
                store: store.clone(),
            },
            slots: InMemorySlotRepository {
                store: store.clone(),
            },
            bookings: InMemoryBookingRepository { store },
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn facilities(&self) -> &dyn FacilityRepository {
        &self.facilities
    }

    fn slots(&self) -> &dyn SlotRepository {
        &self.slots
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }
}

// ── Users ───────────────────────────────────────────────────────

struct InMemoryUserRepository {
    store: Arc<Store>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: User) -> DomainResult<()> {
        if self
            .store
            .users
            .iter()
            .any(|u| u.username == user.username)
        {
            return Err(DomainError::Conflict(format!(
                "username '{}' is taken",
                user.username
            )));
        }
        self.store.users.insert(user.id, user);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        Ok(self.store.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .store
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.clone()))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.store.users.len() as u64)
    }
}

// ── Facilities ──────────────────────────────────────────────────

struct InMemoryFacilityRepository {
    store: Arc<Store>,
}

#[async_trait]
impl FacilityRepository for InMemoryFacilityRepository {
    async fn save(&self, facility: Facility) -> DomainResult<()> {
        self.store.facilities.insert(facility.id, facility);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Facility>> {
        Ok(self.store.facilities.get(&id).map(|f| f.clone()))
    }

    async fn find_by_id_for_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> DomainResult<Option<Facility>> {
        Ok(self
            .store
            .facilities
            .get(&id)
            .filter(|f| f.owner_id == owner_id)
            .map(|f| f.clone()))
    }

    async fn find_for_owner(
        &self,
        owner_id: Uuid,
        search: Option<&str>,
        page: u32,
        limit: u32,
    ) -> DomainResult<(Vec<Facility>, u64)> {
        let mut all: Vec<Facility> = self
            .store
            .facilities
            .iter()
            .filter(|f| f.owner_id == owner_id)
            .filter(|f| match search.filter(|s| !s.is_empty()) {
                Some(term) => f.name.contains(term) || f.location.contains(term),
                None => true,
            })
            .map(|f| f.clone())
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = all.len() as u64;
        let limit = limit.max(1) as usize;
        let offset = page.saturating_sub(1) as usize * limit;
        let items = all.into_iter().skip(offset).take(limit).collect();
        Ok((items, total))
    }

    async fn update(&self, facility: Facility) -> DomainResult<()> {
        if !self.store.facilities.contains_key(&facility.id) {
            return Err(DomainError::not_found("Facility", facility.id));
        }
        self.store.facilities.insert(facility.id, facility);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if self.store.facilities.remove(&id).is_none() {
            return Err(DomainError::not_found("Facility", id));
        }
        // cascade to slots, as the FK does in SQL
        self.store.slots.retain(|_, s| s.facility_id != id);
        Ok(())
    }
}

// ── Slots ───────────────────────────────────────────────────────

struct InMemorySlotRepository {
    store: Arc<Store>,
}

#[async_trait]
impl SlotRepository for InMemorySlotRepository {
    async fn save(&self, slot: Slot) -> DomainResult<()> {
        self.store.slots.insert(slot.id, slot);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Slot>> {
        Ok(self.store.slots.get(&id).map(|s| s.clone()))
    }

    async fn find_for_facility(&self, facility_id: Uuid) -> DomainResult<Vec<Slot>> {
        let mut slots: Vec<Slot> = self
            .store
            .slots
            .iter()
            .filter(|s| s.facility_id == facility_id)
            .map(|s| s.clone())
            .collect();
        slots.sort_by_key(|s| (s.date, s.start_time));
        Ok(slots)
    }

    async fn find_available_in_window(
        &self,
        facility_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<Slot>> {
        let mut slots: Vec<Slot> = self
            .store
            .slots
            .iter()
            .filter(|s| {
                s.facility_id == facility_id
                    && s.is_available
                    && s.date >= from
                    && s.date <= to
            })
            .map(|s| s.clone())
            .collect();
        slots.sort_by_key(|s| (s.date, s.start_time));
        Ok(slots)
    }

    async fn find_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<Slot>> {
        let ids = self
            .store
            .booking_slots
            .get(&booking_id)
            .map(|v| v.clone())
            .unwrap_or_default();
        let mut slots: Vec<Slot> = ids
            .iter()
            .filter_map(|id| self.store.slots.get(id).map(|s| s.clone()))
            .collect();
        slots.sort_by_key(|s| (s.date, s.start_time));
        Ok(slots)
    }

    async fn exists_overlapping(
        &self,
        facility_id: Uuid,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<Uuid>,
    ) -> DomainResult<bool> {
        Ok(self.store.slots.iter().any(|s| {
            s.facility_id == facility_id
                && Some(s.id) != exclude
                && s.overlaps(date, start, end)
        }))
    }

    async fn reserve_if_available(
        &self,
        facility_id: Uuid,
        slot_ids: &[Uuid],
    ) -> DomainResult<Vec<Uuid>> {
        let mut reserved = Vec::with_capacity(slot_ids.len());
        for slot_id in slot_ids {
            // get_mut holds the shard lock, so the check and the flip are
            // atomic per slot
            if let Some(mut slot) = self.store.slots.get_mut(slot_id) {
                if slot.facility_id == facility_id && slot.is_available {
                    slot.is_available = false;
                    slot.updated_at = Utc::now();
                    reserved.push(*slot_id);
                }
            }
        }
        Ok(reserved)
    }

    async fn release(&self, slot_ids: &[Uuid]) -> DomainResult<()> {
        for slot_id in slot_ids {
            if let Some(mut slot) = self.store.slots.get_mut(slot_id) {
                slot.is_available = true;
                slot.updated_at = Utc::now();
            }
        }
        Ok(())
    }

    async fn update(&self, slot: Slot) -> DomainResult<()> {
        if !self.store.slots.contains_key(&slot.id) {
            return Err(DomainError::not_found("Slot", slot.id));
        }
        self.store.slots.insert(slot.id, slot);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if self.store.slots.remove(&id).is_none() {
            return Err(DomainError::not_found("Slot", id));
        }
        Ok(())
    }
}

// ── Bookings ────────────────────────────────────────────────────

struct InMemoryBookingRepository {
    store: Arc<Store>,
}

impl InMemoryBookingRepository {
    fn facility_owner(&self, facility_id: Uuid) -> Option<Uuid> {
        self.store.facilities.get(&facility_id).map(|f| f.owner_id)
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: Booking, slot_ids: &[Uuid]) -> DomainResult<()> {
        self.store
            .booking_slots
            .insert(booking.id, slot_ids.to_vec());
        self.store.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        Ok(self.store.bookings.get(&id).map(|b| b.clone()))
    }

    async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> DomainResult<Option<Booking>> {
        Ok(self
            .store
            .bookings
            .get(&id)
            .filter(|b| b.user_id == user_id)
            .map(|b| b.clone()))
    }

    async fn find_by_id_for_facility_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> DomainResult<Option<Booking>> {
        Ok(self
            .store
            .bookings
            .get(&id)
            .filter(|b| self.facility_owner(b.facility_id) == Some(owner_id))
            .map(|b| b.clone()))
    }

    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .store
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(|b| b.clone())
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn find_for_facility_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .store
            .bookings
            .iter()
            .filter(|b| self.facility_owner(b.facility_id) == Some(owner_id))
            .map(|b| b.clone())
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn find_pending(&self) -> DomainResult<Vec<Booking>> {
        Ok(self
            .store
            .bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Pending)
            .map(|b| b.clone())
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> DomainResult<()> {
        let Some(mut booking) = self.store.bookings.get_mut(&id) else {
            return Err(DomainError::not_found("Booking", id));
        };
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if self.store.bookings.remove(&id).is_none() {
            return Err(DomainError::not_found("Booking", id));
        }
        self.store.booking_slots.remove(&id);
        Ok(())
    }
}
