//! Catalog service for facility and slot management
//!
//! All mutating operations are scoped to the owning administrator;
//! a lookup miss and an ownership miss are both reported as not found.

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use log::info;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, Facility, Principal, RepositoryProvider, Slot,
};

/// Fields for creating a facility
#[derive(Debug, Clone)]
pub struct NewFacility {
    pub name: String,
    pub location: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
}

/// Fields for updating a facility
#[derive(Debug, Clone)]
pub struct FacilityUpdate {
    pub name: String,
    pub location: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
}

/// Fields for creating or updating a slot
#[derive(Debug, Clone)]
pub struct SlotInput {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Service for facility and slot administration
pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
    /// How many days ahead of today players can see available slots
    slot_window_days: u32,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, slot_window_days: u32) -> Self {
        Self {
            repos,
            slot_window_days,
        }
    }

    fn require_admin(principal: &Principal) -> DomainResult<()> {
        if principal.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden(
                "administrator role required".to_string(),
            ))
        }
    }

    /// Resolve a facility owned by the principal, or not found
    async fn owned_facility(&self, principal: &Principal, id: Uuid) -> DomainResult<Facility> {
        self.repos
            .facilities()
            .find_by_id_for_owner(id, principal.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Facility", id))
    }

    // ── Facilities ──────────────────────────────────────────────

    pub async fn create_facility(
        &self,
        principal: &Principal,
        input: NewFacility,
    ) -> DomainResult<Facility> {
        Self::require_admin(principal)?;

        if input.price < Decimal::ZERO {
            return Err(DomainError::Validation(
                "price must not be negative".to_string(),
            ));
        }

        let facility = Facility::new(
            principal.id,
            input.name,
            input.location,
            input.description,
            input.price,
            input.image_url,
        );
        self.repos.facilities().save(facility.clone()).await?;

        info!("Facility {} created by {}", facility.id, principal.id);
        Ok(facility)
    }

    pub async fn get_facility(&self, principal: &Principal, id: Uuid) -> DomainResult<Facility> {
        Self::require_admin(principal)?;
        self.owned_facility(principal, id).await
    }

    pub async fn list_facilities(
        &self,
        principal: &Principal,
        search: Option<&str>,
        page: u32,
        limit: u32,
    ) -> DomainResult<(Vec<Facility>, u64)> {
        Self::require_admin(principal)?;
        self.repos
            .facilities()
            .find_for_owner(principal.id, search, page, limit)
            .await
    }

    pub async fn update_facility(
        &self,
        principal: &Principal,
        id: Uuid,
        update: FacilityUpdate,
    ) -> DomainResult<Facility> {
        Self::require_admin(principal)?;

        if update.price < Decimal::ZERO {
            return Err(DomainError::Validation(
                "price must not be negative".to_string(),
            ));
        }

        let mut facility = self.owned_facility(principal, id).await?;
        facility.name = update.name;
        facility.location = update.location;
        facility.description = update.description;
        facility.price = update.price;
        facility.image_url = update.image_url;
        facility.updated_at = chrono::Utc::now();

        self.repos.facilities().update(facility.clone()).await?;
        Ok(facility)
    }

    pub async fn delete_facility(&self, principal: &Principal, id: Uuid) -> DomainResult<()> {
        Self::require_admin(principal)?;
        let facility = self.owned_facility(principal, id).await?;
        self.repos.facilities().delete(facility.id).await?;
        info!("Facility {} deleted by {}", id, principal.id);
        Ok(())
    }

    // ── Slots ───────────────────────────────────────────────────

    fn validate_slot_times(input: &SlotInput) -> DomainResult<()> {
        if input.start_time >= input.end_time {
            return Err(DomainError::Validation(
                "start_time must be before end_time".to_string(),
            ));
        }
        if input.date < Local::now().date_naive() {
            return Err(DomainError::Validation(
                "date must not be in the past".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn create_slot(
        &self,
        principal: &Principal,
        facility_id: Uuid,
        input: SlotInput,
    ) -> DomainResult<Slot> {
        Self::require_admin(principal)?;
        let facility = self.owned_facility(principal, facility_id).await?;
        Self::validate_slot_times(&input)?;

        let clash = self
            .repos
            .slots()
            .exists_overlapping(facility.id, input.date, input.start_time, input.end_time, None)
            .await?;
        if clash {
            return Err(DomainError::Conflict(format!(
                "slot overlapping {} {}-{} on facility {}",
                input.date, input.start_time, input.end_time, facility.id
            )));
        }

        let slot = Slot::new(facility.id, input.date, input.start_time, input.end_time);
        self.repos.slots().save(slot.clone()).await?;

        info!("Slot {} created on facility {}", slot.id, facility.id);
        Ok(slot)
    }

    pub async fn list_slots(
        &self,
        principal: &Principal,
        facility_id: Uuid,
    ) -> DomainResult<Vec<Slot>> {
        Self::require_admin(principal)?;
        let facility = self.owned_facility(principal, facility_id).await?;
        self.repos.slots().find_for_facility(facility.id).await
    }

    /// Resolve a slot plus the ownership of its facility
    async fn owned_slot(&self, principal: &Principal, id: Uuid) -> DomainResult<Slot> {
        let slot = self
            .repos
            .slots()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Slot", id))?;
        // ownership miss looks identical to a missing slot
        self.repos
            .facilities()
            .find_by_id_for_owner(slot.facility_id, principal.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Slot", id))?;
        Ok(slot)
    }

    pub async fn get_slot(&self, principal: &Principal, id: Uuid) -> DomainResult<Slot> {
        Self::require_admin(principal)?;
        self.owned_slot(principal, id).await
    }

    pub async fn update_slot(
        &self,
        principal: &Principal,
        id: Uuid,
        input: SlotInput,
    ) -> DomainResult<Slot> {
        Self::require_admin(principal)?;
        let mut slot = self.owned_slot(principal, id).await?;
        Self::validate_slot_times(&input)?;

        let clash = self
            .repos
            .slots()
            .exists_overlapping(
                slot.facility_id,
                input.date,
                input.start_time,
                input.end_time,
                Some(slot.id),
            )
            .await?;
        if clash {
            return Err(DomainError::Conflict(format!(
                "slot overlapping {} {}-{} on facility {}",
                input.date, input.start_time, input.end_time, slot.facility_id
            )));
        }

        slot.date = input.date;
        slot.start_time = input.start_time;
        slot.end_time = input.end_time;
        slot.updated_at = chrono::Utc::now();

        self.repos.slots().update(slot.clone()).await?;
        Ok(slot)
    }

    pub async fn delete_slot(&self, principal: &Principal, id: Uuid) -> DomainResult<()> {
        Self::require_admin(principal)?;
        let slot = self.owned_slot(principal, id).await?;
        self.repos.slots().delete(slot.id).await?;
        info!("Slot {} deleted by {}", id, principal.id);
        Ok(())
    }

    /// Available slots of a facility within the booking window, any role
    pub async fn list_available_slots(&self, facility_id: Uuid) -> DomainResult<Vec<Slot>> {
        self.repos
            .facilities()
            .find_by_id(facility_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Facility", facility_id))?;

        let today = Local::now().date_naive();
        let to = today + Duration::days(self.slot_window_days as i64);
        self.repos
            .slots()
            .find_available_in_window(facility_id, today, to)
            .await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn admin() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            role: Role::Admin,
        }
    }

    fn player() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            role: Role::Player,
        }
    }

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryRepositoryProvider::new()), 2)
    }

    fn new_facility() -> NewFacility {
        NewFacility {
            name: "Arena North".to_string(),
            location: "Riverside".to_string(),
            description: "Indoor futsal court".to_string(),
            price: Decimal::from(120_000),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn player_cannot_create_facility() {
        let svc = service();
        let err = svc
            .create_facility(&player(), new_facility())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn facility_is_scoped_to_its_owner() {
        let svc = service();
        let owner = admin();
        let facility = svc.create_facility(&owner, new_facility()).await.unwrap();

        let other = admin();
        let err = svc.get_facility(&other, facility.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let found = svc.get_facility(&owner, facility.id).await.unwrap();
        assert_eq!(found.id, facility.id);
    }

    #[tokio::test]
    async fn list_facilities_filters_by_search() {
        let svc = service();
        let owner = admin();
        svc.create_facility(&owner, new_facility()).await.unwrap();
        svc.create_facility(
            &owner,
            NewFacility {
                name: "Badminton Hall".to_string(),
                ..new_facility()
            },
        )
        .await
        .unwrap();

        let (all, total) = svc
            .list_facilities(&owner, None, 1, 10)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(total, 2);

        let (hits, total) = svc
            .list_facilities(&owner, Some("Badminton"), 1, 10)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(total, 1);
        assert_eq!(hits[0].name, "Badminton Hall");
    }

    #[tokio::test]
    async fn slot_requires_start_before_end() {
        let svc = service();
        let owner = admin();
        let facility = svc.create_facility(&owner, new_facility()).await.unwrap();

        let date = Local::now().date_naive() + Duration::days(1);
        let err = svc
            .create_slot(
                &owner,
                facility.id,
                SlotInput {
                    date,
                    start_time: t(11),
                    end_time: t(10),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn slot_rejects_past_date() {
        let svc = service();
        let owner = admin();
        let facility = svc.create_facility(&owner, new_facility()).await.unwrap();

        let err = svc
            .create_slot(
                &owner,
                facility.id,
                SlotInput {
                    date: Local::now().date_naive() - Duration::days(1),
                    start_time: t(10),
                    end_time: t(11),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn overlapping_slot_is_rejected() {
        let svc = service();
        let owner = admin();
        let facility = svc.create_facility(&owner, new_facility()).await.unwrap();
        let date = Local::now().date_naive() + Duration::days(1);

        svc.create_slot(
            &owner,
            facility.id,
            SlotInput {
                date,
                start_time: t(10),
                end_time: t(12),
            },
        )
        .await
        .unwrap();

        let err = svc
            .create_slot(
                &owner,
                facility.id,
                SlotInput {
                    date,
                    start_time: t(11),
                    end_time: t(13),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // adjacent ranges do not overlap
        svc.create_slot(
            &owner,
            facility.id,
            SlotInput {
                date,
                start_time: t(12),
                end_time: t(13),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn available_slots_respect_window() {
        let svc = service();
        let owner = admin();
        let facility = svc.create_facility(&owner, new_facility()).await.unwrap();
        let today = Local::now().date_naive();

        for days in 0..4 {
            svc.create_slot(
                &owner,
                facility.id,
                SlotInput {
                    date: today + Duration::days(days),
                    start_time: t(10),
                    end_time: t(11),
                },
            )
            .await
            .unwrap();
        }

        // window_days = 2: today, tomorrow and the day after qualify
        let available = svc.list_available_slots(facility.id).await.unwrap();
        assert_eq!(available.len(), 3);
    }
}
