//! SeaORM implementation of SlotRepository

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use log::debug;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::slot::{Slot, SlotRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking_slot, slot};

pub struct SeaOrmSlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmSlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: slot::Model) -> Slot {
    Slot {
        id: m.id,
        facility_id: m.facility_id,
        date: m.date,
        start_time: m.start_time,
        end_time: m.end_time,
        is_available: m.is_available,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(s: Slot) -> slot::ActiveModel {
    slot::ActiveModel {
        id: Set(s.id),
        facility_id: Set(s.facility_id),
        date: Set(s.date),
        start_time: Set(s.start_time),
        end_time: Set(s.end_time),
        is_available: Set(s.is_available),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── SlotRepository impl ─────────────────────────────────────────

#[async_trait]
impl SlotRepository for SeaOrmSlotRepository {
    async fn save(&self, s: Slot) -> DomainResult<()> {
        debug!("Saving slot: {}", s.id);
        domain_to_active(s).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Slot>> {
        let model = slot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_facility(&self, facility_id: Uuid) -> DomainResult<Vec<Slot>> {
        let models = slot::Entity::find()
            .filter(slot::Column::FacilityId.eq(facility_id))
            .order_by_asc(slot::Column::Date)
            .order_by_asc(slot::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_available_in_window(
        &self,
        facility_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<Slot>> {
        let models = slot::Entity::find()
            .filter(slot::Column::FacilityId.eq(facility_id))
            .filter(slot::Column::IsAvailable.eq(true))
            .filter(slot::Column::Date.gte(from))
            .filter(slot::Column::Date.lte(to))
            .order_by_asc(slot::Column::Date)
            .order_by_asc(slot::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_for_booking(&self, booking_id: Uuid) -> DomainResult<Vec<Slot>> {
        let slot_ids: Vec<Uuid> = booking_slot::Entity::find()
            .filter(booking_slot::Column::BookingId.eq(booking_id))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|m| m.slot_id)
            .collect();

        if slot_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = slot::Entity::find()
            .filter(slot::Column::Id.is_in(slot_ids))
            .order_by_asc(slot::Column::Date)
            .order_by_asc(slot::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn exists_overlapping(
        &self,
        facility_id: Uuid,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<Uuid>,
    ) -> DomainResult<bool> {
        let mut query = slot::Entity::find()
            .filter(slot::Column::FacilityId.eq(facility_id))
            .filter(slot::Column::Date.eq(date))
            .filter(slot::Column::StartTime.lt(end))
            .filter(slot::Column::EndTime.gt(start));

        if let Some(id) = exclude {
            query = query.filter(slot::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(db_err)?;
        Ok(count > 0)
    }

    async fn reserve_if_available(
        &self,
        facility_id: Uuid,
        slot_ids: &[Uuid],
    ) -> DomainResult<Vec<Uuid>> {
        // Conditional update per slot: the availability check and the flip
        // happen in one statement, so two racing requests cannot both win
        // the same slot.
        let mut reserved = Vec::with_capacity(slot_ids.len());

        for &slot_id in slot_ids {
            let result = slot::Entity::update_many()
                .col_expr(slot::Column::IsAvailable, Expr::value(false))
                .col_expr(slot::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(slot::Column::Id.eq(slot_id))
                .filter(slot::Column::FacilityId.eq(facility_id))
                .filter(slot::Column::IsAvailable.eq(true))
                .exec(&self.db)
                .await
                .map_err(db_err)?;

            if result.rows_affected == 1 {
                reserved.push(slot_id);
            }
        }

        debug!(
            "Reserved {}/{} requested slots for facility {}",
            reserved.len(),
            slot_ids.len(),
            facility_id
        );
        Ok(reserved)
    }

    async fn release(&self, slot_ids: &[Uuid]) -> DomainResult<()> {
        if slot_ids.is_empty() {
            return Ok(());
        }

        slot::Entity::update_many()
            .col_expr(slot::Column::IsAvailable, Expr::value(true))
            .col_expr(slot::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(slot::Column::Id.is_in(slot_ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, s: Slot) -> DomainResult<()> {
        debug!("Updating slot: {}", s.id);

        let existing = slot::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("Slot", s.id));
        }

        domain_to_active(s).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = slot::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Slot", id));
        }
        Ok(())
    }
}
