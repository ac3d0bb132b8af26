//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, booking_slot, facility};

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        facility_id: m.facility_id,
        user_id: m.user_id,
        status: BookingStatus::from_str(&m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn save(&self, b: Booking, slot_ids: &[Uuid]) -> DomainResult<()> {
        debug!("Saving booking {} with {} slots", b.id, slot_ids.len());

        // Booking row and its join rows commit together.
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = booking::ActiveModel {
            id: Set(b.id),
            facility_id: Set(b.facility_id),
            user_id: Set(b.user_id),
            status: Set(b.status.as_str().to_string()),
            created_at: Set(b.created_at),
            updated_at: Set(b.updated_at),
        };
        model.insert(&txn).await.map_err(db_err)?;

        let attachments: Vec<booking_slot::ActiveModel> = slot_ids
            .iter()
            .map(|&slot_id| booking_slot::ActiveModel {
                booking_id: Set(b.id),
                slot_id: Set(slot_id),
            })
            .collect();
        if !attachments.is_empty() {
            booking_slot::Entity::insert_many(attachments)
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .filter(booking::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_id_for_facility_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .inner_join(facility::Entity)
            .filter(facility::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_for_facility_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .inner_join(facility::Entity)
            .filter(facility::Column::OwnerId.eq(owner_id))
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_pending(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq(BookingStatus::Pending.as_str()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> DomainResult<()> {
        let result = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(status.as_str()))
            .col_expr(booking::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(booking::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Booking", id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        booking_slot::Entity::delete_many()
            .filter(booking_slot::Column::BookingId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let result = booking::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Booking", id));
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}
