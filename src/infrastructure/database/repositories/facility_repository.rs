//! SeaORM implementation of FacilityRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::facility::{Facility, FacilityRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::facility;

pub struct SeaOrmFacilityRepository {
    db: DatabaseConnection,
}

impl SeaOrmFacilityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: facility::Model) -> Facility {
    Facility {
        id: m.id,
        owner_id: m.owner_id,
        name: m.name,
        location: m.location,
        description: m.description,
        price: m.price,
        image_url: m.image_url,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(f: Facility) -> facility::ActiveModel {
    facility::ActiveModel {
        id: Set(f.id),
        owner_id: Set(f.owner_id),
        name: Set(f.name),
        location: Set(f.location),
        description: Set(f.description),
        price: Set(f.price),
        image_url: Set(f.image_url),
        created_at: Set(f.created_at),
        updated_at: Set(f.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── FacilityRepository impl ─────────────────────────────────────

#[async_trait]
impl FacilityRepository for SeaOrmFacilityRepository {
    async fn save(&self, f: Facility) -> DomainResult<()> {
        debug!("Saving facility: {}", f.id);
        domain_to_active(f).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Facility>> {
        let model = facility::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_id_for_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> DomainResult<Option<Facility>> {
        let model = facility::Entity::find_by_id(id)
            .filter(facility::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_owner(
        &self,
        owner_id: Uuid,
        search: Option<&str>,
        page: u32,
        limit: u32,
    ) -> DomainResult<(Vec<Facility>, u64)> {
        let mut query = facility::Entity::find().filter(facility::Column::OwnerId.eq(owner_id));

        if let Some(term) = search.filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(facility::Column::Name.contains(term))
                    .add(facility::Column::Location.contains(term)),
            );
        }

        let paginator = query
            .order_by_desc(facility::Column::CreatedAt)
            .paginate(&self.db, limit.max(1) as u64);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(page.saturating_sub(1) as u64)
            .await
            .map_err(db_err)?;

        Ok((models.into_iter().map(model_to_domain).collect(), total))
    }

    async fn update(&self, f: Facility) -> DomainResult<()> {
        debug!("Updating facility: {}", f.id);

        let existing = facility::Entity::find_by_id(f.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("Facility", f.id));
        }

        domain_to_active(f).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = facility::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Facility", id));
        }
        Ok(())
    }
}
