//! Slot entity
//!
//! One bookable time range of a facility. (facility_id, date, start_time)
//! is unique per the schema.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "slots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub facility_id: Uuid,

    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,

    pub is_available: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::facility::Entity",
        from = "Column::FacilityId",
        to = "super::facility::Column::Id"
    )]
    Facility,
}

impl Related<super::facility::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Facility.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        super::booking_slot::Relation::Booking.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::booking_slot::Relation::Slot.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
