//! Create slots table
//!
//! Bookable time ranges per facility. (facility_id, date, start_time) is
//! unique so the same hour cannot be listed twice.

use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_facilities::Facilities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Slots::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Slots::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Slots::FacilityId).uuid().not_null())
                    .col(ColumnDef::new(Slots::Date).date().not_null())
                    .col(ColumnDef::new(Slots::StartTime).time().not_null())
                    .col(ColumnDef::new(Slots::EndTime).time().not_null())
                    .col(
                        ColumnDef::new(Slots::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Slots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Slots::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_slots_facility")
                            .from(Slots::Table, Slots::FacilityId)
                            .to(Facilities::Table, Facilities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_slots_facility_date_start")
                    .table(Slots::Table)
                    .col(Slots::FacilityId)
                    .col(Slots::Date)
                    .col(Slots::StartTime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_slots_availability")
                    .table(Slots::Table)
                    .col(Slots::FacilityId)
                    .col(Slots::IsAvailable)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Slots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Slots {
    Table,
    Id,
    FacilityId,
    Date,
    StartTime,
    EndTime,
    IsAvailable,
    CreatedAt,
    UpdatedAt,
}
