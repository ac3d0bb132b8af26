//! Create booking_slots join table (booking <-> slot, many-to-many)

use sea_orm_migration::prelude::*;

use super::m20250301_000003_create_slots::Slots;
use super::m20250301_000004_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingSlots::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BookingSlots::BookingId).uuid().not_null())
                    .col(ColumnDef::new(BookingSlots::SlotId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(BookingSlots::BookingId)
                            .col(BookingSlots::SlotId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_slots_booking")
                            .from(BookingSlots::Table, BookingSlots::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_slots_slot")
                            .from(BookingSlots::Table, BookingSlots::SlotId)
                            .to(Slots::Table, Slots::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_slots_slot")
                    .table(BookingSlots::Table)
                    .col(BookingSlots::SlotId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingSlots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BookingSlots {
    Table,
    BookingId,
    SlotId,
}
