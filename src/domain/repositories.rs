//! Unified repository access

use crate::domain::booking::BookingRepository;
use crate::domain::facility::FacilityRepository;
use crate::domain::slot::SlotRepository;
use crate::domain::user::UserRepository;

/// Per-aggregate repository accessors behind one provider.
///
/// Services hold an `Arc<dyn RepositoryProvider>` and never see the
/// concrete storage backend.
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn facilities(&self) -> &dyn FacilityRepository;
    fn slots(&self) -> &dyn SlotRepository;
    fn bookings(&self) -> &dyn BookingRepository;
}
