//! Reservation service
//!
//! Owns the booking lifecycle: conditional slot reservation at creation,
//! lazy expiry on every read path, idempotent completion and admin-scoped
//! deletion that re-opens only slots still in the future.

use std::sync::Arc;

use chrono::Local;
use log::{debug, info};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    Booking, BookingStatus, DomainError, DomainResult, Facility, Principal,
    RepositoryProvider, Slot, User,
};

/// How a partially-available slot set is handled at booking creation
#[derive(Debug, Clone, Copy)]
pub struct ReservationPolicy {
    /// When true, a booking is created only if every requested slot could
    /// be reserved; otherwise unavailable slots are silently dropped.
    pub require_all_slots: bool,
}

impl Default for ReservationPolicy {
    fn default() -> Self {
        Self {
            require_all_slots: false,
        }
    }
}

/// A booking joined with everything a client needs to render it
#[derive(Debug, Clone)]
pub struct BookingView {
    pub booking: Booking,
    pub facility: Facility,
    pub user: User,
    pub slots: Vec<Slot>,
    pub total_price: Decimal,
}

/// Result of a completion attempt
#[derive(Debug)]
pub enum CompletionOutcome {
    /// The booking transitioned pending -> completed
    Completed(BookingView),
    /// The booking was already completed; nothing changed
    AlreadyCompleted(BookingView),
}

/// Service for booking operations
pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    policy: ReservationPolicy,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, policy: ReservationPolicy) -> Self {
        Self { repos, policy }
    }

    // ── Creation ────────────────────────────────────────────────

    pub async fn create_booking(
        &self,
        principal: &Principal,
        facility_id: Uuid,
        slot_ids: &[Uuid],
    ) -> DomainResult<BookingView> {
        if slot_ids.is_empty() {
            return Err(DomainError::Validation(
                "at least one slot is required".to_string(),
            ));
        }

        self.repos
            .facilities()
            .find_by_id(facility_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Facility", facility_id))?;

        // duplicates would inflate the price
        let mut requested: Vec<Uuid> = Vec::with_capacity(slot_ids.len());
        for id in slot_ids {
            if !requested.contains(id) {
                requested.push(*id);
            }
        }

        // Conditional flip, restricted to this facility. Slots belonging to
        // other facilities or already taken simply do not come back.
        let reserved = self
            .repos
            .slots()
            .reserve_if_available(facility_id, &requested)
            .await?;

        if self.policy.require_all_slots && reserved.len() != requested.len() {
            self.repos.slots().release(&reserved).await?;
            return Err(DomainError::Conflict(format!(
                "only {} of {} requested slots are available",
                reserved.len(),
                requested.len()
            )));
        }

        if reserved.is_empty() {
            return Err(DomainError::InvalidReservation);
        }

        let booking = Booking::new(facility_id, principal.id);
        self.repos.bookings().save(booking.clone(), &reserved).await?;

        metrics::counter!("bookings_created_total").increment(1);
        info!(
            "Booking {} created by {} on facility {} ({} slots)",
            booking.id,
            principal.id,
            facility_id,
            reserved.len()
        );

        self.view(booking).await
    }

    // ── Reads ───────────────────────────────────────────────────

    /// Scoped lookup: players see their own bookings, administrators see
    /// bookings against facilities they own. A miss either way is not found.
    async fn find_scoped(&self, principal: &Principal, id: Uuid) -> DomainResult<Booking> {
        let found = if principal.is_admin() {
            self.repos
                .bookings()
                .find_by_id_for_facility_owner(id, principal.id)
                .await?
        } else {
            self.repos
                .bookings()
                .find_by_id_for_user(id, principal.id)
                .await?
        };
        found.ok_or_else(|| DomainError::not_found("Booking", id))
    }

    pub async fn get_booking(&self, principal: &Principal, id: Uuid) -> DomainResult<BookingView> {
        let booking = self.find_scoped(principal, id).await?;
        let (booking, slots) = self.reconcile(booking).await?;
        self.view_with_slots(booking, slots).await
    }

    pub async fn list_bookings(&self, principal: &Principal) -> DomainResult<Vec<BookingView>> {
        let bookings = if principal.is_admin() {
            self.repos
                .bookings()
                .find_for_facility_owner(principal.id)
                .await?
        } else {
            self.repos.bookings().find_for_user(principal.id).await?
        };

        let mut views = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let (booking, slots) = self.reconcile(booking).await?;
            views.push(self.view_with_slots(booking, slots).await?);
        }
        Ok(views)
    }

    // ── Completion ──────────────────────────────────────────────

    pub async fn complete_booking(
        &self,
        principal: &Principal,
        id: Uuid,
    ) -> DomainResult<CompletionOutcome> {
        let booking = self
            .repos
            .bookings()
            .find_by_id_for_user(id, principal.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        let (mut booking, slots) = self.reconcile(booking).await?;

        match booking.status {
            BookingStatus::Failed => Err(DomainError::BookingExpired(id.to_string())),
            BookingStatus::Completed => {
                let view = self.view_with_slots(booking, slots).await?;
                Ok(CompletionOutcome::AlreadyCompleted(view))
            }
            BookingStatus::Pending => {
                booking.complete();
                self.repos
                    .bookings()
                    .update_status(booking.id, booking.status)
                    .await?;

                metrics::counter!("bookings_completed_total").increment(1);
                info!("Booking {} completed by {}", booking.id, principal.id);

                let view = self.view_with_slots(booking, slots).await?;
                Ok(CompletionOutcome::Completed(view))
            }
        }
    }

    // ── Deletion ────────────────────────────────────────────────

    pub async fn delete_booking(&self, principal: &Principal, id: Uuid) -> DomainResult<()> {
        if !principal.is_admin() {
            return Err(DomainError::Forbidden(
                "administrator role required".to_string(),
            ));
        }

        let booking = self
            .repos
            .bookings()
            .find_by_id_for_facility_owner(id, principal.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        let slots = self.repos.slots().find_for_booking(booking.id).await?;
        let now = Local::now().naive_local();
        let reopen: Vec<Uuid> = slots
            .iter()
            .filter(|s| !s.has_ended(now))
            .map(|s| s.id)
            .collect();
        if !reopen.is_empty() {
            self.repos.slots().release(&reopen).await?;
        }

        self.repos.bookings().delete(booking.id).await?;

        metrics::counter!("bookings_deleted_total").increment(1);
        info!(
            "Booking {} deleted by {} ({} slots re-opened)",
            id,
            principal.id,
            reopen.len()
        );
        Ok(())
    }

    // ── Expiry ──────────────────────────────────────────────────

    /// Apply the lazy expiry rule to one booking and persist a pending ->
    /// failed flip. Returns the booking with its slots so callers do not
    /// load them twice.
    async fn reconcile(&self, mut booking: Booking) -> DomainResult<(Booking, Vec<Slot>)> {
        let slots = self.repos.slots().find_for_booking(booking.id).await?;
        let was_pending = booking.status == BookingStatus::Pending;

        if booking.evaluate_expiry(&slots, Local::now().naive_local()) && was_pending {
            self.repos
                .bookings()
                .update_status(booking.id, booking.status)
                .await?;
            metrics::counter!("bookings_expired_total").increment(1);
            debug!("Booking {} expired, marked failed", booking.id);
        }

        Ok((booking, slots))
    }

    /// Reconcile every pending booking. Used by the background sweep;
    /// returns how many bookings were flipped to failed.
    pub async fn reconcile_pending(&self) -> DomainResult<usize> {
        let pending = self.repos.bookings().find_pending().await?;
        let mut expired = 0;
        for booking in pending {
            let (booking, _) = self.reconcile(booking).await?;
            if booking.status == BookingStatus::Failed {
                expired += 1;
            }
        }
        Ok(expired)
    }

    // ── View assembly ───────────────────────────────────────────

    async fn view(&self, booking: Booking) -> DomainResult<BookingView> {
        let slots = self.repos.slots().find_for_booking(booking.id).await?;
        self.view_with_slots(booking, slots).await
    }

    async fn view_with_slots(
        &self,
        booking: Booking,
        slots: Vec<Slot>,
    ) -> DomainResult<BookingView> {
        let facility = self
            .repos
            .facilities()
            .find_by_id(booking.facility_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Facility", booking.facility_id))?;
        let user = self
            .repos
            .users()
            .find_by_id(booking.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", booking.user_id))?;

        let total_price = Booking::total_price(facility.price, slots.len());
        Ok(BookingView {
            booking,
            facility,
            user,
            slots,
            total_price,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveTime, Utc};
    use crate::domain::{Role, Slot};
    use crate::infrastructure::InMemoryRepositoryProvider;

    struct Fixture {
        repos: Arc<InMemoryRepositoryProvider>,
        svc: ReservationService,
        admin: Principal,
        player: Principal,
        facility: Facility,
    }

    async fn user(repos: &InMemoryRepositoryProvider, role: Role) -> Principal {
        let now = Utc::now();
        let u = User {
            id: Uuid::new_v4(),
            username: format!("user-{}", Uuid::new_v4()),
            fullname: "Test User".to_string(),
            password_hash: "x".to_string(),
            role,
            location: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let principal = Principal { id: u.id, role };
        repos.users().save(u).await.unwrap();
        principal
    }

    async fn fixture_with_policy(policy: ReservationPolicy) -> Fixture {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let admin = user(&repos, Role::Admin).await;
        let player = user(&repos, Role::Player).await;

        let facility = Facility::new(
            admin.id,
            "Arena North",
            "Riverside",
            "Indoor futsal court",
            Decimal::from(100_000),
            None,
        );
        repos.facilities().save(facility.clone()).await.unwrap();

        let svc = ReservationService::new(repos.clone() as Arc<dyn RepositoryProvider>, policy);
        Fixture {
            repos,
            svc,
            admin,
            player,
            facility,
        }
    }

    async fn fixture() -> Fixture {
        fixture_with_policy(ReservationPolicy::default()).await
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn future_date() -> NaiveDate {
        Local::now().date_naive() + Duration::days(1)
    }

    fn past_date() -> NaiveDate {
        Local::now().date_naive() - Duration::days(1)
    }

    async fn slot(fx: &Fixture, date: NaiveDate, start: u32) -> Slot {
        let s = Slot::new(fx.facility.id, date, t(start), t(start + 1));
        fx.repos.slots().save(s.clone()).await.unwrap();
        s
    }

    #[tokio::test]
    async fn create_booking_reserves_slots_and_prices_them() {
        let fx = fixture().await;
        let s1 = slot(&fx, future_date(), 10).await;
        let s2 = slot(&fx, future_date(), 12).await;

        let view = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[s1.id, s2.id])
            .await
            .unwrap();

        assert_eq!(view.booking.status, BookingStatus::Pending);
        assert_eq!(view.slots.len(), 2);
        assert_eq!(view.total_price, Decimal::from(200_000));

        // availability flipped immediately
        let stored = fx.repos.slots().find_by_id(s1.id).await.unwrap().unwrap();
        assert!(!stored.is_available);
    }

    #[tokio::test]
    async fn create_booking_requires_slots() {
        let fx = fixture().await;
        let err = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn best_effort_drops_unavailable_slots() {
        let fx = fixture().await;
        let s1 = slot(&fx, future_date(), 10).await;
        let mut taken = slot(&fx, future_date(), 12).await;
        taken.is_available = false;
        fx.repos.slots().update(taken.clone()).await.unwrap();

        let view = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[s1.id, taken.id])
            .await
            .unwrap();

        assert_eq!(view.slots.len(), 1);
        assert_eq!(view.slots[0].id, s1.id);
        assert_eq!(view.total_price, Decimal::from(100_000));
    }

    #[tokio::test]
    async fn all_or_nothing_rolls_back_partial_reservation() {
        let fx = fixture_with_policy(ReservationPolicy {
            require_all_slots: true,
        })
        .await;
        let s1 = slot(&fx, future_date(), 10).await;
        let mut taken = slot(&fx, future_date(), 12).await;
        taken.is_available = false;
        fx.repos.slots().update(taken.clone()).await.unwrap();

        let err = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[s1.id, taken.id])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // the slot that was briefly reserved is available again
        let stored = fx.repos.slots().find_by_id(s1.id).await.unwrap().unwrap();
        assert!(stored.is_available);
    }

    #[tokio::test]
    async fn no_available_slot_fails_without_creating_a_booking() {
        let fx = fixture().await;
        let mut taken = slot(&fx, future_date(), 10).await;
        taken.is_available = false;
        fx.repos.slots().update(taken.clone()).await.unwrap();

        let err = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[taken.id])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidReservation));
        assert!(fx.svc.list_bookings(&fx.player).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_facility_slots_are_not_reserved() {
        let fx = fixture().await;
        let other = Facility::new(
            fx.admin.id,
            "Arena South",
            "Hillside",
            "Outdoor court",
            Decimal::from(50_000),
            None,
        );
        fx.repos.facilities().save(other.clone()).await.unwrap();
        let foreign = Slot::new(other.id, future_date(), t(10), t(11));
        fx.repos.slots().save(foreign.clone()).await.unwrap();
        let own = slot(&fx, future_date(), 10).await;

        let view = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[own.id, foreign.id])
            .await
            .unwrap();

        assert_eq!(view.slots.len(), 1);
        let stored = fx
            .repos
            .slots()
            .find_by_id(foreign.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_available);
    }

    #[tokio::test]
    async fn racing_bookings_cannot_share_a_slot() {
        let fx = fixture().await;
        let s = slot(&fx, future_date(), 10).await;
        let second_player = user(&fx.repos, Role::Player).await;

        fx.svc
            .create_booking(&fx.player, fx.facility.id, &[s.id])
            .await
            .unwrap();
        let err = fx
            .svc
            .create_booking(&second_player, fx.facility.id, &[s.id])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidReservation));
    }

    #[tokio::test]
    async fn duplicate_slot_ids_are_counted_once() {
        let fx = fixture().await;
        let s = slot(&fx, future_date(), 10).await;

        let view = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[s.id, s.id])
            .await
            .unwrap();
        assert_eq!(view.slots.len(), 1);
        assert_eq!(view.total_price, Decimal::from(100_000));
    }

    #[tokio::test]
    async fn completion_is_idempotent() {
        let fx = fixture().await;
        let s = slot(&fx, future_date(), 10).await;
        let view = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[s.id])
            .await
            .unwrap();

        let first = fx
            .svc
            .complete_booking(&fx.player, view.booking.id)
            .await
            .unwrap();
        assert!(matches!(first, CompletionOutcome::Completed(_)));

        let second = fx
            .svc
            .complete_booking(&fx.player, view.booking.id)
            .await
            .unwrap();
        assert!(matches!(second, CompletionOutcome::AlreadyCompleted(_)));
    }

    #[tokio::test]
    async fn expired_booking_cannot_be_completed() {
        let fx = fixture().await;
        let s = slot(&fx, past_date(), 10).await;
        let view = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[s.id])
            .await
            .unwrap();

        let err = fx
            .svc
            .complete_booking(&fx.player, view.booking.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BookingExpired(_)));

        // the flip was persisted
        let stored = fx
            .svc
            .get_booking(&fx.player, view.booking.id)
            .await
            .unwrap();
        assert_eq!(stored.booking.status, BookingStatus::Failed);
    }

    #[tokio::test]
    async fn booking_with_a_future_slot_stays_pending() {
        let fx = fixture().await;
        let past = slot(&fx, past_date(), 10).await;
        let future = slot(&fx, future_date(), 10).await;
        let view = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[past.id, future.id])
            .await
            .unwrap();

        let stored = fx
            .svc
            .get_booking(&fx.player, view.booking.id)
            .await
            .unwrap();
        assert_eq!(stored.booking.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn delete_requires_admin_and_reopens_future_slots() {
        let fx = fixture().await;
        let past = slot(&fx, past_date(), 10).await;
        let future = slot(&fx, future_date(), 10).await;
        let view = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[past.id, future.id])
            .await
            .unwrap();

        let err = fx
            .svc
            .delete_booking(&fx.player, view.booking.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        fx.svc
            .delete_booking(&fx.admin, view.booking.id)
            .await
            .unwrap();

        let past = fx.repos.slots().find_by_id(past.id).await.unwrap().unwrap();
        let future = fx
            .repos
            .slots()
            .find_by_id(future.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!past.is_available);
        assert!(future.is_available);

        let err = fx
            .svc
            .get_booking(&fx.admin, view.booking.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_is_scoped_to_the_facility_owner() {
        let fx = fixture().await;
        let s = slot(&fx, future_date(), 10).await;
        let view = fx
            .svc
            .create_booking(&fx.player, fx.facility.id, &[s.id])
            .await
            .unwrap();

        let other_admin = user(&fx.repos, Role::Admin).await;
        let err = fx
            .svc
            .delete_booking(&other_admin, view.booking.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn listing_is_scoped_by_role() {
        let fx = fixture().await;
        let s1 = slot(&fx, future_date(), 10).await;
        let s2 = slot(&fx, future_date(), 12).await;
        let second_player = user(&fx.repos, Role::Player).await;

        fx.svc
            .create_booking(&fx.player, fx.facility.id, &[s1.id])
            .await
            .unwrap();
        fx.svc
            .create_booking(&second_player, fx.facility.id, &[s2.id])
            .await
            .unwrap();

        assert_eq!(fx.svc.list_bookings(&fx.player).await.unwrap().len(), 1);
        assert_eq!(fx.svc.list_bookings(&second_player).await.unwrap().len(), 1);
        // the facility owner sees both
        assert_eq!(fx.svc.list_bookings(&fx.admin).await.unwrap().len(), 2);

        let other_admin = user(&fx.repos, Role::Admin).await;
        assert!(fx.svc.list_bookings(&other_admin).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reconcile_pending_flips_lapsed_bookings() {
        let fx = fixture().await;
        let lapsed = slot(&fx, past_date(), 10).await;
        let live = slot(&fx, future_date(), 10).await;
        fx.svc
            .create_booking(&fx.player, fx.facility.id, &[lapsed.id])
            .await
            .unwrap();
        fx.svc
            .create_booking(&fx.player, fx.facility.id, &[live.id])
            .await
            .unwrap();

        let expired = fx.svc.reconcile_pending().await.unwrap();
        assert_eq!(expired, 1);
    }
}
