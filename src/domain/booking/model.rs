//! Booking domain entity

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::slot::Slot;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Created, awaiting confirmation by the owner
    Pending,
    /// Confirmed by the owner
    Completed,
    /// All slots lapsed while still pending
    Failed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reservation of one or more slots of a single facility by one user.
///
/// The slot set lives in the `booking_slots` join table and is loaded
/// separately; this struct carries only the booking row itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub facility_id: Uuid,
    pub user_id: Uuid,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(facility_id: Uuid, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            facility_id,
            user_id,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total price: facility price times number of attached slots
    pub fn total_price(facility_price: Decimal, slot_count: usize) -> Decimal {
        facility_price * Decimal::from(slot_count as u64)
    }

    /// Confirm the booking. Only valid while pending.
    pub fn complete(&mut self) {
        self.status = BookingStatus::Completed;
        self.updated_at = Utc::now();
    }

    /// Lazy expiry rule: the booking is expired only once *every* attached
    /// slot's end instant has passed. A pending booking that is found
    /// expired flips to failed; completed and failed bookings are left
    /// untouched. Returns whether the booking is now considered expired.
    pub fn evaluate_expiry(&mut self, slots: &[Slot], now: NaiveDateTime) -> bool {
        if slots.iter().any(|s| !s.has_ended(now)) {
            return false;
        }
        if self.status == BookingStatus::Pending {
            self.status = BookingStatus::Failed;
            self.updated_at = Utc::now();
        }
        true
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn slot_ending(date: NaiveDate, end_h: u32) -> Slot {
        Slot::new(
            Uuid::new_v4(),
            date,
            NaiveTime::from_hms_opt(end_h - 1, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(end_h, 0, 0).unwrap(),
        )
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    #[test]
    fn new_booking_is_pending() {
        let b = Booking::new(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(b.status, BookingStatus::Pending);
    }

    #[test]
    fn total_price_scales_with_slot_count() {
        let price = Decimal::from(100_000);
        assert_eq!(Booking::total_price(price, 2), Decimal::from(200_000));
        assert_eq!(Booking::total_price(price, 0), Decimal::ZERO);
    }

    #[test]
    fn not_expired_while_any_slot_is_in_the_future() {
        let mut b = Booking::new(Uuid::new_v4(), Uuid::new_v4());
        let slots = vec![slot_ending(day(1), 11), slot_ending(day(3), 11)];
        let now = day(2).and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());

        assert!(!b.evaluate_expiry(&slots, now));
        assert_eq!(b.status, BookingStatus::Pending);
    }

    #[test]
    fn pending_booking_fails_once_all_slots_lapse() {
        let mut b = Booking::new(Uuid::new_v4(), Uuid::new_v4());
        let slots = vec![slot_ending(day(1), 11), slot_ending(day(2), 11)];
        let now = day(2).and_time(NaiveTime::from_hms_opt(11, 0, 0).unwrap());

        assert!(b.evaluate_expiry(&slots, now));
        assert_eq!(b.status, BookingStatus::Failed);

        // monotonic: re-evaluating never reverts the status
        assert!(b.evaluate_expiry(&slots, now));
        assert_eq!(b.status, BookingStatus::Failed);
    }

    #[test]
    fn completed_booking_reports_expired_without_mutation() {
        let mut b = Booking::new(Uuid::new_v4(), Uuid::new_v4());
        b.complete();
        let slots = vec![slot_ending(day(1), 11)];
        let now = day(5).and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap());

        assert!(b.evaluate_expiry(&slots, now));
        assert_eq!(b.status, BookingStatus::Completed);
    }

    #[test]
    fn status_roundtrip() {
        for status in &[
            BookingStatus::Pending,
            BookingStatus::Completed,
            BookingStatus::Failed,
        ] {
            assert_eq!(&BookingStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_pending() {
        assert_eq!(BookingStatus::from_str("paid"), BookingStatus::Pending);
    }
}
