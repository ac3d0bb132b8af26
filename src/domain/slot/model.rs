//! Slot domain entity

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

/// A fixed date/time-range unit of bookable capacity for a facility.
///
/// Invariant: (facility_id, date, start_time) is unique and
/// start_time < end_time.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub id: Uuid,
    pub facility_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Slot {
    pub fn new(
        facility_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            facility_id,
            date,
            start_time,
            end_time,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Wall-clock instant at which this slot ends (local time)
    pub fn end_instant(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }

    /// Whether the slot's end time has passed relative to `now`
    pub fn has_ended(&self, now: NaiveDateTime) -> bool {
        self.end_instant() <= now
    }

    /// Whether `[start, end)` on `date` intersects this slot's range
    pub fn overlaps(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        self.date == date && self.start_time < end && start < self.end_time
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, mo: u32, da: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, da).unwrap()
    }

    fn sample_slot() -> Slot {
        Slot::new(Uuid::new_v4(), d(2026, 9, 1), t(10, 0), t(11, 0))
    }

    #[test]
    fn new_slot_is_available() {
        let s = sample_slot();
        assert!(s.is_available);
    }

    #[test]
    fn end_instant_combines_date_and_end_time() {
        let s = sample_slot();
        assert_eq!(s.end_instant(), d(2026, 9, 1).and_time(t(11, 0)));
    }

    #[test]
    fn has_ended_at_and_after_end() {
        let s = sample_slot();
        assert!(!s.has_ended(d(2026, 9, 1).and_time(t(10, 59))));
        assert!(s.has_ended(d(2026, 9, 1).and_time(t(11, 0))));
        assert!(s.has_ended(d(2026, 9, 2).and_time(t(0, 0))));
    }

    #[test]
    fn overlap_detection() {
        let s = sample_slot();
        // 10:30-11:30 intersects 10:00-11:00
        assert!(s.overlaps(s.date, t(10, 30), t(11, 30)));
        // exact same range
        assert!(s.overlaps(s.date, t(10, 0), t(11, 0)));
        // contained range
        assert!(s.overlaps(s.date, t(10, 15), t(10, 45)));
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let s = sample_slot();
        assert!(!s.overlaps(s.date, t(9, 0), t(10, 0)));
        assert!(!s.overlaps(s.date, t(11, 0), t(12, 0)));
    }

    #[test]
    fn different_date_never_overlaps() {
        let s = sample_slot();
        assert!(!s.overlaps(d(2026, 9, 2), t(10, 0), t(11, 0)));
    }
}
