//! Slot API DTOs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::SlotInput;
use crate::domain::Slot;

/// Request body for creating or replacing a slot
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "date": "2026-09-01",
    "start_time": "10:00:00",
    "end_time": "11:00:00"
}))]
pub struct SlotRequest {
    /// Slot date (must not be in the past)
    pub date: NaiveDate,
    /// Start of the slot, must precede `end_time`
    pub start_time: NaiveTime,
    /// End of the slot
    pub end_time: NaiveTime,
}

impl From<SlotRequest> for SlotInput {
    fn from(r: SlotRequest) -> Self {
        Self {
            date: r.date,
            start_time: r.start_time,
            end_time: r.end_time,
        }
    }
}

/// Slot representation returned by the API
#[derive(Debug, Serialize, ToSchema)]
pub struct SlotResponse {
    pub id: Uuid,
    pub facility_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Slot> for SlotResponse {
    fn from(s: Slot) -> Self {
        Self {
            id: s.id,
            facility_id: s.facility_id,
            date: s.date,
            start_time: s.start_time,
            end_time: s.end_time,
            is_available: s.is_available,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
