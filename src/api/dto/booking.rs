//! Booking API DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::BookingView;

use super::facility::FacilityResponse;
use super::slot::SlotResponse;

/// Request body for creating a booking
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "facility_id": "7b6f3c58-0db9-4dbf-8d8a-2f32cbb4a9e1",
    "slot_ids": ["0d0cbb6a-92a2-4f07-bb2e-6a9d3c2f1e55"]
}))]
pub struct CreateBookingRequest {
    /// Facility the slots belong to
    pub facility_id: Uuid,
    /// Slots to reserve, at least one
    #[validate(length(min = 1))]
    pub slot_ids: Vec<Uuid>,
}

/// Short user representation embedded in booking responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingUser {
    pub id: Uuid,
    pub username: String,
    pub fullname: String,
}

/// Full booking representation returned by the API
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    /// `pending`, `completed` or `failed`
    pub status: String,
    pub facility: FacilityResponse,
    pub user: BookingUser,
    pub slots: Vec<SlotResponse>,
    /// Facility price times number of slots
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingView> for BookingResponse {
    fn from(view: BookingView) -> Self {
        Self {
            id: view.booking.id,
            status: view.booking.status.to_string(),
            facility: view.facility.into(),
            user: BookingUser {
                id: view.user.id,
                username: view.user.username,
                fullname: view.user.fullname,
            },
            slots: view.slots.into_iter().map(Into::into).collect(),
            total_price: view.total_price,
            created_at: view.booking.created_at,
            updated_at: view.booking.updated_at,
        }
    }
}

/// Response for a freshly created booking
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedBookingResponse {
    pub id: Uuid,
    pub status: String,
    /// Where to fetch the booking detail
    pub detail_url: String,
    pub total_price: Decimal,
    pub slots: Vec<SlotResponse>,
}

impl From<BookingView> for CreatedBookingResponse {
    fn from(view: BookingView) -> Self {
        Self {
            id: view.booking.id,
            status: view.booking.status.to_string(),
            detail_url: format!("/api/v1/bookings/{}", view.booking.id),
            total_price: view.total_price,
            slots: view.slots.into_iter().map(Into::into).collect(),
        }
    }
}

/// Completion response with an informational message
#[derive(Debug, Serialize, ToSchema)]
pub struct CompletionResponse {
    pub message: String,
    pub booking: BookingResponse,
}
