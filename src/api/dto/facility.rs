//! Facility API DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::Facility;

/// Request body for creating or replacing a facility
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Arena North",
    "location": "Jl. Merdeka 12",
    "description": "Indoor futsal court with synthetic turf",
    "price": "150000.00"
}))]
pub struct FacilityRequest {
    /// Facility name (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Address or area (1-150 characters)
    #[validate(length(min = 1, max = 150))]
    pub location: String,
    /// Free-form description
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: String,
    /// Price per slot
    pub price: Decimal,
    /// Optional image URL
    #[validate(url)]
    pub image_url: Option<String>,
}

/// Facility representation returned by the API
#[derive(Debug, Serialize, ToSchema)]
pub struct FacilityResponse {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    /// Price per slot
    pub price: Decimal,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Facility> for FacilityResponse {
    fn from(f: Facility) -> Self {
        Self {
            id: f.id,
            name: f.name,
            location: f.location,
            description: f.description,
            price: f.price,
            image_url: f.image_url,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}
