//! Facility domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A bookable sports venue, owned by one administrator
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub id: Uuid,
    /// Owning administrator (user id)
    pub owner_id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    /// Price per slot
    pub price: Decimal,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Facility {
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            location: location.into(),
            description: description.into(),
            price,
            image_url,
            created_at: now,
            updated_at: now,
        }
    }
}
