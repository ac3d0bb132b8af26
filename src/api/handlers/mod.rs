//! API handlers

pub mod auth;
pub mod bookings;
pub mod facilities;
pub mod health;
pub mod slots;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::application::{CatalogService, ReservationService};
use crate::domain::DomainError;

/// Application state for facility, slot and booking handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub reservations: Arc<ReservationService>,
}

/// Map a domain error onto an HTTP status plus envelope
pub(crate) fn domain_error<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Validation(_)
        | DomainError::InvalidReservation
        | DomainError::BookingExpired(_) => StatusCode::BAD_REQUEST,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses() {
        let (status, _) = domain_error::<()>(DomainError::not_found("Facility", "x"));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = domain_error::<()>(DomainError::InvalidReservation);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = domain_error::<()>(DomainError::Conflict("dup".into()));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = domain_error::<()>(DomainError::Storage("db".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
