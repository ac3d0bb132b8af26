//! Booking API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::api::dto::{
    ApiResponse, BookingResponse, CompletionResponse, CreateBookingRequest,
    CreatedBookingResponse, EmptyData,
};
use crate::api::validated_json::ValidatedJson;
use crate::application::CompletionOutcome;
use crate::auth::AuthenticatedUser;

use super::{domain_error, AppState};

/// Create a booking
///
/// Reserves the requested slots of one facility and creates a pending
/// booking. Slots already taken are silently dropped unless the service
/// is configured to require the full set; if no slot could be reserved
/// the request fails and nothing is created.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking created", body = ApiResponse<CreatedBookingResponse>),
        (status = 400, description = "No requested slot was available"),
        (status = 404, description = "Facility not found"),
        (status = 409, description = "Some slots unavailable (all-or-nothing mode)")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<
    Json<ApiResponse<CreatedBookingResponse>>,
    (StatusCode, Json<ApiResponse<CreatedBookingResponse>>),
> {
    let view = state
        .reservations
        .create_booking(
            &auth_user.principal(),
            request.facility_id,
            &request.slot_ids,
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(view.into())))
}

/// List bookings visible to the caller
///
/// Players see their own bookings; administrators see every booking
/// against facilities they own. Lapsed pending bookings are surfaced
/// as failed.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "Bookings, newest first", body = ApiResponse<Vec<BookingResponse>>)
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<
    Json<ApiResponse<Vec<BookingResponse>>>,
    (StatusCode, Json<ApiResponse<Vec<BookingResponse>>>),
> {
    let views = state
        .reservations
        .list_bookings(&auth_user.principal())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        views.into_iter().map(Into::into).collect(),
    )))
}

/// Booking detail
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking detail", body = ApiResponse<BookingResponse>),
        (status = 404, description = "Booking not found or not visible to the caller")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<BookingResponse>>)> {
    let view = state
        .reservations
        .get_booking(&auth_user.principal(), id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(view.into())))
}

/// Complete a booking
///
/// Completing is idempotent: a second call reports the booking as
/// already completed. A booking whose slots have all lapsed cannot be
/// completed and is reported as expired.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/complete",
    tag = "Bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking completed (or already was)", body = ApiResponse<CompletionResponse>),
        (status = 400, description = "Booking has expired"),
        (status = 404, description = "Booking not found or owned by someone else")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn complete_booking(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<
    Json<ApiResponse<CompletionResponse>>,
    (StatusCode, Json<ApiResponse<CompletionResponse>>),
> {
    let outcome = state
        .reservations
        .complete_booking(&auth_user.principal(), id)
        .await
        .map_err(domain_error)?;

    let response = match outcome {
        CompletionOutcome::Completed(view) => CompletionResponse {
            message: "Booking completed".to_string(),
            booking: view.into(),
        },
        CompletionOutcome::AlreadyCompleted(view) => CompletionResponse {
            message: "Booking was already completed".to_string(),
            booking: view.into(),
        },
    };

    Ok(Json(ApiResponse::success(response)))
}

/// Delete a booking (administrator only)
///
/// Slots that have not yet ended are re-opened for booking; slots in
/// the past stay closed.
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking deleted", body = ApiResponse<EmptyData>),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "Booking not found among the caller's facilities")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<EmptyData>>)> {
    state
        .reservations
        .delete_booking(&auth_user.principal(), id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(EmptyData {})))
}
