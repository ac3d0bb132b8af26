//! Slot API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::api::dto::{ApiResponse, EmptyData, SlotRequest, SlotResponse};
use crate::api::validated_json::ValidatedJson;
use crate::auth::AuthenticatedUser;

use super::{domain_error, AppState};

/// Create a slot under an owned facility
///
/// Rejected when the date is in the past, the time range is inverted, or
/// the range overlaps an existing slot of the same facility on that date.
#[utoipa::path(
    post,
    path = "/api/v1/facilities/{facility_id}/slots",
    tag = "Slots",
    params(
        ("facility_id" = Uuid, Path, description = "Facility ID")
    ),
    request_body = SlotRequest,
    responses(
        (status = 200, description = "Slot created", body = ApiResponse<SlotResponse>),
        (status = 404, description = "Facility not found or owned by someone else"),
        (status = 409, description = "Overlapping slot exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn create_slot(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(facility_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<SlotRequest>,
) -> Result<Json<ApiResponse<SlotResponse>>, (StatusCode, Json<ApiResponse<SlotResponse>>)> {
    let slot = state
        .catalog
        .create_slot(&auth_user.principal(), facility_id, request.into())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(slot.into())))
}

/// List all slots of an owned facility
#[utoipa::path(
    get,
    path = "/api/v1/facilities/{facility_id}/slots",
    tag = "Slots",
    params(
        ("facility_id" = Uuid, Path, description = "Facility ID")
    ),
    responses(
        (status = 200, description = "Slots ordered by date and start time", body = ApiResponse<Vec<SlotResponse>>),
        (status = 404, description = "Facility not found or owned by someone else")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn list_slots(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(facility_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SlotResponse>>>, (StatusCode, Json<ApiResponse<Vec<SlotResponse>>>)>
{
    let slots = state
        .catalog
        .list_slots(&auth_user.principal(), facility_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        slots.into_iter().map(Into::into).collect(),
    )))
}

/// List bookable slots of a facility
///
/// Available to any authenticated user. Returns available slots whose
/// date falls inside the configured booking window.
#[utoipa::path(
    get,
    path = "/api/v1/facilities/{facility_id}/slots/available",
    tag = "Slots",
    params(
        ("facility_id" = Uuid, Path, description = "Facility ID")
    ),
    responses(
        (status = 200, description = "Available slots in the booking window", body = ApiResponse<Vec<SlotResponse>>),
        (status = 404, description = "Facility not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn list_available_slots(
    State(state): State<AppState>,
    Path(facility_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SlotResponse>>>, (StatusCode, Json<ApiResponse<Vec<SlotResponse>>>)>
{
    let slots = state
        .catalog
        .list_available_slots(facility_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        slots.into_iter().map(Into::into).collect(),
    )))
}

/// Get one slot of an owned facility
#[utoipa::path(
    get,
    path = "/api/v1/slots/{id}",
    tag = "Slots",
    params(
        ("id" = Uuid, Path, description = "Slot ID")
    ),
    responses(
        (status = 200, description = "Slot detail", body = ApiResponse<SlotResponse>),
        (status = 404, description = "Slot not found or facility owned by someone else")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn get_slot(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SlotResponse>>, (StatusCode, Json<ApiResponse<SlotResponse>>)> {
    let slot = state
        .catalog
        .get_slot(&auth_user.principal(), id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(slot.into())))
}

/// Replace a slot's date and time range
#[utoipa::path(
    put,
    path = "/api/v1/slots/{id}",
    tag = "Slots",
    params(
        ("id" = Uuid, Path, description = "Slot ID")
    ),
    request_body = SlotRequest,
    responses(
        (status = 200, description = "Slot updated", body = ApiResponse<SlotResponse>),
        (status = 404, description = "Slot not found or facility owned by someone else"),
        (status = 409, description = "Overlapping slot exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn update_slot(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<SlotRequest>,
) -> Result<Json<ApiResponse<SlotResponse>>, (StatusCode, Json<ApiResponse<SlotResponse>>)> {
    let slot = state
        .catalog
        .update_slot(&auth_user.principal(), id, request.into())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(slot.into())))
}

/// Delete a slot
#[utoipa::path(
    delete,
    path = "/api/v1/slots/{id}",
    tag = "Slots",
    params(
        ("id" = Uuid, Path, description = "Slot ID")
    ),
    responses(
        (status = 200, description = "Slot deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Slot not found or facility owned by someone else")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn delete_slot(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<EmptyData>>)> {
    state
        .catalog
        .delete_slot(&auth_user.principal(), id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(EmptyData {})))
}
