//! Facility API handlers
//!
//! Administrator-only CRUD; every operation is scoped to the facilities
//! the authenticated administrator owns.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::api::dto::{
    ApiResponse, EmptyData, FacilityRequest, FacilityResponse, PaginatedResponse,
    PaginationParams,
};
use crate::api::validated_json::ValidatedJson;
use crate::application::{FacilityUpdate, NewFacility};
use crate::auth::AuthenticatedUser;

use super::{domain_error, AppState};

/// Create a facility
#[utoipa::path(
    post,
    path = "/api/v1/facilities",
    tag = "Facilities",
    request_body = FacilityRequest,
    responses(
        (status = 200, description = "Facility created", body = ApiResponse<FacilityResponse>),
        (status = 403, description = "Caller is not an administrator"),
        (status = 422, description = "Validation failed")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn create_facility(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<FacilityRequest>,
) -> Result<Json<ApiResponse<FacilityResponse>>, (StatusCode, Json<ApiResponse<FacilityResponse>>)>
{
    let facility = state
        .catalog
        .create_facility(
            &auth_user.principal(),
            NewFacility {
                name: request.name,
                location: request.location,
                description: request.description,
                price: request.price,
                image_url: request.image_url,
            },
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(facility.into())))
}

/// List own facilities
///
/// Newest first, with optional `search` over name and location.
#[utoipa::path(
    get,
    path = "/api/v1/facilities",
    tag = "Facilities",
    params(PaginationParams),
    responses(
        (status = 200, description = "Facilities owned by the caller", body = ApiResponse<PaginatedResponse<FacilityResponse>>),
        (status = 403, description = "Caller is not an administrator")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn list_facilities(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(params): Query<PaginationParams>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<FacilityResponse>>>,
    (StatusCode, Json<ApiResponse<PaginatedResponse<FacilityResponse>>>),
> {
    let (facilities, total) = state
        .catalog
        .list_facilities(
            &auth_user.principal(),
            params.search.as_deref(),
            params.page,
            params.limit,
        )
        .await
        .map_err(domain_error)?;

    let items: Vec<FacilityResponse> = facilities.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items,
        total,
        params.page,
        params.limit,
    ))))
}

/// Get one owned facility
#[utoipa::path(
    get,
    path = "/api/v1/facilities/{id}",
    tag = "Facilities",
    params(
        ("id" = Uuid, Path, description = "Facility ID")
    ),
    responses(
        (status = 200, description = "Facility detail", body = ApiResponse<FacilityResponse>),
        (status = 404, description = "Facility not found or owned by someone else")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn get_facility(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FacilityResponse>>, (StatusCode, Json<ApiResponse<FacilityResponse>>)>
{
    let facility = state
        .catalog
        .get_facility(&auth_user.principal(), id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(facility.into())))
}

/// Replace an owned facility
#[utoipa::path(
    put,
    path = "/api/v1/facilities/{id}",
    tag = "Facilities",
    params(
        ("id" = Uuid, Path, description = "Facility ID")
    ),
    request_body = FacilityRequest,
    responses(
        (status = 200, description = "Facility updated", body = ApiResponse<FacilityResponse>),
        (status = 404, description = "Facility not found or owned by someone else")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn update_facility(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<FacilityRequest>,
) -> Result<Json<ApiResponse<FacilityResponse>>, (StatusCode, Json<ApiResponse<FacilityResponse>>)>
{
    let facility = state
        .catalog
        .update_facility(
            &auth_user.principal(),
            id,
            FacilityUpdate {
                name: request.name,
                location: request.location,
                description: request.description,
                price: request.price,
                image_url: request.image_url,
            },
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(facility.into())))
}

/// Delete an owned facility
///
/// Deleting a facility also removes its slots.
#[utoipa::path(
    delete,
    path = "/api/v1/facilities/{id}",
    tag = "Facilities",
    params(
        ("id" = Uuid, Path, description = "Facility ID")
    ),
    responses(
        (status = 200, description = "Facility deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Facility not found or owned by someone else")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn delete_facility(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<EmptyData>>)> {
    state
        .catalog
        .delete_facility(&auth_user.principal(), id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(EmptyData {})))
}
