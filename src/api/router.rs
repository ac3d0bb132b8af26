//! API router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{auth, bookings, facilities, health, slots, AppState};
use crate::api::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use crate::application::{CatalogService, ReservationService};
use crate::auth::middleware::{auth_middleware, AuthState};
use crate::auth::JwtConfig;
use crate::domain::RepositoryProvider;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::register,
        auth::login,
        auth::get_current_user,
        // Facilities
        facilities::create_facility,
        facilities::list_facilities,
        facilities::get_facility,
        facilities::update_facility,
        facilities::delete_facility,
        // Slots
        slots::create_slot,
        slots::list_slots,
        slots::list_available_slots,
        slots::get_slot,
        slots::update_slot,
        slots::delete_slot,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::complete_booking,
        bookings::delete_booking,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            EmptyData,
            PaginationParams,
            PaginatedResponse<FacilityResponse>,
            // Auth
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Facilities
            FacilityRequest,
            FacilityResponse,
            // Slots
            SlotRequest,
            SlotResponse,
            // Bookings
            CreateBookingRequest,
            CreatedBookingResponse,
            BookingResponse,
            BookingUser,
            CompletionResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness check, no authentication required."),
        (name = "Authentication", description = "User registration and login. The JWT is returned in the `token` field and goes into the `Authorization: Bearer <token>` header."),
        (name = "Facilities", description = "Administrator-only management of sports facilities. Every operation is scoped to facilities owned by the authenticated administrator."),
        (name = "Slots", description = "Bookable time slots of a facility. A slot is a fixed date plus time range; `(facility, date, start_time)` is unique and ranges may not overlap. `/available` is open to players and only shows slots inside the booking window."),
        (name = "Bookings", description = "Slot reservations. A booking starts `pending`, becomes `completed` when its owner confirms it, or `failed` once every slot has ended while still pending. Administrators may delete bookings against their facilities, which re-opens slots that have not yet ended."),
    ),
    info(
        title = "Courtly API",
        version = "0.1.0",
        description = "REST API for sports facility booking.

## Authentication

Obtain a token via `POST /api/v1/auth/login` and pass it in the
`Authorization: Bearer <token>` header. Accounts are created through
`POST /api/v1/auth/register`; administrators manage facilities and
slots, players book them.

## Response format

Every endpoint wraps its payload:
```json
{\"success\": true, \"data\": {...}}
```

On error:
```json
{\"success\": false, \"data\": null, \"error\": \"description\"}
```",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    catalog: Arc<CatalogService>,
    reservations: Arc<ReservationService>,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let app_state = AppState {
        catalog,
        reservations,
    };

    let auth_state = auth::AuthHandlerState { repos, jwt_config };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Facility routes, slot sub-resources included (protected)
    let facility_routes = Router::new()
        .route(
            "/",
            get(facilities::list_facilities).post(facilities::create_facility),
        )
        .route(
            "/{id}",
            get(facilities::get_facility)
                .put(facilities::update_facility)
                .delete(facilities::delete_facility),
        )
        .route(
            "/{facility_id}/slots",
            get(slots::list_slots).post(slots::create_slot),
        )
        .route(
            "/{facility_id}/slots/available",
            get(slots::list_available_slots),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(app_state.clone());

    // Standalone slot routes (protected)
    let slot_routes = Router::new()
        .route(
            "/{id}",
            get(slots::get_slot)
                .put(slots::update_slot)
                .delete(slots::delete_slot),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(app_state.clone());

    // Booking routes (protected)
    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/{id}",
            get(bookings::get_booking).delete(bookings::delete_booking),
        )
        .route("/{id}/complete", post(bookings::complete_booking))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(app_state);

    let metrics_state = MetricsState {
        handle: prometheus_handle,
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .route("/metrics", get(prometheus_metrics).with_state(metrics_state))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        .nest("/api/v1/facilities", facility_routes)
        .nest("/api/v1/slots", slot_routes)
        .nest("/api/v1/bookings", booking_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
