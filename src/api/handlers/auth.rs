//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::validated_json::ValidatedJson;
use crate::auth::{create_token, hash_password, verify_password, AuthenticatedUser, JwtConfig};
use crate::domain::{Role, User};
use crate::domain::RepositoryProvider;

use super::domain_error;

/// State for authentication handlers
#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "budi",
    "password": "rahasia-123",
    "fullname": "Budi Santoso",
    "role": "player"
}))]
pub struct RegisterRequest {
    /// Unique username (3-50 characters)
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    /// Password (at least 6 characters)
    #[validate(length(min = 6))]
    pub password: String,
    /// Display name
    #[validate(length(min = 1, max = 100))]
    pub fullname: String,
    /// `admin` or `player`; anything else falls back to `player`
    pub role: Option<String>,
    /// Optional home location
    pub location: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "budi",
    "password": "rahasia-123"
}))]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// User information returned by auth endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub fullname: String,
    /// `admin` or `player`
    pub role: String,
    pub location: Option<String>,
}

impl From<User> for UserInfo {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            fullname: u.fullname,
            role: u.role.to_string(),
            location: u.location,
        }
    }
}

/// Successful login response
///
/// The token goes into the `Authorization: Bearer <token>` header
/// of subsequent requests.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    pub token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Register a new user
///
/// The role is chosen at registration; administrators manage facilities,
/// players book them.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = ApiResponse<UserInfo>),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, Json<ApiResponse<UserInfo>>)> {
    let existing = state
        .repos
        .users()
        .find_by_username(&request.username)
        .await
        .map_err(domain_error)?;
    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(format!(
                "Username '{}' is already taken",
                request.username
            ))),
        ));
    }

    let password_hash = hash_password(&request.password).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        username: request.username,
        fullname: request.fullname,
        password_hash,
        role: request
            .role
            .as_deref()
            .map(Role::from_str)
            .unwrap_or(Role::Player),
        location: request.location,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    state
        .repos
        .users()
        .save(user.clone())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(user.into())))
}

/// Log in with username and password
///
/// Returns a JWT token on success. Disabled accounts get 401.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials or disabled account")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<LoginResponse>>)> {
    let invalid = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        )
    };

    let user = state
        .repos
        .users()
        .find_by_username(&request.username)
        .await
        .map_err(domain_error)?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Account is disabled")),
        ));
    }

    let ok = verify_password(&request.password, &user.password_hash).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;
    if !ok {
        return Err(invalid());
    }

    let token = create_token(
        &user.id.to_string(),
        &user.username,
        user.role.as_str(),
        &state.jwt_config,
    )
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: user.into(),
    })))
}

/// Current user profile
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserInfo>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearer_auth" = [])
    ),
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, Json<ApiResponse<UserInfo>>)> {
    let user = state
        .repos
        .users()
        .find_by_id(auth_user.user_id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("User not found")),
            )
        })?;

    Ok(Json(ApiResponse::success(user.into())))
}
