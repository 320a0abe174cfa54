use crate::error::{AppError, AppResult};
use crate::middleware::auth::parse_user_id;
use crate::middleware::AuthUser;
use crate::models::UserModel;
use crate::response::ApiResponse;
use crate::services::auth::{AuthService, RegisterInput};
use axum::{response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email)]
    pub email: String,
    /// Password (min 8 characters)
    #[validate(length(min = 8))]
    pub password: String,
    /// Display name
    #[validate(length(max = 100))]
    pub name: Option<String>,
    /// Phone number
    #[validate(length(max = 30))]
    pub phone_number: Option<String>,
    /// Postal address
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// User password
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// User ID
    pub id: i32,
    /// Email address
    pub email: String,
    /// Display name
    pub name: Option<String>,
    /// Phone number
    pub phone_number: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Avatar URL
    pub avatar_url: Option<String>,
    /// Whether the account is active
    pub is_active: bool,
    /// Role (CUSTOMER, EDITOR, ADMIN)
    pub role: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last login timestamp
    pub last_login_at: Option<String>,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            phone_number: user.phone_number,
            address: user.address,
            avatar_url: user.avatar_url,
            is_active: user.is_active,
            role: user.role,
            created_at: user.created_at.to_string(),
            last_login_at: user.last_login_at.map(|t| t.to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Authenticated user (password omitted)
    pub user: UserResponse,
    /// Signed session token
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 409, description = "Email already exists", body = AppError),
    ),
    tag = "auth"
)]
pub async fn register(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation error: {e}")))?;

    let service = AuthService::new(db);
    let (user, token) = service
        .register(RegisterInput {
            email: payload.email,
            password: payload.password,
            name: payload.name,
            phone_number: payload.phone_number,
            address: payload.address,
        })
        .await?;

    Ok(ApiResponse::ok(AuthResponse {
        user: UserResponse::from(user),
        token,
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Bad credentials or inactive account", body = AppError),
    ),
    tag = "auth"
)]
pub async fn login(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let service = AuthService::new(db);
    let (user, token) = service.login(&payload.email, &payload.password).await?;

    Ok(ApiResponse::ok(AuthResponse {
        user: UserResponse::from(user),
        token,
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "auth"
)]
pub async fn get_profile(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_user_id(&auth_user)?;

    let service = AuthService::new(db);
    let user = service.get_profile(user_id).await?;

    Ok(ApiResponse::ok(UserResponse::from(user)))
}
