//! Registration and login handlers.

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthService, UserId};

use super::error::ApiResult;

/// Payload for creating an account.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Desired unique handle.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Cleartext password; stored only as a salted hash.
    pub password: String,
}

/// Identifier of a freshly registered account.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// Store-assigned identifier.
    pub user_id: UserId,
}

/// Payload for authenticating.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Registered handle.
    pub username: String,
    /// Cleartext password.
    pub password: String,
}

/// Identity confirmed by a successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Store-assigned identifier.
    pub user_id: UserId,
    /// Registered handle.
    pub username: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Username or email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"]
)]
#[post("/register")]
pub async fn register(
    service: web::Data<AuthService>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let user_id = service
        .register(&request.username, &request.email, &request.password)
        .await?;
    Ok(HttpResponse::Created().json(RegisterResponse { user_id }))
}

/// Authenticate a username/password pair.
///
/// No session or token is issued; see the module docs in [`crate::api`]
/// for the trust model.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Unknown user or wrong password")
    ),
    tags = ["auth"]
)]
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let authenticated = service.login(&request.username, &request.password).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        user_id: authenticated.id,
        username: authenticated.username,
    }))
}
