//! Account API handlers.
//!
//! ```text
//! POST /api/auth/register {"name":"Ada","email":"ada@example.com","password":"p@ss"}
//! POST /api/auth/login {"email":"ada@example.com","password":"p@ss"}
//! POST /api/auth/google-login {"token":"<provider ID token>"}
//! GET /api/auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{AuthResponse, UserView};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_auth_input_error;

/// Registration request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `student` (default) or `admin`.
    #[serde(default)]
    pub role: Option<String>,
}

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Federated login request body for `POST /api/auth/google-login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    /// ID token issued by the identity provider.
    pub token: String,
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid input or email already registered", body = Error),
        (status = 403, description = "Admin self-registration disabled", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let registration = Registration::try_from_parts(
        &body.name,
        &body.email,
        &body.password,
        body.role.as_deref(),
    )
    .map_err(map_auth_input_error)?;
    let session = state.identity.register(registration).await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

/// Verify email and password and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&body.email, &body.password)
        .map_err(map_auth_input_error)?;
    let session = state.identity.login(&credentials).await?;
    Ok(web::Json(AuthResponse::from(session)))
}

/// Exchange a provider ID token for a local session.
#[utoipa::path(
    post,
    path = "/api/auth/google-login",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Federated authentication failed", body = Error),
        (status = 503, description = "Identity provider unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "googleLogin",
    security([])
)]
#[post("/auth/google-login")]
pub async fn google_login(
    state: web::Data<HttpState>,
    payload: web::Json<GoogleLoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let token = payload.into_inner().token;
    if token.trim().is_empty() {
        return Err(Error::invalid_request("token must not be empty")
            .with_details(json!({ "field": "token", "code": "empty_token" })));
    }
    let session = state.identity.federated_login(token.trim()).await?;
    Ok(web::Json(AuthResponse::from(session)))
}

/// The account the bearer token belongs to.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current account", body = UserView),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn current_user(Authenticated(account): Authenticated) -> web::Json<UserView> {
    web::Json(UserView::from(&account))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
