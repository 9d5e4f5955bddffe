//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: auth, complaint and health endpoints from the inbound layer
//! - **Schemas**: request bodies, response views and the shared error payload
//! - **Security**: bearer token authentication scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Category, ComplaintStatus, Error, ErrorCode, Priority, Role};
use crate::inbound::http::accounts::{GoogleLoginRequest, LoginRequest, RegisterRequest};
use crate::inbound::http::complaints::{CreateComplaintRequest, UpdateStatusRequest};
use crate::inbound::http::schemas::{
    AdminComplaintView, AuthResponse, ComplaintView, OwnerView, UserView,
};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token returned by the register, login and google-login endpoints.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "HostelOps API",
        description = "Residents file maintenance complaints; staff triage and resolve them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::google_login,
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::complaints::create_complaint,
        crate::inbound::http::complaints::list_own_complaints,
        crate::inbound::http::complaints::list_all_complaints,
        crate::inbound::http::complaints::update_complaint_status,
        crate::inbound::http::complaints::confirm_complaint,
        crate::inbound::http::health::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        Category,
        Priority,
        ComplaintStatus,
        RegisterRequest,
        LoginRequest,
        GoogleLoginRequest,
        CreateComplaintRequest,
        UpdateStatusRequest,
        UserView,
        AuthResponse,
        OwnerView,
        ComplaintView,
        AdminComplaintView,
    )),
    tags(
        (name = "auth", description = "Registration and sign-in"),
        (name = "complaints", description = "Filing and triaging complaints"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
