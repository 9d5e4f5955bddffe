//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod accounts;
pub mod auth;
pub mod complaints;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api` handler. Mount inside `web::scope("/api")`.
///
/// Body, query and path extraction failures answer with the `invalid_request`
/// envelope rather than actix's plain-text 400.
///
/// `/complaints/my` is registered before `/complaints/{id}` routes so the
/// literal segment wins.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    validation::configure_extractors(cfg);
    cfg.service(accounts::register)
        .service(accounts::login)
        .service(accounts::google_login)
        .service(accounts::current_user)
        .service(complaints::create_complaint)
        .service(complaints::list_own_complaints)
        .service(complaints::list_all_complaints)
        .service(complaints::update_complaint_status)
        .service(complaints::confirm_complaint);
}
