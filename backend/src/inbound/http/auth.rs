//! Bearer-token extractors used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by resolving the
//! `Authorization: Bearer <token>` header through the authorization gate here.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::AccessRequirement;
use crate::domain::{Account, Error};

use super::state::HttpState;

/// Raw token from an `Authorization: Bearer` header, if one is present.
pub(crate) fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

fn authorize(
    req: &HttpRequest,
    requirement: AccessRequirement,
) -> LocalBoxFuture<'static, Result<Account, Error>> {
    let state = req.app_data::<web::Data<HttpState>>().cloned();
    let token = bearer_token(req);
    Box::pin(async move {
        let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
        state.gate.authorize(token.as_deref(), requirement).await
    })
}

/// Any signed-in account.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Account);

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let fut = authorize(req, AccessRequirement::Authenticated);
        Box::pin(async move { fut.await.map(Self) })
    }
}

/// A signed-in account holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminAccount(pub Account);

impl FromRequest for AdminAccount {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let fut = authorize(req, AccessRequirement::Admin);
        Box::pin(async move { fut.await.map(Self) })
    }
}
