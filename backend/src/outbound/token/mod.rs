//! Bearer token adapter.

mod jwt_token_service;

pub use jwt_token_service::{JwtTokenService, MIN_SECRET_LEN, TOKEN_LIFETIME};
