//! Federated identity adapters.

mod google_id_token_verifier;

pub use google_id_token_verifier::{
    GOOGLE_ISSUERS, GOOGLE_JWKS_URL, GoogleIdTokenVerifier, JWKS_CACHE_TTL, KID_REFETCH_INTERVAL,
};
