//! Builders turning validated runtime configuration into driven adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use hostelops::config::{Federation, Persistence, RuntimeConfig};
use hostelops::domain::StatusTransitionPolicy;
use hostelops::domain::ports::{
    AccountRepository, AssertionVerifier, ComplaintRepository, DisabledAssertionVerifier,
};
use hostelops::inbound::http::state::HttpStatePorts;
use hostelops::outbound::crypto::Argon2PasswordHasher;
use hostelops::outbound::federated::GoogleIdTokenVerifier;
use hostelops::outbound::memory::{InMemoryAccountRepository, InMemoryComplaintRepository};
use hostelops::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselComplaintRepository, PoolConfig,
    run_pending_migrations,
};
use hostelops::outbound::token::JwtTokenService;

type Repositories = (Arc<dyn AccountRepository>, Arc<dyn ComplaintRepository>);

async fn build_repositories(persistence: &Persistence) -> std::io::Result<Repositories> {
    match persistence {
        Persistence::Postgres { database_url } => {
            run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(database_url.as_str()))
                .await
                .map_err(std::io::Error::other)?;
            info!("using PostgreSQL persistence");
            Ok((
                Arc::new(DieselAccountRepository::new(pool.clone())),
                Arc::new(DieselComplaintRepository::new(pool)),
            ))
        }
        Persistence::InMemory => Ok((
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemoryComplaintRepository::new()),
        )),
    }
}

fn build_verifier(federation: &Federation) -> std::io::Result<Arc<dyn AssertionVerifier>> {
    match federation {
        Federation::Google {
            client_id,
            jwks_url,
        } => {
            let verifier = GoogleIdTokenVerifier::new(client_id.as_str(), jwks_url.clone())
                .map_err(std::io::Error::other)?;
            Ok(Arc::new(verifier))
        }
        Federation::Disabled => Ok(Arc::new(DisabledAssertionVerifier)),
    }
}

/// Assemble the driven adapters selected by `config`.
///
/// # Errors
///
/// Propagates migration, pool, signing-key and HTTP client failures as
/// [`std::io::Error`] so `main` can exit with a readable message.
pub async fn build_ports(config: &RuntimeConfig) -> std::io::Result<HttpStatePorts> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (accounts, complaints) = build_repositories(&config.persistence).await?;
    let tokens =
        JwtTokenService::new(&config.token_secret, clock.clone()).map_err(std::io::Error::other)?;

    Ok(HttpStatePorts {
        accounts,
        complaints,
        hasher: Arc::new(Argon2PasswordHasher::default()),
        tokens: Arc::new(tokens),
        verifier: build_verifier(&config.federation)?,
        clock,
        registration: config.registration,
        transitions: StatusTransitionPolicy::permissive(),
    })
}
