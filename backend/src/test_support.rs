//! Shared test doubles for unit tests (in `src/`) and integration tests (in
//! `tests/`).

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{AssertionVerifier, DisabledAssertionVerifier, TokenError};
use crate::domain::{RegistrationPolicy, StatusTransitionPolicy};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::crypto::Argon2PasswordHasher;
use crate::outbound::memory::{InMemoryAccountRepository, InMemoryComplaintRepository};
use crate::outbound::token::JwtTokenService;

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock starting at 2026-03-01T08:00:00Z.
    pub fn fixed() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 8, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::new(start)
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Argon2 hasher with minimal cost parameters so tests stay fast.
pub fn fast_password_hasher() -> Argon2PasswordHasher {
    Argon2PasswordHasher::with_cost(8, 1, 1).unwrap_or_default()
}

/// 32-byte signing secret for token tests.
pub const TEST_TOKEN_SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

/// Ports backed by in-memory stores, fast hashing and `clock`.
///
/// Federated login is disabled unless a verifier is swapped in.
pub fn in_memory_ports(clock: Arc<MutableClock>) -> Result<HttpStatePorts, TokenError> {
    let clock: Arc<dyn Clock> = clock;
    let tokens = JwtTokenService::new(TEST_TOKEN_SECRET, clock.clone())?;
    Ok(HttpStatePorts {
        accounts: Arc::new(InMemoryAccountRepository::new()),
        complaints: Arc::new(InMemoryComplaintRepository::new()),
        hasher: Arc::new(fast_password_hasher()),
        tokens: Arc::new(tokens),
        verifier: Arc::new(DisabledAssertionVerifier),
        clock,
        registration: RegistrationPolicy::OpenRoles,
        transitions: StatusTransitionPolicy::permissive(),
    })
}

/// [`HttpState`] over [`in_memory_ports`] with the given assertion verifier.
pub fn in_memory_state(
    clock: Arc<MutableClock>,
    verifier: Arc<dyn AssertionVerifier>,
) -> Result<HttpState, TokenError> {
    Ok(HttpState::from(HttpStatePorts {
        verifier,
        ..in_memory_ports(clock)?
    }))
}
