//! Application configuration loaded via OrthoConfig.
//!
//! [`AppSettings`] is the raw layered input (CLI flags, `HOSTELOPS_*`
//! environment variables, config file). [`RuntimeConfig::from_settings`]
//! validates it once at startup; the result is passed into the server
//! explicitly.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::warn;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::RegistrationPolicy;
use crate::outbound::federated::GOOGLE_JWKS_URL;
use crate::outbound::token::MIN_SECRET_LEN;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const FINGERPRINT_BYTES: usize = 8;

/// Layered settings. Unset values fall back to the defaults documented on
/// each accessor.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOSTELOPS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// HS256 signing secret for bearer tokens.
    pub token_secret: Option<String>,
    /// File holding the signing secret; takes precedence over `token_secret`.
    pub token_secret_file: Option<PathBuf>,
    /// OAuth client id expected as the ID-token audience.
    pub google_client_id: Option<String>,
    /// Override for the provider's signing-key endpoint.
    pub google_jwks_url: Option<String>,
    /// Whether self-registration may request the admin role.
    #[ortho_config(default = true)]
    pub admin_registration: bool,
}

impl AppSettings {
    /// Listen address, `0.0.0.0:5000` when unset.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Signing-key endpoint, Google's published certs when unset.
    pub fn google_jwks_url(&self) -> &str {
        self.google_jwks_url.as_deref().unwrap_or(GOOGLE_JWKS_URL)
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("token_secret", &self.token_secret.as_ref().map(|_| "<redacted>"))
            .field("token_secret_file", &self.token_secret_file)
            .field("google_client_id", &self.google_client_id)
            .field("google_jwks_url", &self.google_jwks_url)
            .field("admin_registration", &self.admin_registration)
            .finish()
    }
}

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to in-memory storage and disabled federation.
    Debug,
    /// Release builds require every backing service to be configured.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid bind address '{value}'")]
    InvalidBindAddr { value: String },
    #[error("no token signing secret configured; set HOSTELOPS_TOKEN_SECRET or HOSTELOPS_TOKEN_SECRET_FILE")]
    MissingTokenSecret,
    #[error("failed to read token secret at {path}: {source}")]
    TokenSecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token secret too short: need >= {min_len} bytes, got {length}")]
    TokenSecretTooShort { length: usize, min_len: usize },
    #[error("HOSTELOPS_DATABASE_URL is required in release builds")]
    MissingDatabaseUrl,
    #[error("HOSTELOPS_GOOGLE_CLIENT_ID is required in release builds")]
    MissingGoogleClientId,
    #[error("invalid JWKS URL '{value}'")]
    InvalidJwksUrl { value: String },
}

/// Where accounts and complaints are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Postgres { database_url: String },
    InMemory,
}

/// How federated sign-in is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Federation {
    Google { client_id: String, jwks_url: Url },
    Disabled,
}

/// Validated startup configuration.
pub struct RuntimeConfig {
    pub bind_addr: SocketAddr,
    pub persistence: Persistence,
    pub token_secret: Zeroizing<Vec<u8>>,
    pub federation: Federation,
    pub registration: RegistrationPolicy,
}

impl RuntimeConfig {
    /// Validate `settings` for `mode`.
    ///
    /// # Errors
    ///
    /// A missing or short signing secret fails in every mode. Release builds
    /// also fail without a database URL or a provider client id.
    pub fn from_settings(settings: &AppSettings, mode: BuildMode) -> Result<Self, ConfigError> {
        let bind_addr = settings
            .bind_addr()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr {
                value: settings.bind_addr().to_owned(),
            })?;
        let token_secret = token_secret(settings)?;
        let persistence = persistence(settings, mode)?;
        let federation = federation(settings, mode)?;

        Ok(Self {
            bind_addr,
            persistence,
            token_secret,
            federation,
            registration: RegistrationPolicy::from_admin_toggle(settings.admin_registration),
        })
    }

    /// Truncated SHA-256 of the signing secret, safe to log.
    pub fn token_fingerprint(&self) -> String {
        secret_fingerprint(&self.token_secret)
    }
}

fn token_secret(settings: &AppSettings) -> Result<Zeroizing<Vec<u8>>, ConfigError> {
    let secret = match (&settings.token_secret_file, &settings.token_secret) {
        (Some(path), _) => {
            let mut bytes =
                std::fs::read(path).map_err(|source| ConfigError::TokenSecretRead {
                    path: path.clone(),
                    source,
                })?;
            while bytes.last().is_some_and(u8::is_ascii_whitespace) {
                bytes.pop();
            }
            Zeroizing::new(bytes)
        }
        (None, Some(raw)) => Zeroizing::new(raw.as_bytes().to_vec()),
        (None, None) => return Err(ConfigError::MissingTokenSecret),
    };
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::TokenSecretTooShort {
            length: secret.len(),
            min_len: MIN_SECRET_LEN,
        });
    }
    Ok(secret)
}

fn persistence(settings: &AppSettings, mode: BuildMode) -> Result<Persistence, ConfigError> {
    match settings.database_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => Ok(Persistence::Postgres {
            database_url: url.to_owned(),
        }),
        _ if mode.is_debug() => {
            warn!("HOSTELOPS_DATABASE_URL not set; using in-memory storage");
            Ok(Persistence::InMemory)
        }
        _ => Err(ConfigError::MissingDatabaseUrl),
    }
}

fn federation(settings: &AppSettings, mode: BuildMode) -> Result<Federation, ConfigError> {
    match settings.google_client_id.as_deref().map(str::trim) {
        Some(client_id) if !client_id.is_empty() => {
            let raw = settings.google_jwks_url();
            let jwks_url = Url::parse(raw).map_err(|_| ConfigError::InvalidJwksUrl {
                value: raw.to_owned(),
            })?;
            Ok(Federation::Google {
                client_id: client_id.to_owned(),
                jwks_url,
            })
        }
        _ if mode.is_debug() => {
            warn!("HOSTELOPS_GOOGLE_CLIENT_ID not set; federated login disabled");
            Ok(Federation::Disabled)
        }
        _ => Err(ConfigError::MissingGoogleClientId),
    }
}

/// First 8 bytes of the SHA-256 of `secret`, hex encoded.
#[must_use]
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
