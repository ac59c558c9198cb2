//! Bearer token settings parsed from the environment.
//!
//! The signing secret is read from a file so it can be mounted as a
//! container secret. Debug builds fall back to a random per-process secret;
//! release builds refuse to start without a real one.

use std::path::PathBuf;

use chrono::Duration;
use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::Zeroizing;

pub mod fingerprint;

const SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
const SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const DEFAULT_TTL_HOURS: i64 = 24;
const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const TTL_HOURS_ENV: &str = "TOKEN_TTL_HOURS";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const TTL_EXPECTED: &str = "a whole number of hours between 1 and 8760";
const MAX_TTL_HOURS: i64 = 24 * 365;

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate bad toggles and a missing secret, with warnings.
    Debug,
    /// Release builds require a readable secret and valid toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bloodbank::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
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

/// Validated token settings.
pub struct TokenSettings {
    /// HMAC secret used to sign and verify tokens.
    pub secret: Zeroizing<Vec<u8>>,
    /// Lifetime of issued tokens.
    pub ttl: Duration,
    /// Whether `secret` was generated for this process only.
    pub ephemeral: bool,
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not allow ephemeral secrets.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use bloodbank::inbound::http::token_config::{BuildMode, token_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let secret_path = std::env::temp_dir().join("token_secret_example");
/// std::fs::write(&secret_path, vec![b's'; 32])?;
///
/// let secret_path = secret_path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_SECRET_FILE" => Some(secret_path.clone()),
///     "TOKEN_TTL_HOURS" => Some("12".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.ttl.num_hours(), 12);
/// assert!(!settings.ephemeral);
/// # Ok(())
/// # }
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let ttl = ttl_from_env(env, mode)?;
    let (secret, ephemeral) = secret_from_env(env, mode, allow_ephemeral)?;
    Ok(TokenSettings {
        secret,
        ttl,
        ephemeral,
    })
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(TokenConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Duration, TokenConfigError> {
    let Some(value) = env.string(TTL_HOURS_ENV) else {
        return Ok(Duration::hours(DEFAULT_TTL_HOURS));
    };
    match value.trim().parse::<i64>() {
        Ok(hours) if (1..=MAX_TTL_HOURS).contains(&hours) => Ok(Duration::hours(hours)),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_TTL_HOURS; using default");
            Ok(Duration::hours(DEFAULT_TTL_HOURS))
        }
        _ => Err(TokenConfigError::InvalidEnv {
            name: TTL_HOURS_ENV,
            value,
            expected: TTL_EXPECTED,
        }),
    }
}

fn secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<(Zeroizing<Vec<u8>>, bool), TokenConfigError> {
    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| SECRET_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(bytes) => {
            let secret = Zeroizing::new(bytes);
            let length = secret.len();
            if mode == BuildMode::Release && length < SECRET_MIN_LEN {
                return Err(TokenConfigError::SecretTooShort {
                    path,
                    length,
                    min_len: SECRET_MIN_LEN,
                });
            }
            Ok((secret, false))
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token secret (dev only)"
                );
                let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
                OsRng.fill_bytes(secret.as_mut_slice());
                Ok((secret, true))
            } else {
                Err(TokenConfigError::SecretRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
