//! Runtime settings of the Pokedex app, loaded from environment variables.

use std::path::PathBuf;

use log::warn;

use crate::auth::token::generate_token;
use crate::error::{EnvVarContext, EnvVarError};
use crate::helpers::env::{int_env_var, optional_env_var};

/// Default lifetime of a login session, in seconds (two weeks).
pub const DEFAULT_SESSION_TTL_SECS: i64 = 14 * 24 * 60 * 60;

/// Default lifetime of an API access token, in seconds.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 36_000;

/// Default directory where uploaded pictures are stored.
pub const DEFAULT_MEDIA_ROOT: &str = "./media";

/// Settings shared by all request handlers.
///
/// Registered as app data by [`configure_app`](crate::configure_app).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Key used to sign session cookies.
    pub secret_key: String,

    /// Directory where uploaded pictures are stored.
    pub media_root: PathBuf,

    /// Lifetime of a login session, in seconds.
    pub session_ttl_secs: i64,

    /// Lifetime of an API access token, in seconds.
    pub access_token_ttl_secs: i64,
}

impl Settings {
    /// Loads settings from the environment.
    ///
    /// | Environment variable    | Default                              |
    /// |-------------------------|--------------------------------------|
    /// | `SECRET_KEY`            | random key (sessions end on restart) |
    /// | `MEDIA_ROOT`            | [`DEFAULT_MEDIA_ROOT`]               |
    /// | `SESSION_TTL_SECS`      | [`DEFAULT_SESSION_TTL_SECS`]         |
    /// | `ACCESS_TOKEN_TTL_SECS` | [`DEFAULT_ACCESS_TOKEN_TTL_SECS`]    |
    pub fn from_env() -> crate::Result<Self> {
        let secret_key = match optional_env_var("SECRET_KEY")
            .with_env_var_context(|| "failed to read SECRET_KEY environment variable")?
        {
            Some(secret_key) => secret_key,
            None => {
                warn!("SECRET_KEY not set; using a random key, sessions will not survive a restart");
                generate_token()
            },
        };

        let media_root = optional_env_var("MEDIA_ROOT")
            .with_env_var_context(|| "failed to read MEDIA_ROOT environment variable")?
            .unwrap_or_else(|| DEFAULT_MEDIA_ROOT.into())
            .into();

        Ok(Self {
            secret_key,
            media_root,
            session_ttl_secs: ttl_env_var("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            access_token_ttl_secs: ttl_env_var(
                "ACCESS_TOKEN_TTL_SECS",
                DEFAULT_ACCESS_TOKEN_TTL_SECS,
            )?,
        })
    }
}

fn ttl_env_var(key: &str, default: i64) -> crate::Result<i64> {
    match int_env_var(key) {
        Ok(value) => Ok(value),
        Err(EnvVarError::NotFound) => Ok(default),
        Err(err) => {
            Err(err.with_env_var_context(|| format!("failed to parse environment variable {}", key)))
        },
    }
}

impl Default for Settings {
    /// Returns settings with a random secret key and all other values set to their defaults.
    fn default() -> Self {
        Self {
            secret_key: generate_token(),
            media_root: DEFAULT_MEDIA_ROOT.into(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
        }
    }
}
