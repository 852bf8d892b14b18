//! OAuth2 bearer tokens used to access the Pokedex REST API.
//!
//! Tokens are opaque random strings issued by the [token endpoint](crate::api::oauth). Only their
//! SHA-256 hash is stored in the database, so a leaked database does not leak usable tokens.

use std::collections::BTreeSet;

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};
use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use futures::future::LocalBoxFuture;
use log::error;
use sha2::{Digest, Sha256};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::models::user::AccessToken;
use crate::services::account;
use crate::Error;

/// Number of random bytes in a generated token.
pub const TOKEN_BYTES: usize = 32;

/// Scopes granted to a token when none are requested explicitly.
pub const DEFAULT_SCOPE: &str = "read write";

/// Scopes a token must be granted to read data through the REST API.
pub const API_READ_SCOPES: [Scope; 2] = [Scope::Read, Scope::Write];

/// OAuth2 scope that can be granted to an access token.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Scope {
    /// Allows reading Pokedex data
    Read,

    /// Allows modifying Pokedex data
    Write,
}

impl Scope {
    /// Parses a space-separated list of scopes, as sent in a token request.
    ///
    /// The result is normalized: duplicates are removed and scopes are sorted. Returns `None` if
    /// the list is empty or contains an unknown scope.
    pub fn parse_list(scopes: &str) -> Option<String> {
        let scopes = scopes
            .split_whitespace()
            .map(str::parse::<Scope>)
            .collect::<Result<BTreeSet<_>, _>>()
            .ok()?;

        if scopes.is_empty() {
            return None;
        }

        Some(
            scopes
                .iter()
                .map(Scope::as_ref)
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

/// Generates a new random token.
///
/// The token is made of [`TOKEN_BYTES`] random bytes, base64-encoded so that it can be used in
/// HTTP headers and URLs as-is.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);

    URL_SAFE_NO_PAD.encode(bytes)
}

/// Returns the hash of a token, as stored in the database.
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Returns the bearer token found in a request's `Authorization` header, if any.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

/// Extractor requiring a valid bearer token granted the [`API_READ_SCOPES`].
///
/// Rejects the request with:
///
/// * [`Unauthenticated`](Error::Unauthenticated) if no token is provided, or if the token is
///   unknown or expired.
/// * [`InsufficientScope`](Error::InsufficientScope) if the token is valid but lacks a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadWriteToken(pub AccessToken);

impl FromRequest for ReadWriteToken {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw_token = bearer_token(req);
        let service = req.app_data::<Data<account::Service>>().cloned();

        Box::pin(async move {
            let Some(service) = service else {
                error!("Account service is not registered; cannot validate bearer tokens");
                return Err(actix_web::error::ErrorInternalServerError("server misconfigured"));
            };
            let raw_token = raw_token.ok_or(Error::Unauthenticated)?;

            let token = service
                .find_token(&raw_token)
                .await?
                .filter(|token| !token.is_expired_at(Utc::now()))
                .ok_or(Error::Unauthenticated)?;

            if !token.has_scopes(&API_READ_SCOPES) {
                return Err(Error::InsufficientScope {
                    required: API_READ_SCOPES
                        .iter()
                        .map(Scope::as_ref)
                        .collect::<Vec<_>>()
                        .join(" "),
                }
                .into());
            }

            Ok(Self(token))
        })
    }
}
