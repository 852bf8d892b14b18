//! Login sessions for the Pokedex HTML pages.
//!
//! When a user logs in, a JWT containing their identity is signed with the app's
//! [secret key](crate::settings::Settings::secret_key) and stored in a cookie. Pages that modify
//! the Pokedex use the [`SessionUser`] extractor to require a valid session.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};
use chrono::Utc;
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::models::user::User;
use crate::pages::errors::PageError;
use crate::service_env::ServiceEnv;
use crate::settings::Settings;
use crate::Error;

/// Name of the cookie storing the session token.
pub const SESSION_COOKIE: &str = "pokedex_session";

/// Claims stored in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// id of the logged-in user
    pub sub: i64,

    /// Username of the logged-in user
    pub username: String,

    /// Expiration time (UNIX timestamp)
    pub exp: i64,

    /// Issue time (UNIX timestamp)
    pub iat: i64,
}

impl SessionClaims {
    /// Creates claims for a new session for the given user.
    pub fn new(user: &User, settings: &Settings) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: user.id,
            username: user.username.clone(),
            exp: now + settings.session_ttl_secs,
            iat: now,
        }
    }
}

/// Creates a signed session token for the given user.
pub fn create_session_token(user: &User, settings: &Settings) -> crate::Result<String> {
    let claims = SessionClaims::new(user, settings);
    let key = EncodingKey::from_secret(settings.secret_key.as_bytes());

    Ok(encode(&Header::default(), &claims, &key)?)
}

/// Verifies a session token and returns the logged-in user.
///
/// Returns `None` if the token is malformed, has an invalid signature or has expired.
pub fn verify_session_token(token: &str, settings: &Settings) -> Option<SessionUser> {
    let key = DecodingKey::from_secret(settings.secret_key.as_bytes());

    match decode::<SessionClaims>(token, &key, &Validation::default()) {
        Ok(token_data) => Some(SessionUser {
            id: token_data.claims.sub,
            username: token_data.claims.username,
        }),
        Err(err) => {
            debug!("Ignoring invalid session token: {}", err);
            None
        },
    }
}

/// Returns a cookie storing the given session token.
pub fn session_cookie(token: String, settings: &Settings) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(ServiceEnv::current().requires_secure_cookies())
        .max_age(Duration::seconds(settings.session_ttl_secs))
        .finish()
}

/// Returns a cookie that removes the session cookie from the browser.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// The user currently logged in, as found in the request's session cookie.
///
/// When used as an extractor, requests without a valid session are redirected to the login page.
/// Use `Option<SessionUser>` for pages that can be viewed anonymously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    /// id of the logged-in user
    pub id: i64,

    /// Username of the logged-in user
    pub username: String,
}

impl SessionUser {
    /// Returns the user logged in for the given request, if any.
    pub fn from_request_cookie(req: &HttpRequest) -> Option<Self> {
        let cookie = req.cookie(SESSION_COOKIE)?;
        let Some(settings) = req.app_data::<Data<Settings>>() else {
            error!("Settings are not registered; cannot validate sessions");
            return None;
        };

        verify_session_token(cookie.value(), settings)
    }
}

impl FromRequest for SessionUser {
    type Error = PageError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let next = match req.uri().path_and_query() {
            Some(path_and_query) => path_and_query.as_str().to_string(),
            None => req.path().to_string(),
        };

        ready(Self::from_request_cookie(req).ok_or(Error::LoginRequired { next }.into()))
    }
}
