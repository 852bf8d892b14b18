//! Models used to store user accounts and their API access tokens.

use chrono::{DateTime, Utc};
use diesel_derives::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::schema::{access_tokens, users};

/// A user account, used to log into the Pokedex pages and to obtain API access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique id of this user
    pub id: i64,

    /// Unique username
    pub username: String,

    /// Argon2 hash of the user's password, in PHC string format
    pub password_hash: String,

    /// When the account was created
    pub date_joined: DateTime<Utc>,
}

/// Model used to insert a new user in the database.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    /// Unique username
    pub username: &'a str,

    /// Argon2 hash of the user's password, in PHC string format
    pub password_hash: &'a str,
}

/// Credentials submitted to register a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Registration {
    /// Username of the new user
    #[validate(length(min = 1, max = 150))]
    #[schema(example = "ash", min_length = 1, max_length = 150)]
    pub username: String,

    /// Password of the new user
    #[validate(length(min = 1))]
    #[schema(example = "pikachu", min_length = 1)]
    pub password: String,
}

/// An API access token issued to a user.
///
/// Only a hash of the actual token is stored; see [`hash_token`](crate::auth::token::hash_token).
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccessToken {
    /// Unique id of this token
    pub id: i64,

    /// SHA-256 hash of the token, hex-encoded
    pub token_hash: String,

    /// id of the user owning the token
    pub user_id: i64,

    /// Space-separated scopes granted to the token
    pub scope: String,

    /// When the token stops being valid
    pub expires_at: DateTime<Utc>,

    /// When the token was issued
    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    /// Returns an iterator over the scopes granted to this token.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.split_whitespace()
    }

    /// Returns `true` if the token was granted all of the given scopes.
    pub fn has_scopes<S>(&self, required: &[S]) -> bool
    where
        S: AsRef<str>,
    {
        required
            .iter()
            .all(|required| self.scopes().any(|scope| scope == required.as_ref()))
    }

    /// Returns `true` if the token has expired at the given time.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Model used to insert a new access token in the database.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = access_tokens)]
pub struct NewAccessToken<'a> {
    /// SHA-256 hash of the token, hex-encoded
    pub token_hash: &'a str,

    /// id of the user owning the token
    pub user_id: i64,

    /// Space-separated scopes granted to the token
    pub scope: &'a str,

    /// When the token stops being valid
    pub expires_at: DateTime<Utc>,
}
