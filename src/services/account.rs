//! Service used to manage user accounts and their API access tokens.

use chrono::{Duration, Utc};
use diesel::{delete, insert_into, ExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::RunQueryDsl;
use log::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{generate_token, hash_token};
use crate::db::{Pool, PooledConnection};
use crate::error::QueryContext;
use crate::models::user::{AccessToken, NewAccessToken, NewUser, User};

/// Service implementation for [`User`] accounts and [`AccessToken`]s.
#[derive(Clone)]
pub struct Service {
    pool: Pool,
}

impl Service {
    /// Creates a new account service using the provided database connection [`Pool`].
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Creates a new user with the given credentials.
    ///
    /// Fails with a [`UniqueViolation`](diesel::result::DatabaseErrorKind::UniqueViolation) query
    /// error if the username is already taken.
    pub async fn create_user(&self, new_username: &str, password: &str) -> crate::Result<User> {
        use crate::schema::users::dsl::*;

        let password = password.to_string();
        let new_password_hash = actix_web::web::block(move || hash_password(&password)).await??;

        let mut connection = self.get_pooled_connection().await?;

        let user: User = insert_into(users)
            .values(&NewUser { username: new_username, password_hash: &new_password_hash })
            .get_result(&mut connection)
            .await
            .with_query_context(|| format!("failed to create user {}", new_username))?;

        info!("Created user {} (id {})", user.username, user.id);
        Ok(user)
    }

    /// Returns the user with the given credentials.
    ///
    /// Returns `None` if the user does not exist or if the password does not match.
    pub async fn authenticate(
        &self,
        login_username: &str,
        password: &str,
    ) -> crate::Result<Option<User>> {
        use crate::schema::users::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        let user: Option<User> = users
            .filter(username.eq(login_username))
            .first(&mut connection)
            .await
            .optional()
            .with_query_context(|| format!("failed to fetch user {}", login_username))?;

        let Some(user) = user else {
            return Ok(None);
        };

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let valid = actix_web::web::block(move || verify_password(&password, &hash)).await??;

        Ok(valid.then_some(user))
    }

    /// Issues a new access token for the given user.
    ///
    /// Returns the raw token (to be sent to the client; it is not stored anywhere) along with
    /// the stored [`AccessToken`].
    pub async fn issue_token(
        &self,
        owner_id: i64,
        granted_scope: &str,
        ttl_secs: i64,
    ) -> crate::Result<(String, AccessToken)> {
        use crate::schema::access_tokens::dsl::*;

        let raw_token = generate_token();
        let new_token_hash = hash_token(&raw_token);
        let new_token = NewAccessToken {
            token_hash: &new_token_hash,
            user_id: owner_id,
            scope: granted_scope,
            expires_at: Utc::now() + Duration::seconds(ttl_secs),
        };

        let mut connection = self.get_pooled_connection().await?;

        let access_token = insert_into(access_tokens)
            .values(&new_token)
            .get_result(&mut connection)
            .await
            .with_query_context(|| format!("failed to issue token for user {}", owner_id))?;

        Ok((raw_token, access_token))
    }

    /// Returns the stored [`AccessToken`] matching the given raw token, if any.
    ///
    /// The token is returned even if it has expired; see [`AccessToken::is_expired_at`].
    pub async fn find_token(&self, raw_token: &str) -> crate::Result<Option<AccessToken>> {
        use crate::schema::access_tokens::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        access_tokens
            .filter(token_hash.eq(hash_token(raw_token)))
            .first(&mut connection)
            .await
            .optional()
            .with_query_context(|| "failed to look up access token")
    }

    /// Revokes the given raw token. Unknown tokens are ignored.
    pub async fn revoke_token(&self, raw_token: &str) -> crate::Result<()> {
        use crate::schema::access_tokens::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        delete(access_tokens.filter(token_hash.eq(hash_token(raw_token))))
            .execute(&mut connection)
            .await
            .map(|_| ())
            .with_query_context(|| "failed to revoke access token")
    }

    async fn get_pooled_connection(&self) -> crate::Result<PooledConnection> {
        Ok(self.pool.get().await?)
    }
}
