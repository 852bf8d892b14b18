//! Minimal OAuth2 provider issuing the bearer tokens required to read data through the REST API.
//!
//! # Endpoints
//!
//! | HTTP method | Endpoint          | Usage                                              | See              |
//! |-------------|-------------------|----------------------------------------------------|------------------|
//! | `POST`      | `/o/token`        | Issues a token using the resource owner's password | [`token`]        |
//! | `POST`      | `/o/revoke_token` | Revokes a token                                    | [`revoke_token`] |
//!
//! Both endpoints expect `application/x-www-form-urlencoded` bodies and report errors as
//! described in [RFC 6749](https://www.rfc-editor.org/rfc/rfc6749#section-5.2).

use actix_web::http::header::{CacheControl, CacheDirective, PRAGMA};
use actix_web::web::{Bytes, Data, ServiceConfig};
use actix_web::{post, HttpResponse};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::responses::ServerErrorResponse;
use crate::api::HttpResult;
use crate::auth::token::{Scope, DEFAULT_SCOPE};
use crate::services::account;
use crate::settings::Settings;

/// Registers the OAuth2 endpoints.
///
/// Must be mounted under the `/o` scope; called automatically from
/// [`configure_app`](crate::configure_app).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding OAuth2 endpoints for /o");
    config.service(token).service(revoke_token);
}

/// Body of a token request.
///
/// Only the `password` grant type is supported. Client credentials (`client_id` and
/// `client_secret`), if sent, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenRequest {
    /// Must be `password`
    #[schema(example = "password")]
    pub grant_type: Option<String>,

    /// Username of the resource owner
    #[schema(example = "ash")]
    pub username: Option<String>,

    /// Password of the resource owner
    #[schema(example = "pikachu")]
    pub password: Option<String>,

    /// Space-separated list of requested scopes (defaults to `read write`)
    #[schema(example = "read write")]
    pub scope: Option<String>,
}

/// Body of a successful token response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// The bearer token to send in the `Authorization` header of API requests
    pub access_token: String,

    /// Always `Bearer`
    #[schema(example = "Bearer")]
    pub token_type: String,

    /// Lifetime of the token, in seconds
    #[schema(example = 36000)]
    pub expires_in: i64,

    /// Space-separated list of scopes granted to the token
    #[schema(example = "read write")]
    pub scope: String,
}

/// Error codes returned by the OAuth2 endpoints.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OAuthErrorCode {
    /// The request is missing a parameter or is malformed
    InvalidRequest,

    /// The resource owner credentials are invalid
    InvalidGrant,

    /// The grant type is not supported
    UnsupportedGrantType,

    /// The requested scope is unknown
    InvalidScope,
}

/// Body of an OAuth2 error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OAuthErrorResponse {
    /// Error code
    pub error: OAuthErrorCode,

    /// Human-readable description of the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl OAuthErrorResponse {
    fn new(error: OAuthErrorCode, description: &str) -> Self {
        Self { error, error_description: Some(description.into()) }
    }

    fn into_http_response(self) -> HttpResponse {
        HttpResponse::BadRequest()
            .insert_header(CacheControl(vec![CacheDirective::NoStore]))
            .insert_header((PRAGMA, "no-cache"))
            .json(self)
    }
}

/// Issues an access token using the resource owner password credentials grant.
///
/// Registered as `POST /o/token`.
#[utoipa::path(
    context_path = "/o",
    request_body(
        content = inline(TokenRequest),
        content_type = "application/x-www-form-urlencoded",
        description = "Token request",
    ),
    responses(
        (status = OK, description = "Token issued", body = TokenResponse),
        (status = BAD_REQUEST, description = "Invalid token request", body = OAuthErrorResponse),
        ServerErrorResponse,
    ),
)]
#[post("/token", name = "oauth_token")]
pub async fn token(
    body: Bytes,
    service: Data<account::Service>,
    settings: Data<Settings>,
) -> HttpResult {
    let request = match serde_urlencoded::from_bytes::<TokenRequest>(&body) {
        Ok(request) => request,
        Err(err) => {
            debug!("Malformed token request: {}", err);
            return Ok(OAuthErrorResponse::new(
                OAuthErrorCode::InvalidRequest,
                "Malformed token request.",
            )
            .into_http_response());
        },
    };

    let (username, password, scope) = match validate_token_request(request) {
        Ok(credentials) => credentials,
        Err(error_response) => return Ok(error_response.into_http_response()),
    };

    let Some(user) = service.authenticate(&username, &password).await? else {
        debug!("Invalid credentials in token request for user {}", username);
        return Ok(OAuthErrorResponse::new(
            OAuthErrorCode::InvalidGrant,
            "Invalid credentials given.",
        )
        .into_http_response());
    };

    let (access_token, stored_token) = service
        .issue_token(user.id, &scope, settings.access_token_ttl_secs)
        .await?;
    info!("Issued access token {} to user {}", stored_token.id, user.username);

    Ok(HttpResponse::Ok()
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .insert_header((PRAGMA, "no-cache"))
        .json(TokenResponse {
            access_token,
            token_type: "Bearer".into(),
            expires_in: settings.access_token_ttl_secs,
            scope: stored_token.scope,
        }))
}

/// Checks a token request, returning the username, password and normalized scope.
fn validate_token_request(
    request: TokenRequest,
) -> Result<(String, String, String), OAuthErrorResponse> {
    match request.grant_type.as_deref() {
        Some("password") => (),
        Some(_) => {
            return Err(OAuthErrorResponse::new(
                OAuthErrorCode::UnsupportedGrantType,
                "Only the password grant type is supported.",
            ))
        },
        None => {
            return Err(OAuthErrorResponse::new(
                OAuthErrorCode::InvalidRequest,
                "Missing grant type.",
            ))
        },
    }

    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(OAuthErrorResponse::new(
            OAuthErrorCode::InvalidRequest,
            "Missing username or password.",
        ));
    };

    let scope = request.scope.as_deref().unwrap_or(DEFAULT_SCOPE);
    let Some(scope) = Scope::parse_list(scope) else {
        return Err(OAuthErrorResponse::new(
            OAuthErrorCode::InvalidScope,
            "Requested scope is invalid or unknown.",
        ));
    };

    Ok((username, password, scope))
}

/// Body of a token revocation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RevokeTokenRequest {
    /// The token to revoke
    pub token: Option<String>,
}

/// Revokes an access token.
///
/// Registered as `POST /o/revoke_token`. Revoking an unknown token succeeds, as required by
/// [RFC 7009](https://www.rfc-editor.org/rfc/rfc7009#section-2.2).
#[utoipa::path(
    context_path = "/o",
    request_body(
        content = inline(RevokeTokenRequest),
        content_type = "application/x-www-form-urlencoded",
        description = "Token revocation request",
    ),
    responses(
        (status = OK, description = "Token revoked"),
        (status = BAD_REQUEST, description = "Invalid revocation request", body = OAuthErrorResponse),
        ServerErrorResponse,
    ),
)]
#[post("/revoke_token", name = "oauth_revoke_token")]
pub async fn revoke_token(body: Bytes, service: Data<account::Service>) -> HttpResult {
    let raw_token = serde_urlencoded::from_bytes::<RevokeTokenRequest>(&body)
        .ok()
        .and_then(|request| request.token);
    let Some(raw_token) = raw_token else {
        return Ok(OAuthErrorResponse::new(OAuthErrorCode::InvalidRequest, "Missing token.")
            .into_http_response());
    };

    service.revoke_token(&raw_token).await?;

    Ok(HttpResponse::Ok().finish())
}
