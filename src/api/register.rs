//! User registration endpoint.

use actix_web::web::{Bytes, Data};
use actix_web::{post, HttpResponse};
use diesel::result::DatabaseErrorKind;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::HttpResult;
use crate::helpers::error::recursive_error_message;
use crate::models::user::{Registration, User};
use crate::services::account;
use crate::Error;

/// Message returned when a user is registered successfully.
pub const REGISTERED_MESSAGE: &str = "User created successfully";

/// Message returned when registration fails because of the submitted data.
///
/// The message is deliberately vague: it does not reveal whether the username is already taken.
pub const REGISTRATION_FAILED_MESSAGE: &str =
    "Registration failed: a unique username and a non-empty password are required";

/// Body of the response sent when a user is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegisteredResponse {
    /// Confirmation message
    #[schema(example = "User created successfully")]
    pub message: String,
}

/// Body of the response sent when registration fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegistrationErrorResponse {
    /// Generic error message
    pub error: String,
}

/// Registers a new user.
///
/// Registered as `POST /api/register`; does not require authentication. The body must be a JSON
/// object with `username` and `password` fields. Any failure (invalid body, duplicate username or
/// server error) is reported with a generic `400 Bad Request`.
#[utoipa::path(
    context_path = "/api",
    request_body(
        content = inline(Registration),
        description = "Credentials of the new user",
    ),
    responses(
        (status = CREATED, description = "User registered", body = RegisteredResponse),
        (status = BAD_REQUEST, description = "Registration failed", body = RegistrationErrorResponse),
    ),
)]
#[post("/register", name = "api_register")]
pub async fn register(body: Bytes, service: Data<account::Service>) -> HttpResult {
    let registration = match serde_json::from_slice::<Registration>(&body) {
        Ok(registration) => registration,
        Err(err) => {
            debug!("Rejecting malformed registration: {}", err);
            return Ok(registration_failed());
        },
    };
    if let Err(err) = registration.validate() {
        debug!("Rejecting invalid registration: {}", err);
        return Ok(registration_failed());
    }

    let result = service
        .create_user(&registration.username, &registration.password)
        .await;

    Ok(registration_response(result, &registration.username))
}

/// Turns the outcome of a user creation into the response to send.
///
/// Every failure, including server-side ones, gets the same generic `400 Bad Request`.
fn registration_response(result: crate::Result<User>, username: &str) -> HttpResponse {
    match result {
        Ok(user) => {
            info!("Registered new user {}", user.username);
            HttpResponse::Created().json(RegisteredResponse { message: REGISTERED_MESSAGE.into() })
        },
        Err(Error::Query {
            source: diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _),
            ..
        }) => {
            debug!("Rejecting registration: username {} is taken", username);
            registration_failed()
        },
        Err(err) => {
            error!("Failed to register user {}: {}", username, recursive_error_message(&err));
            registration_failed()
        },
    }
}

fn registration_failed() -> HttpResponse {
    HttpResponse::BadRequest()
        .json(RegistrationErrorResponse { error: REGISTRATION_FAILED_MESSAGE.into() })
}
