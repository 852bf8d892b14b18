//! Types and functions to implement proper error handling in the Pokedex API.

use std::collections::BTreeMap;

use actix_web::body::BoxBody;
use actix_web::http::header::WWW_AUTHENTICATE;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use diesel::result::DatabaseErrorKind;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TryFromInto};
use utoipa::{ToResponse, ToSchema};
use validator::ValidationErrors;

use crate::helpers::error::recursive_error_message;
use crate::service_env::ServiceEnv;
use crate::Error;

/// Realm advertised in the `WWW-Authenticate` header of API authentication errors.
pub const API_REALM: &str = "api";

impl ResponseError for Error {
    /// Returns the [`StatusCode`] to use for this [`Error`].
    ///
    /// This function does the actual mapping between our internal errors and the resulting
    /// external HTTP [`StatusCode`].
    fn status_code(&self) -> StatusCode {
        let status_code = match self {
            Error::Input { source: actix_web_validator::Error::Validate(_), .. } => {
                Some(StatusCode::UNPROCESSABLE_ENTITY)
            },
            Error::Input { .. } | Error::FormData { .. } => Some(StatusCode::BAD_REQUEST),
            Error::Validation { .. } => Some(StatusCode::UNPROCESSABLE_ENTITY),
            Error::Query { source, .. } => status_code_for_query_error(source),
            Error::UnsupportedMediaType { .. } => Some(StatusCode::UNSUPPORTED_MEDIA_TYPE),
            Error::Media { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                Some(StatusCode::NOT_FOUND)
            },
            Error::Unauthenticated | Error::LoginRequired { .. } => Some(StatusCode::UNAUTHORIZED),
            Error::InsufficientScope { .. } => Some(StatusCode::FORBIDDEN),
            _ => None,
        };

        status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns an appropriate [`HttpResponse`] to return when a REST API error occurs.
    ///
    /// Uses the context of this [`Error`] to craft the response (see [`ErrorResponse::from`]).
    /// Authentication errors also include a `WWW-Authenticate` header, as required by
    /// [RFC 6750](https://www.rfc-editor.org/rfc/rfc6750#section-3).
    fn error_response(&self) -> HttpResponse<BoxBody> {
        let error_response: ErrorResponse = self.into();
        let mut response_builder = HttpResponse::build(error_response.status_code);

        match self {
            Error::Unauthenticated => {
                response_builder
                    .insert_header((WWW_AUTHENTICATE, format!("Bearer realm=\"{}\"", API_REALM)));
            },
            Error::InsufficientScope { required } => {
                response_builder.insert_header((
                    WWW_AUTHENTICATE,
                    format!(
                        "Bearer realm=\"{}\", error=\"insufficient_scope\", scope=\"{}\"",
                        API_REALM, required
                    ),
                ));
            },
            _ => (),
        }

        response_builder.json(error_response)
    }
}

/// Helper function to get a [`StatusCode`] for a [query error](diesel::result::Error).
///
/// If the error is due to faulty user input (like [`NotFound`](diesel::result::Error::NotFound)),
/// this method will return `Some` with an appropriate HTTP status code (like [`NOT_FOUND`](StatusCode::NOT_FOUND)).
/// Otherwise, it will return `None` and the caller can decide what status code to use.
pub fn status_code_for_query_error(error: &diesel::result::Error) -> Option<StatusCode> {
    match error {
        diesel::result::Error::NotFound => Some(StatusCode::NOT_FOUND),
        diesel::result::Error::DatabaseError(kind, ..) => match kind {
            DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::CheckViolation => {
                Some(StatusCode::BAD_REQUEST)
            },
            DatabaseErrorKind::ForeignKeyViolation => Some(StatusCode::UNPROCESSABLE_ENTITY),
            _ => None,
        },
        _ => None,
    }
}

#[cfg_attr(
    doc,
    doc = r"
        Struct used to return error information as JSON in [`HttpResponse`]s.

        # Notes

        The [`internal_error`](ErrorResponse::internal_error) field will only
        be populated when running in a [`Development`] environment (see [`ErrorResponse::from`]).

        [`Development`]: ServiceEnv::Development
    "
)]
#[cfg_attr(not(doc), doc = "Pokedex API error information")]
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, ToResponse)]
#[response(
    description = "Server error",
    example = json!({
        "status_code": 500,
        "error": "Internal Server Error"
    }),
)]
pub struct ErrorResponse {
    /// HTTP status code
    #[serde_as(as = "TryFromInto<u16>")]
    #[schema(
        value_type = u16,
        minimum = 100,
        maximum = 999,
    )]
    pub status_code: StatusCode,

    /// Error message
    pub error: String,

    /// More details, when appropriate (like for deserialization errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Validation error messages, for each invalid field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = json!({"name": ["This field is required."]}))]
    pub field_errors: Option<BTreeMap<String, Vec<String>>>,

    #[cfg_attr(
        doc,
        doc = r"
            Description of the internal error

            Only present when server is running in a [`Development`] environment.

            [`Development`]: ServiceEnv::Development
        "
    )]
    #[cfg_attr(
        not(doc),
        doc = "Description of the internal error (when server is running in development)"
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_error: Option<String>,
}

impl From<&Error> for ErrorResponse {
    /// Creates an [`ErrorResponse`] for an internal [`Error`].
    ///
    /// This will be used to create the body of the [`HttpResponse`] returned when an error occurs
    /// during a REST API call.
    ///
    /// # Service environment
    ///
    /// Unless we run in a [`Development`] environment, this function will not include any actual
    /// information about the cause of the internal error, to maintain security. In [`Development`],
    /// the [`internal_error`](ErrorResponse#structfield.internal_error) field will include more information.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::env;
    ///
    /// use actix_web::http::StatusCode;
    /// use actix_web::{HttpResponse, ResponseError};
    /// use pokedex_rs::api::errors::ErrorResponse;
    /// use pokedex_rs::error::EnvVarContext;
    /// use pokedex_rs::Error;
    ///
    /// let error = env::var("NONEXISTENT_POKEDEX_ENV_VAR")
    ///     .unwrap_err()
    ///     .with_env_var_context(|| "NONEXISTENT_POKEDEX_ENV_VAR should be set");
    ///
    /// let error_response: ErrorResponse = (&error).into();
    /// let http_response = HttpResponse::build(error_response.status_code).json(error_response);
    ///
    /// assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, http_response.status());
    /// ```
    ///
    /// [`Development`]: ServiceEnv::Development
    fn from(value: &Error) -> Self {
        let status_code = value.status_code();

        Self {
            status_code,
            error: status_code
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .into(),
            details: Self::generate_details(value),
            field_errors: Self::generate_field_errors(value),
            internal_error: Self::generate_internal_error(value),
        }
    }
}

impl ErrorResponse {
    /// Returns the value to use for the [`details`](ErrorResponse::details) field.
    ///
    /// This will return a value for some types of errors, like deserialization errors, so that
    /// user can have more information.
    fn generate_details(error: &Error) -> Option<String> {
        match error {
            Error::Input { source: actix_web_validator::Error::Validate(_), .. } => None,
            Error::Input { source, .. } => Some(format!("{}", source)),
            Error::FormData { source, .. } => Some(format!("{}", source)),
            Error::UnsupportedMediaType { content_type } => {
                Some(format!("unsupported content type: {:?}", content_type))
            },
            _ => None,
        }
    }

    /// Returns the value to use for the [`field_errors`](ErrorResponse::field_errors) field.
    ///
    /// Only validation errors have field errors.
    fn generate_field_errors(error: &Error) -> Option<BTreeMap<String, Vec<String>>> {
        match error {
            Error::Input { source: actix_web_validator::Error::Validate(errors), .. }
            | Error::Validation { source: errors, .. } => Some(field_error_messages(errors)),
            _ => None,
        }
    }

    /// Returns the value to use for the [`internal_error`](ErrorResponse::internal_error) field.
    ///
    /// This will return `None` except when running in [`Development`](ServiceEnv::Development)
    /// environment (see [`from`](ErrorResponse::from)).
    fn generate_internal_error(error: &Error) -> Option<String> {
        if ServiceEnv::current().exposes_error_details() {
            Some(recursive_error_message(error))
        } else {
            None
        }
    }
}

/// Returns the error messages of each invalid field, keyed by field name.
///
/// Field names are the serialized ones (`type` rather than `pokemon_type`). Errors without a
/// message are reported using their code.
pub fn field_error_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                })
                .collect();

            (field.to_string(), messages)
        })
        .collect()
}

/// Generic error handler for `actix_web`'s various configs.
///
/// This handler accepts any type of error that can be turned into our [`Error`] type, then turns
/// that into an [`actix_web::error::Error`]. This is possible because we implemented [`ResponseError`]
/// for our [`Error`] type - thus, `actix_web` will use our implementation to generate an appropriate
/// HTTP response for the type of error encountered. This makes it possible to handle pre-request handler
/// errors (like for example [`DeserializeErrors`]s) using the same error handling code as in-request
/// handler errors.
///
/// # Examples
///
/// ```no_run
/// use actix_web_validator::{JsonConfig, PathConfig};
/// use pokedex_rs::api::errors::actix_error_handler;
///
/// let json_config = JsonConfig::default().error_handler(actix_error_handler);
/// let path_config = PathConfig::default().error_handler(actix_error_handler);
/// ```
///
/// [`DeserializeErrors`]: actix_web_validator::error::DeserializeErrors
pub fn actix_error_handler<E, R>(err: E, _req: &R) -> actix_web::error::Error
where
    E: Into<Error>,
{
    Into::<Error>::into(err).into()
}
