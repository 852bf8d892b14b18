//! Error handling for the Pokedex HTML pages.
//!
//! Errors returned by page handlers are wrapped in a [`PageError`], which renders them as HTML
//! instead of the JSON used by the REST API.

use std::fmt;

use actix_web::body::BoxBody;
use actix_web::http::header::{ContentType, LOCATION};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use minijinja::context;
use serde::Serialize;

use crate::helpers::error::error_chain;
use crate::pages::templates::render_page;
use crate::service_env::ServiceEnv;
use crate::Error;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/accounts/login";

/// Error returned by page handlers.
///
/// Converted to an HTML response:
///
/// * [`LoginRequired`](Error::LoginRequired) errors redirect to the [login page](LOGIN_PATH).
/// * Errors mapping to `404 Not Found` (like a missing Pokemon) render the "not found" page.
/// * Other errors render a generic error page with the appropriate status code.
#[derive(Debug)]
pub struct PageError(Error);

impl PageError {
    /// Returns the wrapped [`Error`].
    pub fn inner(&self) -> &Error {
        &self.0
    }
}

impl From<Error> for PageError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Returns the URL of the login page, redirecting to `next` once logged in.
pub fn login_url(next: &str) -> String {
    let query = serde_urlencoded::to_string([("next", next)]).unwrap_or_default();
    format!("{}?{}", LOGIN_PATH, query)
}

#[derive(Debug, Serialize)]
struct ErrorPageContext {
    status_code: u16,
    reason: &'static str,
    causes: Option<Vec<String>>,
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            Error::LoginRequired { .. } => StatusCode::FOUND,
            error => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if let Error::LoginRequired { next } = &self.0 {
            return HttpResponse::Found()
                .insert_header((LOCATION, login_url(next)))
                .finish();
        }

        let status_code = self.status_code();
        if status_code.is_server_error() {
            error!("Error while rendering page: {}", self.0);
        }

        let rendered = if status_code == StatusCode::NOT_FOUND {
            render_page(status_code, "not_found.html", context! {})
        } else {
            let causes = ServiceEnv::current()
                .exposes_error_details()
                .then(|| error_chain(&self.0));
            render_page(
                status_code,
                "error.html",
                ErrorPageContext {
                    status_code: status_code.as_u16(),
                    reason: status_code.canonical_reason().unwrap_or("Unknown Error"),
                    causes,
                },
            )
        };

        rendered.unwrap_or_else(|err| {
            error!("Failed to render error page: {}", err);
            HttpResponse::build(status_code)
                .insert_header(ContentType::plaintext())
                .body(status_code.to_string())
        })
    }
}
