//! Login and logout pages.

use actix_web::http::header::{CONTENT_TYPE, LOCATION};
use actix_web::http::StatusCode;
use actix_web::web::{Bytes, Data, Query, ServiceConfig};
use actix_web::{get, post, route, HttpRequest, HttpResponse};
use log::{debug, info, trace};
use minijinja::context;
use serde::Deserialize;

use crate::auth::session::{create_session_token, removal_cookie, session_cookie};
use crate::helpers::multipart::parse_form_data;
use crate::pages::templates::render_page;
use crate::pages::PageResult;
use crate::services::account;
use crate::settings::Settings;

/// Message displayed when login fails.
pub const INVALID_LOGIN_MESSAGE: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Registers the login and logout pages.
///
/// Called automatically from [`pages::configure`](crate::pages::configure).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding account pages");
    config.service(login_form).service(login).service(logout);
}

/// Query parameters of the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Path to redirect to once logged in
    pub next: Option<String>,
}

/// Returns the path to redirect to after login.
///
/// Only local paths are accepted; anything else redirects to the index page.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") && !next.contains('\\') => {
            next
        },
        _ => "/",
    }
}

/// Displays the login form.
#[get("/accounts/login", name = "login")]
pub async fn login_form(query: Query<LoginQuery>) -> PageResult {
    let next = safe_next(query.next.as_deref());

    Ok(render_page(StatusCode::OK, "login.html", context! { next, username => "" })?)
}

/// Logs a user in.
///
/// On success, stores a session cookie and redirects to the `next` field of the form (or the
/// index page). Otherwise, displays the form again with an error message.
#[post("/accounts/login")]
pub async fn login(
    req: HttpRequest,
    body: Bytes,
    service: Data<account::Service>,
    settings: Data<Settings>,
) -> PageResult {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let form_data = parse_form_data(content_type, body).await?;

    let username = form_data.field("username").unwrap_or_default();
    let password = form_data.field("password").unwrap_or_default();
    let next = safe_next(form_data.field("next"));

    let user = if username.is_empty() || password.is_empty() {
        None
    } else {
        service.authenticate(username, password).await?
    };
    let Some(user) = user else {
        debug!("Failed login attempt for user {:?}", username);
        return Ok(render_page(
            StatusCode::OK,
            "login.html",
            context! { next, username, error => INVALID_LOGIN_MESSAGE },
        )?);
    };

    let token = create_session_token(&user, &settings)?;
    info!("User {} logged in", user.username);

    Ok(HttpResponse::Found()
        .insert_header((LOCATION, next))
        .cookie(session_cookie(token, &settings))
        .finish())
}

/// Logs the current user out, then redirects to the index page.
#[route("/accounts/logout", method = "GET", method = "POST", name = "logout")]
pub async fn logout() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, "/"))
        .cookie(removal_cookie())
        .finish()
}
