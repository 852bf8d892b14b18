//! Server-rendered HTML pages of the Pokedex.
//!
//! # Pages
//!
//! | HTTP method  | Path                   | Usage                                     | Login | See                               |
//! |--------------|------------------------|-------------------------------------------|-------|-----------------------------------|
//! | `GET`        | `/`                    | Lists all pokemons and trainers           | no    | [`pokemons::index`]               |
//! | `GET`        | `/pokemon/{id}`        | Displays a pokemon                        | no    | [`pokemons::detail`]              |
//! | `GET`/`POST` | `/pokemon/add`         | Adds a pokemon                            | yes   | [`pokemons::add`]                 |
//! | `GET`/`POST` | `/pokemon/{id}/edit`   | Edits a pokemon                           | yes   | [`pokemons::edit`]                |
//! | `GET`/`POST` | `/pokemon/{id}/delete` | Deletes a pokemon                         | yes   | [`pokemons::delete`]              |
//! | `GET`        | `/trainer`             | Lists all trainers                        | no    | [`trainers::list`]                |
//! | `GET`        | `/trainer/{id}`        | Displays a trainer and their pokemons     | no    | [`trainers::detail`]              |
//! | `GET`/`POST` | `/accounts/login`      | Logs a user in                            | no    | [`accounts::login`]               |
//! | `GET`/`POST` | `/accounts/logout`     | Logs the current user out                 | no    | [`accounts::logout`]              |
//!
//! Pages requiring a login redirect anonymous users to the login page (see
//! [`SessionUser`](crate::auth::session::SessionUser)).

pub mod accounts;
pub mod errors;
pub mod pokemons;
pub mod templates;
pub mod trainers;

use actix_web::http::header::LOCATION;
use actix_web::web::ServiceConfig;
use actix_web::HttpResponse;
use log::trace;

use crate::pages::errors::PageError;

/// [`Result`](core::result::Result) used to return [`HttpResponse`]s from page handlers.
///
/// Errors are rendered as HTML pages (see [`PageError`]).
pub type PageResult = core::result::Result<HttpResponse, PageError>;

/// Registers all Pokedex pages.
///
/// Called automatically from [`configure_app`](crate::configure_app).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding Pokedex pages");
    config
        .configure(accounts::configure)
        .configure(pokemons::configure)
        .configure(trainers::configure);
}

/// Returns a `302 Found` response redirecting to the given location.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}
