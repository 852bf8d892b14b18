//! Types and functions used to implement the Pokedex REST API.
//!
//! The API exposes two resource collections, [`pokemons`] and [`trainers`], as well as a
//! [registration endpoint](register). Reading data requires an OAuth2 bearer token obtained
//! through the [token endpoint](oauth); modifying data does not.

pub mod doc;
pub mod errors;
pub mod oauth;
pub mod pokemons;
pub mod register;
pub mod responses;
pub mod trainers;

use std::ops::Deref;

use actix_web::web;
use actix_web::web::ServiceConfig;
use actix_web::HttpResponse;
use log::trace;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

/// [`Result`](crate::Result) definition used to return [`HttpResponse`]s from API endpoints.
///
/// If an [`Error`](crate::Error) is returned, it is converted to an appropriate [`HttpResponse`]
/// by the error handling code (see [`ErrorResponse::from`](crate::api::errors::ErrorResponse::from) for details).
pub type HttpResult = crate::Result<HttpResponse>;

/// Path parameter used for endpoints targeting a single entity.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Validate, IntoParams)]
pub struct Id {
    /// id of entity in database
    #[param(minimum = 1)]
    pub id: i64,
}

impl Deref for Id {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.id
    }
}

/// Registers the Pokedex API routes.
///
/// Must be mounted under the `/api` scope; called automatically from
/// [`configure_app`](crate::configure_app).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding API endpoints for /api");
    config
        .service(web::scope("/pokemons").configure(pokemons::configure))
        .service(web::scope("/trainers").configure(trainers::configure))
        .service(register::register);
}
