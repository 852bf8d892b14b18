//! OpenAPI documentation support.

use actix_web::web::ServiceConfig;
use log::trace;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api::errors::ErrorResponse;
use crate::api::oauth::{OAuthErrorCode, OAuthErrorResponse, TokenResponse};
use crate::api::register::{RegisteredResponse, RegistrationErrorResponse};
use crate::models::pokemon::Pokemon;
use crate::models::trainer::Trainer;

/// Registers the various OpenAPI-related endpoints, like swagger UI.
///
/// Called automatically from [`configure_app`](crate::configure_app).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding OpenAPI doc endpoints");

    let openapi = ApiDoc::openapi();
    config
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
        )
        .service(Redoc::with_url("/redoc", openapi.clone()))
        .service(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"));
}

/// API documentation in OpenAPI format.
///
/// Generated automatically by the [`utoipa`] crate. To use, simply call [`ApiDoc::openapi`]
/// to create an instance, then pass it to the various helpers that allow the API doc to be
/// published, like [`SwaggerUi`].
#[derive(OpenApi)]
#[openapi(
    paths(
        api::pokemons::list,
        api::pokemons::get,
        api::pokemons::create,
        api::pokemons::update,
        api::pokemons::patch,
        api::pokemons::delete,
        api::trainers::list,
        api::trainers::get,
        api::trainers::create,
        api::trainers::update,
        api::trainers::patch,
        api::trainers::delete,
        api::register::register,
        api::oauth::token,
        api::oauth::revoke_token,
    ),
    components(
        schemas(
            Pokemon,
            Trainer,
            RegisteredResponse,
            RegistrationErrorResponse,
            TokenResponse,
            OAuthErrorCode,
            OAuthErrorResponse,
        ),
        responses(Pokemon, Trainer, ErrorResponse),
    ),
    modifiers(&BearerSecurity),
)]
pub struct ApiDoc;

/// Adds the `bearer` security scheme referenced by the API read endpoints.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}
