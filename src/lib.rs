//! Pokedex catalog library crate.
//!
//! Contains everything needed to serve the Pokedex: the database models and services, the REST
//! API, the server-rendered pages and the authentication helpers. The main binary simply
//! creates an [`App`](actix_web::App) through [`pokedex_app`] and serves it.

#![cfg_attr(backtrace_support, feature(error_generic_member_access))]

pub mod api;
pub mod auth;
pub mod db;
pub mod error;
pub mod forms;
pub mod helpers;
pub mod media;
pub mod models;
pub mod pages;
pub mod schema;
pub mod service_env;
pub mod services;
pub mod settings;

use actix_web::middleware::NormalizePath;
use actix_web::web;
use actix_web::web::{Data, PayloadConfig, ServiceConfig};
use actix_web_validator::{JsonConfig, PathConfig, QueryConfig};
pub use error::Error;
pub use error::Result;
use log::trace;

use crate::api::errors::actix_error_handler;
use crate::db::Pool;
use crate::settings::Settings;

/// Maximum size of a request body, in bytes.
///
/// Large enough to let users upload a reasonably-sized Pokemon picture through the HTML form.
pub const MAX_PAYLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Creates an [`App`](actix_web::App) serving the whole Pokedex.
///
/// Takes a database [`Pool`] and the app [`Settings`]. Implemented as a macro because the
/// concrete type of an [`App`](actix_web::App) with middlewares cannot easily be named.
///
/// # Examples
///
/// ```no_run
/// use actix_web::HttpServer;
/// use pokedex_rs::db::get_pool;
/// use pokedex_rs::pokedex_app;
/// use pokedex_rs::settings::Settings;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = get_pool()?;
/// let settings = Settings::from_env()?;
///
/// HttpServer::new(move || pokedex_app!(pool.clone(), settings.clone()))
///     .bind(("127.0.0.1", 8080))?
///     .run()
///     .await?;
/// #
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! pokedex_app {
    ($pool:expr, $settings:expr) => {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .configure($crate::configure_app($pool, $settings))
    };
}

/// Registers all the Pokedex routes and shared app data.
///
/// Called automatically from [`pokedex_app`].
pub fn configure_app(pool: Pool, settings: Settings) -> impl FnOnce(&mut ServiceConfig) {
    move |config| {
        trace!("Registering extractor configs");
        config
            .app_data(JsonConfig::default().error_handler(actix_error_handler))
            .app_data(PathConfig::default().error_handler(actix_error_handler))
            .app_data(QueryConfig::default().error_handler(actix_error_handler))
            .app_data(PayloadConfig::new(MAX_PAYLOAD_SIZE))
            .app_data(Data::new(settings));

        config.configure(services::configure(&pool));

        trace!("Adding API endpoints");
        config
            .service(
                web::scope("/api")
                    .wrap(NormalizePath::trim())
                    .configure(api::configure),
            )
            .service(web::scope("/o").configure(api::oauth::configure))
            .configure(api::doc::configure);

        config.configure(media::configure).configure(pages::configure);
    }
}
