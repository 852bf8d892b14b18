//! Pokedex web server.
//!
//! Loads the settings, creates the database pool and serves the [Pokedex app](pokedex_rs) over
//! HTTP. All the actual implementation lives in the library crate.
//!
//! For more information, see `README.md`.

use actix_web::HttpServer;
use anyhow::Context;
use env_logger::Env;
use log::info;
use pokedex_rs::db::get_pool;
use pokedex_rs::error::EnvVarError;
use pokedex_rs::helpers::env::{int_env_var, load_optional_dotenv, optional_env_var};
use pokedex_rs::pokedex_app;
use pokedex_rs::service_env::ServiceEnv;
use pokedex_rs::settings::Settings;
use rustc_version_runtime::version;

/// Default address the server binds to (see [`get_server_address`]).
const DEFAULT_HTTP_ADDR: &str = "127.0.0.1";

/// Default HTTP port used for the Pokedex app (see [`get_http_port`]).
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Main program body.
///
/// Takes care of setting up the Pokedex app, then serves its pages and endpoints over HTTP.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let env_file_loaded = load_optional_dotenv()?;

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if !env_file_loaded {
        info!(".env file not found; skipped");
    }

    info!("Loading Pokedex settings");
    let settings = Settings::from_env().with_context(|| "failed to load Pokedex settings")?;
    info!("Uploaded pictures are stored in {}", settings.media_root.display());

    info!("Creating DB connection pool");
    let pool = get_pool().with_context(|| "failed to create DB connection pool")?;

    let server_address = get_server_address()?;
    let http_port = get_http_port()?;

    info!("Starting Pokedex HTTP server");
    let server = HttpServer::new(move || pokedex_app!(pool.clone(), settings.clone()))
        .bind((server_address.as_str(), http_port))
        .with_context(|| format!("failed to bind to port {}", http_port))?
        .run();

    info!(
        "Pokedex server started in {}! Listening on {}:{}.",
        ServiceEnv::current(),
        server_address,
        http_port
    );
    info!("Rust version used: {}", version());
    if ServiceEnv::current().is_development() {
        info!("Backtrace support: {}", get_backtrace_support());
    }
    Ok(server.await?)
}

/// Returns the address to bind to, read from the optional `HTTP_ADDR` environment variable.
///
/// Defaults to `127.0.0.1`, which only accepts local connections. Set it to `0.0.0.0` when
/// running in a Docker container.
fn get_server_address() -> anyhow::Result<String> {
    Ok(optional_env_var("HTTP_ADDR")
        .with_context(|| "failed to read HTTP_ADDR environment variable")?
        .unwrap_or_else(|| DEFAULT_HTTP_ADDR.into()))
}

/// Returns the HTTP port to listen on, read from the optional `HTTP_PORT` environment variable.
fn get_http_port() -> anyhow::Result<u16> {
    match int_env_var("HTTP_PORT") {
        Ok(port) => Ok(port),
        Err(EnvVarError::NotFound) => Ok(DEFAULT_HTTP_PORT),
        Err(err) => Err(err).with_context(|| "failed to parse HTTP_PORT environment variable"),
    }
}

/// Returns a string representing the status of [`Backtrace`](std::backtrace::Backtrace) support on this platform.
fn get_backtrace_support() -> &'static str {
    #[cfg(backtrace_support)]
    match std::backtrace::Backtrace::capture().status() {
        std::backtrace::BacktraceStatus::Captured => "supported",
        std::backtrace::BacktraceStatus::Disabled => "disabled",
        std::backtrace::BacktraceStatus::Unsupported => "unsupported",
        _ => "unknown (unrecognized enum value)",
    }

    #[cfg(not(backtrace_support))]
    "unsupported (not Nightly toolchain)"
}
