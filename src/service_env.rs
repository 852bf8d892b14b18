//! Runtime environment of the Pokedex service (development or production).

// Unfortunately, strum's `EnumIs` generates undocumented methods
#![allow(missing_docs)]

use std::env;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use strum_macros::{AsRefStr, Display, EnumIs, EnumString};

/// Name of the environment variable selecting the [`ServiceEnv`].
pub const SERVICE_ENV_VAR: &str = "POKEDEX_ENV";

/// Environment in which the Pokedex is running.
///
/// Selected through the `POKEDEX_ENV` environment variable (see [`current`](ServiceEnv::current)).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, AsRefStr, Display, EnumIs, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ServiceEnv {
    /// Local development.
    ///
    /// Error responses (JSON or HTML) include the chain of internal errors, and session cookies
    /// can be sent over plain HTTP.
    Development,

    /// Production deployment; the default.
    ///
    /// Internal error details are never sent to clients and session cookies are only sent over
    /// HTTPS.
    #[default]
    Production,
}

impl ServiceEnv {
    /// Returns the current service runtime environment.
    ///
    /// The value of `POKEDEX_ENV` is read once (case-insensitively); if it is missing or invalid,
    /// [`Production`](ServiceEnv::Production) is used.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use log::info;
    /// use pokedex_rs::service_env::ServiceEnv;
    ///
    /// info!("Pokedex is running in {}", ServiceEnv::current());
    ///
    /// if ServiceEnv::current().exposes_error_details() {
    ///     info!("Internal errors will be included in responses");
    /// }
    /// ```
    pub fn current() -> Self {
        static CURRENT_ENV: Lazy<ServiceEnv> = Lazy::new(ServiceEnv::reload);

        if cfg!(test) {
            if let Some(test_env) = TEST_ENV.read().ok().and_then(|test_env| *test_env) {
                return test_env;
            }
        }

        *CURRENT_ENV
    }

    /// Returns the runtime environment, reading `POKEDEX_ENV` again.
    ///
    /// Regular code should rely on [`current`](ServiceEnv::current) instead.
    pub fn reload() -> Self {
        env::var(SERVICE_ENV_VAR)
            .ok()
            .and_then(|env_var| env_var.as_str().try_into().ok())
            .unwrap_or_default()
    }

    /// Returns `true` if internal error details can be included in error responses.
    pub fn exposes_error_details(&self) -> bool {
        self.is_development()
    }

    /// Returns `true` if session cookies must be restricted to HTTPS.
    pub fn requires_secure_cookies(&self) -> bool {
        self.is_production()
    }

    /// Calls a test function while simulating a given [`ServiceEnv`].
    ///
    /// During the execution of `f`, [`ServiceEnv::current`] returns `env`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use pokedex_rs::service_env::ServiceEnv;
    ///
    /// # async fn example() {
    /// ServiceEnv::test(ServiceEnv::Development, async {
    ///     assert!(ServiceEnv::current().exposes_error_details());
    /// })
    /// .await;
    /// # }
    /// ```
    #[cfg(test)]
    pub async fn test<F>(env: ServiceEnv, f: F)
    where
        F: std::future::Future<Output = ()>,
    {
        let prev_test_env = TEST_ENV.write().unwrap().replace(env);

        f.await;

        *TEST_ENV.write().unwrap() = prev_test_env;
    }
}

/// Environment simulated by [`ServiceEnv::test`].
static TEST_ENV: RwLock<Option<ServiceEnv>> = RwLock::new(None);
