//! [`Error`] type definition for our app.

use std::borrow::Cow;
use std::env;
use std::ffi::OsString;
use std::num::ParseIntError;

use diesel_async::pooled_connection::deadpool::PoolError;
use validator::{ValidationError, ValidationErrors};

use crate::forward_from;
use crate::helpers::multipart::FormDataError;

/// [`Result`](core::result::Result) type for our crate.
///
/// Uses our crate's [`Error`] type automatically.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type used throughout this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error that occurred when loading data from an environment variable.
    #[error("error related to environment variable: {context}")]
    EnvVar {
        /// Environment variable error context.
        ///
        /// Used by the code (via [`EnvVarContext::with_env_var_context`]) to provide context for the error.
        context: String,

        /// Source of the environment error.
        source: EnvVarError,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Error caused by invalid user input in an API request (path, query or JSON body).
    ///
    /// If the input could be parsed but failed validation, the response will include per-field
    /// error messages (see [`ErrorResponse`](crate::api::errors::ErrorResponse)).
    #[error("input parsing error")]
    Input {
        /// Source of the input error.
        #[from]
        source: actix_web_validator::error::Error,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Validation error detected by our own code, after the input has been parsed.
    ///
    /// Used for example when a Pokemon refers to a trainer that does not exist.
    #[error("validation error")]
    Validation {
        /// Per-field validation errors.
        #[from]
        source: ValidationErrors,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Error related to the database connection pool.
    ///
    /// See [`PoolError`](deadpool::managed::PoolError) (and the inner [`diesel_async::pooled_connection::PoolError`])
    /// for more information.
    #[error("database connection error")]
    Pool {
        /// Source of the pool error.
        #[from]
        source: PoolError,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Error that occurred while performing a database query using [`diesel`].
    #[error("query error: {context}")]
    Query {
        /// Query error context.
        ///
        /// Used by the code (via [`QueryContext::with_query_context`]) to provide some context
        /// as to the type of query that caused the error.
        context: String,

        /// Source of the query error.
        source: diesel::result::Error,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Error while loading or rendering an HTML template.
    #[error("template error")]
    Template {
        /// Source of the template error.
        #[from]
        source: minijinja::Error,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Error while parsing a submitted HTML form (urlencoded or multipart).
    #[error("form data error")]
    FormData {
        /// Source of the form parsing error.
        #[from]
        source: FormDataError,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Request body was sent with a content type we do not know how to handle.
    #[error("unsupported content type: {content_type}")]
    UnsupportedMediaType {
        /// The content type of the request.
        content_type: String,
    },

    /// Error while reading or writing a media file (like a Pokemon picture).
    #[error("media storage error: {context}")]
    Media {
        /// Media error context.
        ///
        /// Used by the code (via [`MediaContext::with_media_context`]) to describe the file
        /// operation that failed.
        context: String,

        /// Source of the I/O error.
        source: std::io::Error,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Error while hashing or verifying a password.
    #[error("password hashing error")]
    Password {
        /// Source of the hashing error.
        #[from]
        source: argon2::password_hash::Error,
    },

    /// A blocking task (like password hashing) could not be completed.
    #[error("blocking task was cancelled")]
    Blocking {
        /// Source of the blocking error.
        #[from]
        source: actix_web::error::BlockingError,
    },

    /// Error while creating a session token.
    #[error("session token error")]
    Session {
        /// Source of the session token error.
        #[from]
        source: jsonwebtoken::errors::Error,
    },

    /// Request requires a valid bearer token, but none (or an invalid one) was provided.
    #[error("authentication credentials were not provided or are invalid")]
    Unauthenticated,

    /// Bearer token is valid but was not granted the scopes required for the operation.
    #[error("token is missing required scopes: {required}")]
    InsufficientScope {
        /// Space-separated list of required scopes.
        required: String,
    },

    /// Page requires a logged-in user.
    #[error("login required to access {next}")]
    LoginRequired {
        /// Path the user tried to access; used to redirect back after login.
        next: String,
    },
}

impl Error {
    /// Creates a [`Validation`](Error::Validation) error for a single field.
    ///
    /// # Examples
    ///
    /// ```
    /// use pokedex_rs::Error;
    /// use validator::ValidationError;
    ///
    /// let error = Error::field_validation(
    ///     "trainer",
    ///     ValidationError::new("does_not_exist"),
    ///     "Invalid pk \"42\" - object does not exist.",
    /// );
    /// assert!(matches!(error, Error::Validation { .. }));
    /// ```
    pub fn field_validation<M>(field: &'static str, mut error: ValidationError, message: M) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        error.message = Some(message.into());

        let mut errors = ValidationErrors::new();
        errors.add(field, error);
        errors.into()
    }
}

/// Error type used for errors related to environment variables.
///
/// This is our variant of [`VarError`], with additional variants for our specific use cases.
/// In particular, a [`From`] `impl` is provided to be able to convert a [`VarError`] to this type.
///
/// [`VarError`]: env::VarError
#[derive(Debug, thiserror::Error)]
pub enum EnvVarError {
    /// The environment variable did not exist.
    ///
    /// This is our equivalent for [`VarError::NotPresent`](env::VarError::NotPresent).
    #[error("variable not found in environment")]
    NotFound,

    /// The environment variable could not be parsed to a Rust string because it contains
    /// invalid Unicode characters.
    ///
    /// This is our equivalent for [`VarError::NotUnicode`](env::VarError::NotUnicode).
    #[error("variable contained invalid, non-Unicode characters")]
    NotUnicode(OsString),

    /// The environment variable was expected to contain an int value, but didn't.
    #[error("expected int value, found {value}")]
    IntExpected {
        /// The actual value found in the environment variable.
        value: String,

        /// The parsing error that occurred when we tried to parse the value as an int.
        source: ParseIntError,
    },
}

impl From<env::VarError> for EnvVarError {
    /// Converts an `std` [`VarError`] to our intermediate [`EnvVarError`] type.
    ///
    /// Each variant of [`VarError`] has a corresponding variant in our [`EnvVarError`] type,
    /// so the mapping is straightforward.
    ///
    /// [`VarError`]: env::VarError
    fn from(value: env::VarError) -> Self {
        match value {
            env::VarError::NotPresent => Self::NotFound,
            env::VarError::NotUnicode(os_str) => Self::NotUnicode(os_str),
        }
    }
}

/// Helper trait to provide context for [`EnvVar`](Error::EnvVar) errors.
pub trait EnvVarContext {
    /// Type of output returned by [`with_env_var_context`](EnvVarContext::with_env_var_context).
    type Output;

    /// Provides context about the error that occurred.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::env;
    ///
    /// use pokedex_rs::error::EnvVarContext;
    ///
    /// # fn example() -> pokedex_rs::Result<()> {
    /// let db_url = env::var("DATABASE_URL")
    ///     .with_env_var_context(|| "DATABASE_URL environment variable should be set")?;
    /// #
    /// # Ok(())
    /// # }
    /// ```
    fn with_env_var_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<E> EnvVarContext for E
where
    E: Into<EnvVarError>,
{
    type Output = Error;

    fn with_env_var_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        Error::EnvVar {
            context: (context)().into(),
            source: self.into(),
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl<T, E> EnvVarContext for core::result::Result<T, E>
where
    E: EnvVarContext<Output = Error>,
{
    type Output = Result<T>;

    fn with_env_var_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.with_env_var_context(context))
    }
}

forward_from!(diesel_async::pooled_connection::PoolError => PoolError => Error);
forward_from!(multer::Error => FormDataError => Error);
forward_from!(serde_urlencoded::de::Error => FormDataError => Error);

impl From<deadpool::managed::BuildError> for Error {
    /// Converts a [`BuildError`](deadpool::managed::BuildError) into our [`Error`] type.
    ///
    /// This makes it possible to use `?` when building a connection pool.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use diesel_async::pooled_connection::AsyncDieselConnectionManager;
    /// use pokedex_rs::db::{get_db_url, Pool};
    ///
    /// fn get_pool() -> pokedex_rs::Result<Pool> {
    ///     let manager = AsyncDieselConnectionManager::new(get_db_url()?);
    ///     Ok(Pool::builder(manager).build()?)
    /// }
    /// ```
    fn from(value: deadpool::managed::BuildError) -> Self {
        match value {
            deadpool::managed::BuildError::NoRuntimeSpecified => {
                panic!("Runtime should be specified in Cargo.toml: {}", value);
            },
        }
    }
}

/// Helper trait to provide context for [`Query`](Error::Query) errors.
pub trait QueryContext {
    /// Type of output returned by [`with_query_context`](QueryContext::with_query_context).
    type Output;

    /// Provides context about the query performed when the error occurred.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use diesel::QueryDsl;
    /// use diesel_async::RunQueryDsl;
    /// use pokedex_rs::error::QueryContext;
    /// # use pokedex_rs::db::get_pool;
    /// use pokedex_rs::models::trainer::Trainer;
    /// use pokedex_rs::schema::trainers::dsl::*;
    ///
    /// # async fn example(trainer_id: i64) -> pokedex_rs::Result<()> {
    /// # let pool = get_pool()?;
    /// # let mut connection = pool.get().await?;
    /// #
    /// let trainer: Trainer = trainers
    ///     .find(trainer_id)
    ///     .first(&mut connection)
    ///     .await
    ///     .with_query_context(|| format!("Failed to fetch trainer with id {}", trainer_id))?;
    /// #
    /// # Ok(())
    /// # }
    /// ```
    fn with_query_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl QueryContext for diesel::result::Error {
    type Output = Error;

    fn with_query_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        Error::Query {
            context: (context)().into(),
            source: self,
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl<T, E> QueryContext for core::result::Result<T, E>
where
    E: QueryContext<Output = Error>,
{
    type Output = Result<T>;

    fn with_query_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.with_query_context(context))
    }
}

/// Helper trait to provide context for [`Media`](Error::Media) errors.
pub trait MediaContext {
    /// Type of output returned by [`with_media_context`](MediaContext::with_media_context).
    type Output;

    /// Provides context about the file operation performed when the error occurred.
    fn with_media_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl MediaContext for std::io::Error {
    type Output = Error;

    fn with_media_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        Error::Media {
            context: (context)().into(),
            source: self,
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl<T, E> MediaContext for core::result::Result<T, E>
where
    E: MediaContext<Output = Error>,
{
    type Output = Result<T>;

    fn with_media_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.with_media_context(context))
    }
}
