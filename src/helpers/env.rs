//! Environment variable helpers.
//!
//! All Pokedex settings come from the environment, optionally seeded from a `.env` file.

use std::env;
use std::num::ParseIntError;
use std::path::Path;
use std::str::FromStr;

use crate::error::EnvVarError;

/// Loads the `.env` file found in the current directory or one of its parents, if there is one.
///
/// Returns `Ok(false)` when no `.env` file exists. Variables already set in the environment are
/// never overwritten.
pub fn load_optional_dotenv() -> dotenvy::Result<bool> {
    optional_env_file(dotenvy::dotenv())
}

/// Loads the environment file at the given path, if it exists.
///
/// Works like [`load_optional_dotenv`], but for an explicit file.
pub fn load_optional_env_file<P>(path: P) -> dotenvy::Result<bool>
where
    P: AsRef<Path>,
{
    optional_env_file(dotenvy::from_path(path))
}

fn optional_env_file<T>(result: dotenvy::Result<T>) -> dotenvy::Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(err) if err.not_found() => Ok(false),
        Err(err) => Err(err),
    }
}

/// Reads an optional environment variable.
///
/// | Environment variable     | Return value                   |
/// |--------------------------|--------------------------------|
/// | Contains value `foo`     | `Ok(Some("foo"))`              |
/// | Does not exist           | `Ok(None)`                     |
/// | Contains invalid unicode | `Err(EnvVarError::NotUnicode)` |
pub fn optional_env_var(key: &str) -> Result<Option<String>, EnvVarError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Reads an environment variable containing an integer.
///
/// Fails with [`EnvVarError::NotFound`] if the variable does not exist and with
/// [`EnvVarError::IntExpected`] if it cannot be parsed.
pub fn int_env_var<T>(key: &str) -> Result<T, EnvVarError>
where
    T: FromStr<Err = ParseIntError>,
{
    let value = optional_env_var(key)?.ok_or(EnvVarError::NotFound)?;

    value
        .parse()
        .map_err(|source| EnvVarError::IntExpected { value, source })
}
