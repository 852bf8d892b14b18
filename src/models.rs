//! Models used to load and save the Pokedex entities in the database.

pub mod pokemon;
pub mod trainer;
pub mod user;

use validator::ValidationError;

use crate::Error;

/// Message used when a required field is missing from a submission.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Unwraps the value of a required field.
///
/// Payloads validated with `#[validate(required)]` should never trigger the error, but converting
/// them this way avoids having to `unwrap()` their fields.
///
/// # Errors
///
/// A [`Validation`](Error::Validation) error on `field` if `value` is `None`.
pub fn required<T>(field: &'static str, value: Option<T>) -> crate::Result<T> {
    value.ok_or_else(|| {
        Error::field_validation(field, ValidationError::new("required"), REQUIRED_MESSAGE)
    })
}
