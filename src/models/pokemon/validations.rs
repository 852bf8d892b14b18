//! Helpers to validate Pokemon data.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

/// Common Pokemon types.
///
/// Used to suggest values for the `type` field in the Pokemon form. The type is free text and
/// is not restricted to these values.
pub const POKEMON_TYPES: [&str; 18] = [
    "Normal", "Fire", "Water", "Grass", "Flying", "Fighting", "Poison", "Electric", "Ground",
    "Rock", "Psychic", "Ice", "Bug", "Ghost", "Steel", "Dragon", "Dark", "Fairy",
];

/// Maximum number of digits in a Pokemon measurement (weight or height).
pub const MEASUREMENT_MAX_DIGITS: u32 = 6;

/// Maximum number of decimal places in a Pokemon measurement (weight or height).
pub const MEASUREMENT_DECIMAL_PLACES: u32 = 4;

/// Validates the precision of a Pokemon measurement (weight or height).
///
/// Measurements are stored as `NUMERIC(6, 4)`: trailing zeros aside, they can have at most
/// [`MEASUREMENT_DECIMAL_PLACES`] decimal places and at most [`MEASUREMENT_MAX_DIGITS`] digits
/// in total (so at most two digits before the decimal point).
pub fn validate_measurement(value: &Decimal) -> Result<(), ValidationError> {
    let normalized = value.normalize();
    let mantissa_digits = normalized
        .mantissa()
        .unsigned_abs()
        .checked_ilog10()
        .map_or(1, |log| log + 1);
    let decimal_places = normalized.scale();
    let digits = mantissa_digits.max(decimal_places);
    let whole_digits = digits - decimal_places;

    let max_whole_digits = MEASUREMENT_MAX_DIGITS - MEASUREMENT_DECIMAL_PLACES;
    let (code, message) = if digits > MEASUREMENT_MAX_DIGITS {
        (
            "max_digits",
            format!(
                "Ensure that there are no more than {} digits in total.",
                MEASUREMENT_MAX_DIGITS
            ),
        )
    } else if decimal_places > MEASUREMENT_DECIMAL_PLACES {
        (
            "max_decimal_places",
            format!(
                "Ensure that there are no more than {} decimal places.",
                MEASUREMENT_DECIMAL_PLACES
            ),
        )
    } else if whole_digits > max_whole_digits {
        (
            "max_whole_digits",
            format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                max_whole_digits
            ),
        )
    } else {
        return Ok(());
    };

    let mut validation_error = ValidationError::new(code);
    validation_error.message = Some(Cow::from(message));
    validation_error.add_param(Cow::from("value"), &value.to_string());

    Err(validation_error)
}
