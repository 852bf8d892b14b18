//! HTML form used to add or edit a Pokemon through the Pokedex pages.
//!
//! Unlike the REST API, which receives typed JSON, the HTML form submits every field as text
//! (plus an optional picture file). [`PokemonForm`] keeps the raw values so the form can be
//! re-rendered as submitted, along with an error message for each invalid field.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::str::FromStr;

use image::ImageReader;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::helpers::multipart::{FormData, UploadedFile};
use crate::models::pokemon::validations::validate_measurement;
use crate::models::pokemon::{Pokemon, PokemonRecord};
use crate::models::trainer::Trainer;
use crate::models::REQUIRED_MESSAGE;

/// Maximum length of the Pokemon `name` and `type` fields.
pub const MAX_TEXT_LENGTH: usize = 30;

/// Message used when a number field cannot be parsed.
pub const INVALID_NUMBER_MESSAGE: &str = "Enter a number.";

/// Message used when the selected trainer does not exist.
pub const INVALID_CHOICE_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Message used when the uploaded picture is not an image.
pub const INVALID_IMAGE_MESSAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

/// Returns the file extension matching the format of an image, or `None` if the data is not an
/// image in one of the supported formats.
///
/// The whole image is decoded, so truncated or corrupted files are rejected too.
pub fn image_extension(data: &[u8]) -> Option<&'static str> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?;
    let format = reader.format()?;
    reader.decode().ok()?;

    format.extensions_str().first().copied()
}

/// Pokemon add/edit form.
///
/// Serialized as-is in the template context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PokemonForm {
    /// Pokemon name, as entered
    pub name: String,

    /// Pokemon type, as entered
    #[serde(rename = "type")]
    pub pokemon_type: String,

    /// Pokemon weight, as entered
    pub weight: String,

    /// Pokemon height, as entered
    pub height: String,

    /// id of the selected trainer, or an empty string for a wild Pokemon
    pub trainer: String,

    /// Path of the picture currently stored for the Pokemon (edit form only)
    pub current_picture: Option<String>,

    /// Error messages for each invalid field
    pub errors: BTreeMap<String, Vec<String>>,
}

impl PokemonForm {
    /// Creates a form pre-populated with the values of an existing Pokemon.
    pub fn for_pokemon(pokemon: &Pokemon) -> Self {
        Self {
            name: pokemon.name.clone(),
            pokemon_type: pokemon.pokemon_type.clone(),
            weight: pokemon.weight.to_string(),
            height: pokemon.height.to_string(),
            trainer: pokemon
                .trainer_id
                .map(|trainer_id| trainer_id.to_string())
                .unwrap_or_default(),
            current_picture: pokemon.picture.clone(),
            errors: BTreeMap::new(),
        }
    }

    /// Creates a form holding the values of a submission.
    pub fn from_form_data(form_data: &FormData) -> Self {
        let field = |name| form_data.field(name).unwrap_or_default().to_string();

        Self {
            name: field("name"),
            pokemon_type: field("type"),
            weight: field("weight"),
            height: field("height"),
            trainer: field("trainer"),
            ..Self::default()
        }
    }

    /// Returns `true` if the form has errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Validates the submitted values.
    ///
    /// `trainers` lists the trainers that can be selected. `picture` is the uploaded picture, if
    /// any; a picture is mandatory unless the form already has a
    /// [current picture](PokemonForm::current_picture).
    ///
    /// Returns the record to save if the form is valid. Otherwise, errors are stored in the form
    /// and `None` is returned.
    pub fn validate(
        &mut self,
        trainers: &[Trainer],
        picture: Option<&UploadedFile>,
    ) -> Option<PokemonRecord> {
        self.errors.clear();

        let name = validate_text(&self.name);
        let pokemon_type = validate_text(&self.pokemon_type);
        let weight = validate_decimal(&self.weight);
        let height = validate_decimal(&self.height);
        let trainer_id = validate_trainer(&self.trainer, trainers);
        let picture = match picture {
            Some(picture) if image_extension(&picture.data).is_none() => {
                Err(INVALID_IMAGE_MESSAGE.to_string())
            },
            None if self.current_picture.is_none() => Err(REQUIRED_MESSAGE.to_string()),
            _ => Ok(()),
        };

        let name = self.check("name", name);
        let pokemon_type = self.check("type", pokemon_type);
        let weight = self.check("weight", weight);
        let height = self.check("height", height);
        let trainer_id = self.check("trainer", trainer_id);
        self.check("picture", picture);

        match (name, pokemon_type, weight, height, trainer_id) {
            (Some(name), Some(pokemon_type), Some(weight), Some(height), Some(trainer_id))
                if !self.has_errors() =>
            {
                Some(PokemonRecord { name, pokemon_type, weight, height, trainer_id })
            },
            _ => None,
        }
    }

    /// Records the error of an invalid field and returns the value of a valid one.
    fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.entry(field.to_string()).or_default().push(message);
                None
            },
        }
    }
}

fn validate_text(value: &str) -> Result<String, String> {
    let value = value.trim();
    let length = value.chars().count();

    if value.is_empty() {
        Err(REQUIRED_MESSAGE.into())
    } else if length > MAX_TEXT_LENGTH {
        Err(format!(
            "Ensure this value has at most {} characters (it has {}).",
            MAX_TEXT_LENGTH, length
        ))
    } else {
        Ok(value.to_string())
    }
}

fn validate_decimal(value: &str) -> Result<Decimal, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(REQUIRED_MESSAGE.into());
    }

    let measurement = Decimal::from_str(value).map_err(|_| INVALID_NUMBER_MESSAGE.to_string())?;
    validate_measurement(&measurement).map_err(|err| {
        err.message
            .map_or_else(|| err.code.to_string(), |message| message.to_string())
    })?;

    Ok(measurement)
}

/// Returns `None` for a wild Pokemon.
fn validate_trainer(value: &str, trainers: &[Trainer]) -> Result<Option<i64>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    match value.parse::<i64>() {
        Ok(trainer_id) if trainers.iter().any(|trainer| trainer.id == trainer_id) => {
            Ok(Some(trainer_id))
        },
        _ => Err(INVALID_CHOICE_MESSAGE.into()),
    }
}
