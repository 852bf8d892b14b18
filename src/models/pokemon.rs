//! Models used to create/update/load pokemons from the database.
//!
//! # Notes
//!
//! Pokemon creation and full updates share the same fields, so their payloads are generated by
//! the [`implement_pokemon_upsert`](crate::implement_pokemon_upsert) macro. Both are converted into
//! a [`PokemonRecord`] before being written to the database; the picture is handled separately
//! since it can only be uploaded through the HTML form.

pub mod macros;
pub mod validations;

use diesel_derives::{AsChangeset, Insertable, Queryable, Selectable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{ToResponse, ToSchema};
use validations::validate_measurement;
use validator::Validate;

use crate::schema::pokemons;
use crate::{implement_pokemon_upsert, implement_pokemon_upsert_from};

#[cfg_attr(
    doc,
    doc = r"
        Base pokemon entity model.

        Used to validate queries at compile time as well as load pokemons from the database
        (including those returned by update queries).
    "
)]
#[cfg_attr(not(doc), doc = "Information about a Pokemon in the Pokedex")]
#[derive(
    Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, Deserialize, ToSchema, ToResponse,
)]
#[diesel(table_name = pokemons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(deny_unknown_fields)]
#[response(
    description = "Pokemon information",
    example = json!({
        "id": 1,
        "name": "Pikachu",
        "type": "Electric",
        "weight": "6.0000",
        "height": "0.4000",
        "trainer": 1,
        "picture": "pokemon/0b8e5f5e-8a0c-4c2e-9d0e-2f0e6f5b1c3a.png"
    }),
)]
pub struct Pokemon {
    /// Unique id of this Pokemon in the Pokedex database
    pub id: i64,

    /// Pokemon name
    #[schema(example = "Pikachu")]
    pub name: String,

    /// Pokemon elemental type
    #[serde(rename = "type")]
    #[diesel(column_name = type_)]
    #[schema(example = "Electric")]
    pub pokemon_type: String,

    /// Pokemon weight, in kilograms
    #[schema(example = "6.0000")]
    pub weight: Decimal,

    /// Pokemon height, in meters
    #[schema(example = "0.4000")]
    pub height: Decimal,

    /// id of the Trainer owning this Pokemon (`null` for a wild Pokemon)
    #[serde(rename = "trainer", default)]
    #[schema(example = 1)]
    pub trainer_id: Option<i64>,

    /// Path of the Pokemon's picture, relative to the media root (served under `/media/`)
    #[serde(default)]
    #[schema(example = "pokemon/pikachu.png")]
    pub picture: Option<String>,
}

impl Pokemon {
    /// Returns the URL where this Pokemon's picture is served, if it has one.
    pub fn picture_url(&self) -> Option<String> {
        self.picture
            .as_ref()
            .map(|picture| format!("/media/{}", picture))
    }
}

implement_pokemon_upsert! {
    pub struct CreatePokemon(
        doc = "Model used to insert a new pokemon in the database.",
        openapi_doc = "Information to create a new Pokemon in the Pokedex"
    );
}
implement_pokemon_upsert! {
    pub struct UpdatePokemon(
        doc = "Model used to update a pokemon in the database.",
        openapi_doc = "Information to update a Pokemon in the Pokedex, overwriting all fields"
    );
}
implement_pokemon_upsert_from!(CreatePokemon, UpdatePokemon);

/// Pokemon fields written to the database when a pokemon is created or fully updated.
///
/// The picture is not included: it is set separately by the
/// [Pokemon service](crate::services::pokemon::Service) because only the HTML form can upload one.
/// Setting [`trainer_id`](PokemonRecord::trainer_id) to `None` releases the Pokemon in the wild.
#[derive(Debug, Clone, PartialEq, Eq, Insertable, AsChangeset)]
#[diesel(table_name = pokemons)]
#[diesel(treat_none_as_null = true)]
pub struct PokemonRecord {
    /// Pokemon name
    pub name: String,

    /// Pokemon elemental type
    #[diesel(column_name = type_)]
    pub pokemon_type: String,

    /// Pokemon weight, in kilograms
    pub weight: Decimal,

    /// Pokemon height, in meters
    pub height: Decimal,

    /// id of the Trainer owning the Pokemon
    pub trainer_id: Option<i64>,
}

#[cfg_attr(
    doc,
    doc = r#"
        Model used to "patch" a pokemon in the database, e.g. update some fields only.

        All fields are optional; fields that are not specified will not be updated.
    "#
)]
#[cfg_attr(not(doc), doc = "Information to update specific fields of a Pokemon in the Pokedex")]
#[derive(
    Debug, Default, Clone, PartialEq, Eq, AsChangeset, Serialize, Deserialize, Validate, ToSchema,
)]
#[diesel(table_name = pokemons)]
#[serde(deny_unknown_fields)]
#[schema(example = json!({
    "weight": "6.5000",
    "trainer": null
}))]
pub struct PatchPokemon {
    /// Pokemon name
    #[validate(length(
        min = 1,
        max = 30,
        message = "Ensure this field has between 1 and 30 characters."
    ))]
    #[schema(example = "Raichu")]
    pub name: Option<String>,

    /// Pokemon elemental type
    #[serde(rename = "type")]
    #[diesel(column_name = type_)]
    #[validate(length(
        min = 1,
        max = 30,
        message = "Ensure this field has between 1 and 30 characters."
    ))]
    #[schema(example = "Electric")]
    pub pokemon_type: Option<String>,

    /// Pokemon weight, in kilograms
    #[validate(custom = "validate_measurement")]
    #[schema(example = "6.5000")]
    pub weight: Option<Decimal>,

    /// Pokemon height, in meters
    #[validate(custom = "validate_measurement")]
    #[schema(example = "0.4000")]
    pub height: Option<Decimal>,

    /// id of the Trainer owning the Pokemon
    ///
    /// Set to `null` to release the Pokemon in the wild.
    #[serde(
        rename = "trainer",
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    #[schema(nullable, example = 1)]
    pub trainer_id: Option<Option<i64>>,
}

impl PatchPokemon {
    /// Returns `true` if this patch does not update any field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.pokemon_type.is_none()
            && self.weight.is_none()
            && self.height.is_none()
            && self.trainer_id.is_none()
    }
}

/// Model used to import pokemons in the database from the seed CSV file.
///
/// Used by the `seed_db` command to seed the database initially. The `trainer` column contains the
/// (1-based) row number of the pokemon's trainer in the trainers seed file, if any.
#[derive(Debug, Clone, Deserialize, Validate)]
#[allow(missing_docs)]
pub struct ImportPokemon {
    #[validate(length(min = 1, max = 30))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 30))]
    pub pokemon_type: String,
    #[validate(custom = "validate_measurement")]
    pub weight: Decimal,
    #[validate(custom = "validate_measurement")]
    pub height: Decimal,
    #[validate(range(min = 1))]
    pub trainer: Option<usize>,
}

impl ImportPokemon {
    /// Converts this imported pokemon into a [`PokemonRecord`], owned by the given trainer.
    pub fn into_record(self, trainer_id: Option<i64>) -> PokemonRecord {
        PokemonRecord {
            name: self.name,
            pokemon_type: self.pokemon_type,
            weight: self.weight,
            height: self.height,
            trainer_id,
        }
    }
}
