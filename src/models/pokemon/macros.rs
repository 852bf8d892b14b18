//! Helper macros used to generate Pokemon-related `struct`s.

/// Macro to generate a struct used to create or update a Pokemon through the REST API.
///
/// The generated struct holds the Pokemon information sent by the client. Every field is an
/// [`Option`] so that missing fields are reported as validation errors (along with any other
/// invalid field) instead of failing deserialization. Once validated, the struct can be converted
/// into a [`PokemonRecord`](crate::models::pokemon::PokemonRecord) to be written to the database.
///
/// # Examples
///
/// ```ignore
/// use pokedex_rs::implement_pokemon_upsert;
///
/// implement_pokemon_upsert! {
///     pub struct CreatePokemon(
///         doc = "Model used to insert a new pokemon.",
///         openapi_doc = "Information to create a Pokemon"
///     );
/// }
/// ```
#[macro_export]
macro_rules! implement_pokemon_upsert {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident(
            doc = $doc:expr,
            openapi_doc = $openapi_doc:expr
        );
    ) => {
        paste::paste! {
            $(#[$attr])*
            #[cfg_attr(doc, doc = r"
                " $doc r"

                All fields must be specified except for [`trainer`](" $name r"::trainer), which
                can be omitted or set to `null` for a wild Pokemon.
            ")]
            #[cfg_attr(not(doc), doc = $openapi_doc)]
            #[derive(
                std::fmt::Debug,
                std::clone::Clone,
                std::cmp::PartialEq,
                std::cmp::Eq,
                serde::Serialize,
                serde::Deserialize,
                validator::Validate,
                utoipa::ToSchema,
            )]
            #[serde(deny_unknown_fields)]
            $vis struct $name {
                /// Pokemon name
                #[validate(
                    required(message = "This field is required."),
                    length(
                        min = 1,
                        max = 30,
                        message = "Ensure this field has between 1 and 30 characters."
                    )
                )]
                #[schema(example = "Pikachu", min_length = 1, max_length = 30)]
                pub name: Option<String>,

                /// Pokemon elemental type
                #[serde(rename = "type")]
                #[validate(
                    required(message = "This field is required."),
                    length(
                        min = 1,
                        max = 30,
                        message = "Ensure this field has between 1 and 30 characters."
                    )
                )]
                #[schema(example = "Electric", min_length = 1, max_length = 30)]
                pub pokemon_type: Option<String>,

                /// Pokemon weight, in kilograms (up to 6 digits, 4 of which after the decimal point)
                #[validate(
                    required(message = "This field is required."),
                    custom = "crate::models::pokemon::validations::validate_measurement"
                )]
                #[schema(example = "6.0000")]
                pub weight: Option<rust_decimal::Decimal>,

                /// Pokemon height, in meters (up to 6 digits, 4 of which after the decimal point)
                #[validate(
                    required(message = "This field is required."),
                    custom = "crate::models::pokemon::validations::validate_measurement"
                )]
                #[schema(example = "0.4000")]
                pub height: Option<rust_decimal::Decimal>,

                /// id of the Trainer owning the Pokemon (`null` for a wild Pokemon)
                #[serde(default)]
                #[schema(nullable, example = 1)]
                pub trainer: Option<i64>,
            }

            impl std::convert::TryFrom<$name> for $crate::models::pokemon::PokemonRecord {
                type Error = $crate::Error;

                #[doc = r"
                    Converts a validated [`" $name r"`] into a record that can be written to
                    the database.

                    Fails with a validation error if a required field is missing.
                "]
                fn try_from(value: $name) -> $crate::Result<Self> {
                    Ok(Self {
                        name: $crate::models::required("name", value.name)?,
                        pokemon_type: $crate::models::required("type", value.pokemon_type)?,
                        weight: $crate::models::required("weight", value.weight)?,
                        height: $crate::models::required("height", value.height)?,
                        trainer_id: value.trainer,
                    })
                }
            }

            $crate::implement_pokemon_upsert_from! {
                #[doc = r"
                    Converts a [`Pokemon`]($crate::models::pokemon::Pokemon) struct into a
                    [`" $name r"`], dropping its [`id`]($crate::models::pokemon::Pokemon::id)
                    and [`picture`]($crate::models::pokemon::Pokemon::picture).
                "]
                $crate::models::pokemon::Pokemon => $name
            }
        }
    }
}

/// Macro to generate [`From`] implementations between Pokemon upsert structs.
///
/// Will generate two `impl From`s:
///
/// * `impl From<CreateStruct> for UpdateStruct`
/// * `impl From<UpdateStruct> for CreateStruct`
///
/// It can also be used to generate a single conversion from a
/// [`Pokemon`](crate::models::pokemon::Pokemon) into an upsert struct.
///
/// # Examples
///
/// ```ignore
/// use pokedex_rs::{implement_pokemon_upsert, implement_pokemon_upsert_from};
///
/// implement_pokemon_upsert! {
///     pub struct CreatePokemon(
///         doc = "Model used to insert a new pokemon.",
///         openapi_doc = "Information to create a Pokemon"
///     );
/// }
/// implement_pokemon_upsert! {
///     pub struct UpdatePokemon(
///         doc = "Model used to update a pokemon.",
///         openapi_doc = "Information to update a Pokemon"
///     );
/// }
/// implement_pokemon_upsert_from!(CreatePokemon, UpdatePokemon);
/// ```
#[macro_export]
macro_rules! implement_pokemon_upsert_from {
    ( $create_ty:ty, $update_ty:ty ) => {
        impl std::convert::From<$create_ty> for $update_ty {
            fn from(value: $create_ty) -> Self {
                Self {
                    name: value.name,
                    pokemon_type: value.pokemon_type,
                    weight: value.weight,
                    height: value.height,
                    trainer: value.trainer,
                }
            }
        }

        impl std::convert::From<$update_ty> for $create_ty {
            fn from(value: $update_ty) -> Self {
                Self {
                    name: value.name,
                    pokemon_type: value.pokemon_type,
                    weight: value.weight,
                    height: value.height,
                    trainer: value.trainer,
                }
            }
        }
    };

    (
        $(#[$attr:meta])*
        $pokemon_ty:ty => $upsert_ty:ty
    ) => {
        impl std::convert::From<$pokemon_ty> for $upsert_ty {
            $(#[$attr])*
            fn from(value: $pokemon_ty) -> Self {
                Self {
                    name: Some(value.name),
                    pokemon_type: Some(value.pokemon_type),
                    weight: Some(value.weight),
                    height: Some(value.height),
                    trainer: value.trainer_id,
                }
            }
        }
    }
}
