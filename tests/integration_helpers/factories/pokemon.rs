use std::str::FromStr;

use pokedex_rs::models::pokemon::{CreatePokemon, Pokemon, PokemonRecord};
use pokedex_rs::services::pokemon;
use rust_decimal::Decimal;
use validator::Validate;

use crate::integration_helpers::app::TestApp;

/// A complete 1x1 PNG image.
pub const PNG_PIXEL: &[u8] = b"\x89PNG\r\n\x1a\n\
    \x00\x00\x00\x0dIHDR\x00\x00\x00\x01\x00\x00\x00\x01\x08\x02\x00\x00\x00\x90\x77\x53\xde\
    \x00\x00\x00\x0cIDAT\x78\x9c\x63\xf8\x7f\x86\x01\x00\x04\x99\x01\xcc\x0f\x8a\x88\xc4\
    \x00\x00\x00\x00IEND\xae\x42\x60\x82";

pub fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn build_create_pokemon(name: &str, trainer: Option<i64>) -> CreatePokemon {
    let create_pokemon = CreatePokemon {
        name: Some(name.into()),
        pokemon_type: Some("Electric".into()),
        weight: Some(decimal("6.0000")),
        height: Some(decimal("0.4000")),
        trainer,
    };

    create_pokemon.validate().unwrap();
    create_pokemon
}

pub async fn insert_pokemon(app: &TestApp, name: &str, trainer: Option<i64>) -> Pokemon {
    let record = PokemonRecord::try_from(build_create_pokemon(name, trainer)).unwrap();

    pokemon::Service::new(app.get_pool())
        .insert_record(&record, Some("pokemon/existing.png"))
        .await
        .unwrap()
}
