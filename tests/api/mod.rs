mod oauth;
mod pokemons;
