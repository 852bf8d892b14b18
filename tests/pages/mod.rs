mod accounts;
mod pokemons;
mod trainers;
