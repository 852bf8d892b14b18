//! Implementation of the Pokedex REST API endpoints for pokemons.
//!
//! # Endpoints
//!
//! | HTTP method | Endpoint             | Usage                                                          | Auth         | See                       |
//! |-------------|----------------------|----------------------------------------------------------------|--------------|---------------------------|
//! | `GET`       | `/api/pokemons`      | Lists all pokemons in the DB                                   | bearer token | [`list`]                  |
//! | `GET`       | `/api/pokemons/{id}` | Returns one pokemon stored in DB, using its ID                 | bearer token | [`get`](struct@get)       |
//! | `POST`      | `/api/pokemons`      | Adds a new pokemon in the DB                                   | none         | [`create`]                |
//! | `PUT`       | `/api/pokemons/{id}` | Updates the pokemon with the given ID in the DB                | none         | [`update`]                |
//! | `PATCH`     | `/api/pokemons/{id}` | Updates some fields of the pokemon with the given ID in the DB | none         | [`patch`](struct@patch)   |
//! | `DELETE`    | `/api/pokemons/{id}` | Deletes the pokemon with the given ID from the DB              | none         | [`delete`](struct@delete) |
//!
//! Read endpoints require a bearer token granted both the `read` and `write` scopes; see
//! [`ReadWriteToken`].

use actix_web::web::{Data, ServiceConfig};
use actix_web::{delete, get, patch, post, put, HttpResponse};
use actix_web_validator::{Json, Path};
use log::trace;

use crate::api::responses::{
    IdNotFoundResponse, InsufficientScopeResponse, InvalidFieldsResponse, InvalidIdParamResponse,
    MalformedBodyResponse, ServerErrorResponse, UnauthenticatedResponse,
};
use crate::api::{HttpResult, Id};
use crate::auth::token::ReadWriteToken;
use crate::models::pokemon::{CreatePokemon, PatchPokemon, Pokemon, PokemonRecord, UpdatePokemon};
use crate::services::{pokemon, Repository};

/// Allows registration of all pokemon REST API endpoints.
///
/// See [module documentation](self) for the entire list of supported endpoints.
/// Called automatically from [`api::configure`](crate::api::configure).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding API CRUD endpoints for /api/pokemons");
    config
        .service(list)
        .service(get)
        .service(create)
        .service(update)
        .service(patch)
        .service(delete);
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to list all pokemons.

        Registered as `GET /api/pokemons`. Requires a bearer token (see [`ReadWriteToken`]).

        # Output

        A JSON array of [`Pokemon`]s, ordered by id.
    "
)]
#[cfg_attr(not(doc), doc = "Lists all Pokemons in the Pokedex")]
#[utoipa::path(
    context_path = "/api/pokemons",
    security(("bearer" = ["read", "write"])),
    responses(
        (status = OK, description = "All Pokemons in the Pokedex", body = [Pokemon]),
        UnauthenticatedResponse,
        InsufficientScopeResponse,
        ServerErrorResponse,
    ),
)]
#[get("", name = "api_pokemons")]
pub async fn list(_token: ReadWriteToken, service: Data<pokemon::Service>) -> HttpResult {
    let pokemons = service.list().await?;

    Ok(HttpResponse::Ok().json(pokemons))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to fetch one pokemon from the DB.

        Registered as `GET /api/pokemons/{id}`. Requires a bearer token (see [`ReadWriteToken`]).

        # Input

        - `{id}`: ID of pokemon to fetch.

        # Output

        A [`Pokemon`], serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Returns information about a Pokemon")]
#[utoipa::path(
    context_path = "/api/pokemons",
    params(Id),
    security(("bearer" = ["read", "write"])),
    responses(
        (status = OK, response = Pokemon),
        InvalidIdParamResponse,
        UnauthenticatedResponse,
        InsufficientScopeResponse,
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[get("/{id}", name = "api_pokemon")]
pub async fn get(
    _token: ReadWriteToken,
    id: Path<Id>,
    service: Data<pokemon::Service>,
) -> HttpResult {
    let pokemon = service.get(*id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to add a new pokemon to the DB.

        Registered as `POST /api/pokemons`. Does not require authentication.

        # Input

        - Request body: the pokemon data, as a JSON-serialized [`CreatePokemon`].

        # Output

        The newly-inserted [`Pokemon`], serialized as JSON. Pokemons created through the API
        have no picture.
    "
)]
#[cfg_attr(not(doc), doc = "Creates a new Pokemon")]
#[utoipa::path(
    context_path = "/api/pokemons",
    request_body(
        content = inline(CreatePokemon),
        description = "New Pokemon information",
    ),
    responses(
        (status = CREATED, response = Pokemon),
        MalformedBodyResponse,
        InvalidFieldsResponse,
        ServerErrorResponse,
    ),
)]
#[post("", name = "api_pokemons_create")]
pub async fn create(
    new_pokemon: Json<CreatePokemon>,
    service: Data<pokemon::Service>,
) -> HttpResult {
    let record = PokemonRecord::try_from(new_pokemon.into_inner())?;
    let pokemon = service.create(&record).await?;

    Ok(HttpResponse::Created().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to update a pokemon in the DB.

        Updates all fields of the pokemon in one go. Registered as `PUT /api/pokemons/{id}`.
        Does not require authentication.

        # Input

        - `{id}`: ID of pokemon to update.
        - Request body: the updated pokemon data, as a JSON-serialized [`UpdatePokemon`]. Must include
                        all fields except `trainer` or the request will be rejected; an omitted
                        `trainer` releases the pokemon in the wild.

        # Output

        The updated [`Pokemon`], serialized as JSON. Its picture is left untouched.
    "
)]
#[cfg_attr(not(doc), doc = "Updates a Pokemon")]
#[utoipa::path(
    context_path = "/api/pokemons",
    params(Id),
    request_body(
        content = inline(UpdatePokemon),
        description = "Updated Pokemon information",
    ),
    responses(
        (status = OK, response = Pokemon),
        MalformedBodyResponse,
        InvalidFieldsResponse,
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[put("/{id}", name = "api_pokemon_update")]
pub async fn update(
    id: Path<Id>,
    updated_pokemon: Json<UpdatePokemon>,
    service: Data<pokemon::Service>,
) -> HttpResult {
    let record = PokemonRecord::try_from(updated_pokemon.into_inner())?;
    let pokemon = service.update(*id.into_inner(), &record).await?;

    Ok(HttpResponse::Ok().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to update some fields of a pokemon in the DB.

        Any field not specified will not be updated. Registered as `PATCH /api/pokemons/{id}`.
        Does not require authentication.

        # Input

        - `{id}`: ID of pokemon to update.
        - Request body: the fields to update in the pokemon, as a JSON-serialized [`PatchPokemon`][^1].

        # Output

        The updated [`Pokemon`], serialized as JSON.

        [^1]: The `trainer` field can be set to `NULL` in the DB by specifying it in the input data
              as a JSON `null` value. If the field is omitted in the input data, its value will not
              be updated. (For more details, see [`PatchPokemon::trainer_id`].)
    "
)]
#[cfg_attr(not(doc), doc = "Updates specific fields of a Pokemon")]
#[utoipa::path(
    context_path = "/api/pokemons",
    params(Id),
    request_body(
        content = inline(PatchPokemon),
        description = "Specific Pokemon fields to update",
    ),
    responses(
        (status = OK, response = Pokemon),
        MalformedBodyResponse,
        InvalidFieldsResponse,
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[patch("/{id}", name = "api_pokemon_patch")]
pub async fn patch(
    id: Path<Id>,
    pokemon_patch: Json<PatchPokemon>,
    service: Data<pokemon::Service>,
) -> HttpResult {
    let pokemon = service.patch(*id.into_inner(), &pokemon_patch).await?;

    Ok(HttpResponse::Ok().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to delete a pokemon from the DB.

        Registered as `DELETE /api/pokemons/{id}`. Does not require authentication.

        # Input

        - `{id}`: ID of pokemon to delete.

        # Output

        This endpoint simply returns `HTTP 204 No Content` upon success.
    "
)]
#[cfg_attr(not(doc), doc = "Deletes a Pokemon")]
#[utoipa::path(
    context_path = "/api/pokemons",
    params(Id),
    responses(
        (status = NO_CONTENT, description = "Pokemon deleted from Pokedex"),
        InvalidIdParamResponse,
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[delete("/{id}", name = "api_pokemon_delete")]
pub async fn delete(id: Path<Id>, service: Data<pokemon::Service>) -> HttpResult {
    service.delete(*id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
