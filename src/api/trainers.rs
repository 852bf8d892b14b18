//! Implementation of the Pokedex REST API endpoints for trainers.
//!
//! # Endpoints
//!
//! | HTTP method | Endpoint             | Usage                                                          | Auth         | See                       |
//! |-------------|----------------------|----------------------------------------------------------------|--------------|---------------------------|
//! | `GET`       | `/api/trainers`      | Lists all trainers in the DB                                   | bearer token | [`list`]                  |
//! | `GET`       | `/api/trainers/{id}` | Returns one trainer stored in DB, using its ID                 | bearer token | [`get`](struct@get)       |
//! | `POST`      | `/api/trainers`      | Adds a new trainer in the DB                                   | none         | [`create`]                |
//! | `PUT`       | `/api/trainers/{id}` | Updates the trainer with the given ID in the DB                | none         | [`update`]                |
//! | `PATCH`     | `/api/trainers/{id}` | Updates some fields of the trainer with the given ID in the DB | none         | [`patch`](struct@patch)   |
//! | `DELETE`    | `/api/trainers/{id}` | Deletes the trainer with the given ID from the DB              | none         | [`delete`](struct@delete) |
//!
//! Read endpoints require a bearer token granted both the `read` and `write` scopes; see
//! [`ReadWriteToken`].

//!
//! Deleting a trainer does not delete their pokemons; they are released in the wild instead.

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
use crate::models::trainer::{PatchTrainer, Trainer, TrainerRecord, UpsertTrainer};
use crate::services::{trainer, Repository};

/// Allows registration of all trainer REST API endpoints.
///
/// See [module documentation](self) for the entire list of supported endpoints.
/// Called automatically from [`api::configure`](crate::api::configure).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding API CRUD endpoints for /api/trainers");
    config
        .service(list)
        .service(get)
        .service(create)
        .service(update)
        .service(patch)
        .service(delete);
}

/// Lists all Trainers, ordered by id.
///
/// Registered as `GET /api/trainers`. Requires a bearer token (see [`ReadWriteToken`]).
#[utoipa::path(
    context_path = "/api/trainers",
    security(("bearer" = ["read", "write"])),
    responses(
        (status = OK, description = "All Trainers", body = [Trainer]),
        UnauthenticatedResponse,
        InsufficientScopeResponse,
        ServerErrorResponse,
    ),
)]
#[get("", name = "api_trainers")]
pub async fn list(_token: ReadWriteToken, service: Data<trainer::Service>) -> HttpResult {
    let trainers = service.list().await?;

    Ok(HttpResponse::Ok().json(trainers))
}

/// Returns information about a Trainer.
///
/// Registered as `GET /api/trainers/{id}`. Requires a bearer token (see [`ReadWriteToken`]).
#[utoipa::path(
    context_path = "/api/trainers",
    params(Id),
    security(("bearer" = ["read", "write"])),
    responses(
        (status = OK, response = Trainer),
        InvalidIdParamResponse,
        UnauthenticatedResponse,
        InsufficientScopeResponse,
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[get("/{id}", name = "api_trainer")]
pub async fn get(
    _token: ReadWriteToken,
    id: Path<Id>,
    service: Data<trainer::Service>,
) -> HttpResult {
    let trainer = service.get(*id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(trainer))
}

/// Creates a new Trainer.
///
/// Registered as `POST /api/trainers`. The trainer's level defaults to 1 if not specified.
#[utoipa::path(
    context_path = "/api/trainers",
    request_body(
        content = inline(UpsertTrainer),
        description = "New Trainer information",
    ),
    responses(
        (status = CREATED, response = Trainer),
        MalformedBodyResponse,
        InvalidFieldsResponse,
        ServerErrorResponse,
    ),
)]
#[post("", name = "api_trainers_create")]
pub async fn create(
    new_trainer: Json<UpsertTrainer>,
    service: Data<trainer::Service>,
) -> HttpResult {
    let record = TrainerRecord::try_from(new_trainer.into_inner())?;
    let trainer = service.create(&record).await?;

    Ok(HttpResponse::Created().json(trainer))
}

/// Updates a Trainer.
///
/// Registered as `PUT /api/trainers/{id}`. All fields except `level` must be specified; if
/// `level` is omitted, the trainer's current level is kept.
#[utoipa::path(
    context_path = "/api/trainers",
    params(Id),
    request_body(
        content = inline(UpsertTrainer),
        description = "Updated Trainer information",
    ),
    responses(
        (status = OK, response = Trainer),
        MalformedBodyResponse,
        InvalidFieldsResponse,
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[put("/{id}", name = "api_trainer_update")]
pub async fn update(
    id: Path<Id>,
    updated_trainer: Json<UpsertTrainer>,
    service: Data<trainer::Service>,
) -> HttpResult {
    let record = TrainerRecord::try_from(updated_trainer.into_inner())?;
    let trainer = service.update(*id.into_inner(), &record).await?;

    Ok(HttpResponse::Ok().json(trainer))
}

/// Updates specific fields of a Trainer.
///
/// Registered as `PATCH /api/trainers/{id}`. Fields that are not specified are not updated.
#[utoipa::path(
    context_path = "/api/trainers",
    params(Id),
    request_body(
        content = inline(PatchTrainer),
        description = "Specific Trainer fields to update",
    ),
    responses(
        (status = OK, response = Trainer),
        MalformedBodyResponse,
        InvalidFieldsResponse,
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[patch("/{id}", name = "api_trainer_patch")]
pub async fn patch(
    id: Path<Id>,
    trainer_patch: Json<PatchTrainer>,
    service: Data<trainer::Service>,
) -> HttpResult {
    let trainer = service.patch(*id.into_inner(), &trainer_patch).await?;

    Ok(HttpResponse::Ok().json(trainer))
}

/// Deletes a Trainer.
///
/// Registered as `DELETE /api/trainers/{id}`. The trainer's pokemons are kept, without a trainer.
#[utoipa::path(
    context_path = "/api/trainers",
    params(Id),
    responses(
        (status = NO_CONTENT, description = "Trainer deleted from Pokedex"),
        InvalidIdParamResponse,
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[delete("/{id}", name = "api_trainer_delete")]
pub async fn delete(id: Path<Id>, service: Data<trainer::Service>) -> HttpResult {
    service.delete(*id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
