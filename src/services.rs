//! Services implementing the Pokedex business logic.
//!
//! Each entity has its own service, wrapping a database connection [`Pool`]. Services are
//! registered as app data (see [`configure`]) and shared by the REST API and the HTML pages.

pub mod account;
pub mod pokemon;
pub mod trainer;

use actix_web::web::{Data, ServiceConfig};
use async_trait::async_trait;
use log::trace;

use crate::db::Pool;

/// Explicit create/read/update/delete operations for an entity stored in the database.
///
/// Implemented by the services of the entities exposed as REST resource collections.
#[async_trait(?Send)]
pub trait Repository {
    /// Entity loaded from the database.
    type Entity;

    /// Data required to create a new entity.
    type Create;

    /// Data required to overwrite an existing entity.
    type Update;

    /// Data used to update some fields of an existing entity.
    type Patch;

    /// Returns all entities, ordered by id.
    async fn list(&self) -> crate::Result<Vec<Self::Entity>>;

    /// Returns the entity with the given id.
    ///
    /// Fails with a [`NotFound`](diesel::result::Error::NotFound) query error if it does not exist.
    async fn get(&self, id: i64) -> crate::Result<Self::Entity>;

    /// Creates a new entity and returns it.
    async fn create(&self, new_entity: &Self::Create) -> crate::Result<Self::Entity>;

    /// Overwrites the entity with the given id and returns its new state.
    async fn update(&self, id: i64, entity_update: &Self::Update) -> crate::Result<Self::Entity>;

    /// Updates the fields specified in `entity_patch` and returns the entity's new state.
    async fn patch(&self, id: i64, entity_patch: &Self::Patch) -> crate::Result<Self::Entity>;

    /// Deletes the entity with the given id.
    async fn delete(&self, id: i64) -> crate::Result<()>;
}

/// Registers all services as app data, sharing the given database connection [`Pool`].
///
/// Called automatically from [`configure_app`](crate::configure_app).
pub fn configure(pool: &Pool) -> impl FnOnce(&mut ServiceConfig) + '_ {
    |config| {
        trace!("Registering service app data");
        config
            .app_data(Data::new(pokemon::Service::new(pool.clone())))
            .app_data(Data::new(trainer::Service::new(pool.clone())))
            .app_data(Data::new(account::Service::new(pool.clone())));
    }
}
