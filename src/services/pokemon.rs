//! Service used to load and save pokemons. Used by the Pokedex REST API and HTML pages.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::{delete, insert_into, select, update, ExpressionMethods, NotFound, QueryDsl};
use diesel_async::RunQueryDsl;
use validator::ValidationError;

use crate::db::{Connection, Pool, PooledConnection};
use crate::error::QueryContext;
use crate::models::pokemon::{PatchPokemon, Pokemon, PokemonRecord};
use crate::services::Repository;
use crate::Error;

/// Service implementation for [`Pokemon`] entities.
///
/// This type contains the actual business logic to fetch/save pokemons from the database.
/// It is used by the [pokemons REST API endpoints](crate::api::pokemons) and by the
/// [Pokemon pages](crate::pages::pokemons).
#[derive(Clone)]
pub struct Service {
    pool: Pool,
}

impl Service {
    /// Creates a new pokemon service using the provided database connection [`Pool`].
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Returns the [`Pokemon`]s owned by the given trainer, ordered by id.
    pub async fn list_for_trainer(&self, owner_id: i64) -> crate::Result<Vec<Pokemon>> {
        use crate::schema::pokemons::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        pokemons
            .filter(trainer_id.eq(owner_id))
            .order(id)
            .load(&mut connection)
            .await
            .with_query_context(|| format!("failed to load pokemons of trainer {}", owner_id))
    }

    /// Inserts a new [`Pokemon`] in the database, along with the path of its picture.
    pub async fn insert_record(
        &self,
        record: &PokemonRecord,
        picture_path: Option<&str>,
    ) -> crate::Result<Pokemon> {
        use crate::schema::pokemons::dsl::*;

        let mut connection = self.get_pooled_connection().await?;
        ensure_trainer_exists(&mut connection, record.trainer_id).await?;

        insert_into(pokemons)
            .values((record, picture.eq(picture_path)))
            .get_result(&mut connection)
            .await
            .with_query_context(|| "failed to insert new pokemon")
    }

    /// Overwrites the [`Pokemon`] with the given id in the database.
    ///
    /// If `picture_path` is `None`, the pokemon's current picture is kept.
    pub async fn update_record(
        &self,
        pokemon_id: i64,
        record: &PokemonRecord,
        picture_path: Option<&str>,
    ) -> crate::Result<Pokemon> {
        use crate::schema::pokemons::dsl::*;

        let mut connection = self.get_pooled_connection().await?;
        ensure_trainer_exists(&mut connection, record.trainer_id).await?;

        let target = pokemons.find(pokemon_id);
        match picture_path {
            Some(picture_path) => {
                update(target)
                    .set((record, picture.eq(picture_path)))
                    .get_result(&mut connection)
                    .await
            },
            None => update(target).set(record).get_result(&mut connection).await,
        }
        .with_query_context(|| format!("failed to update pokemon {}", pokemon_id))
    }

    /// Returns a [`PooledConnection`] from our internal database connection pool.
    ///
    /// The connection can then be used to perform DB queries.
    async fn get_pooled_connection(&self) -> crate::Result<PooledConnection> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait(?Send)]
impl Repository for Service {
    type Entity = Pokemon;
    type Create = PokemonRecord;
    type Update = PokemonRecord;
    type Patch = PatchPokemon;

    async fn list(&self) -> crate::Result<Vec<Pokemon>> {
        use crate::schema::pokemons::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        pokemons
            .order(id)
            .load(&mut connection)
            .await
            .with_query_context(|| "failed to load pokemons")
    }

    async fn get(&self, pokemon_id: i64) -> crate::Result<Pokemon> {
        use crate::schema::pokemons::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        pokemons
            .find(pokemon_id)
            .first(&mut connection)
            .await
            .with_query_context(|| format!("failed to fetch pokemon with id {}", pokemon_id))
    }

    async fn create(&self, new_pokemon: &PokemonRecord) -> crate::Result<Pokemon> {
        self.insert_record(new_pokemon, None).await
    }

    async fn update(
        &self,
        pokemon_id: i64,
        pokemon_update: &PokemonRecord,
    ) -> crate::Result<Pokemon> {
        self.update_record(pokemon_id, pokemon_update, None).await
    }

    async fn patch(&self, pokemon_id: i64, pokemon_patch: &PatchPokemon) -> crate::Result<Pokemon> {
        use crate::schema::pokemons::dsl::*;

        if pokemon_patch.is_empty() {
            return self.get(pokemon_id).await;
        }

        let mut connection = self.get_pooled_connection().await?;
        if let Some(new_trainer_id) = pokemon_patch.trainer_id {
            ensure_trainer_exists(&mut connection, new_trainer_id).await?;
        }

        update(pokemons.find(pokemon_id))
            .set(pokemon_patch)
            .get_result(&mut connection)
            .await
            .with_query_context(|| format!("failed to patch pokemon {}", pokemon_id))
    }

    async fn delete(&self, pokemon_id: i64) -> crate::Result<()> {
        use crate::schema::pokemons::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        delete(pokemons.find(pokemon_id))
            .execute(&mut connection)
            .await
            .and_then(|deleted_count| if deleted_count > 0 { Ok(()) } else { Err(NotFound) })
            .with_query_context(|| format!("failed to delete pokemon {}", pokemon_id))
    }
}

/// Makes sure the trainer a pokemon refers to exists.
///
/// Fails with a [`Validation`](Error::Validation) error on the `trainer` field otherwise.
async fn ensure_trainer_exists(
    connection: &mut Connection,
    trainer_id: Option<i64>,
) -> crate::Result<()> {
    use crate::schema::trainers;

    let Some(trainer_id) = trainer_id else {
        return Ok(());
    };

    let trainer_exists: bool = select(exists(trainers::table.find(trainer_id)))
        .get_result(connection)
        .await
        .with_query_context(|| format!("failed to look up trainer {}", trainer_id))?;

    if trainer_exists {
        Ok(())
    } else {
        Err(Error::field_validation(
            "trainer",
            ValidationError::new("does_not_exist"),
            format!("Invalid pk \"{}\" - object does not exist.", trainer_id),
        ))
    }
}
