//! Service used to load and save trainers.

use async_trait::async_trait;
use diesel::{delete, insert_into, update, NotFound, QueryDsl};
use diesel_async::RunQueryDsl;

use crate::db::{Pool, PooledConnection};
use crate::error::QueryContext;
use crate::models::trainer::{PatchTrainer, Trainer, TrainerRecord};
use crate::services::Repository;

/// Service implementation for [`Trainer`] entities.
///
/// Deleting a trainer does not delete their pokemons: the database releases them in the wild.
#[derive(Clone)]
pub struct Service {
    pool: Pool,
}

impl Service {
    /// Creates a new trainer service using the provided database connection [`Pool`].
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn get_pooled_connection(&self) -> crate::Result<PooledConnection> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait(?Send)]
impl Repository for Service {
    type Entity = Trainer;
    type Create = TrainerRecord;
    type Update = TrainerRecord;
    type Patch = PatchTrainer;

    async fn list(&self) -> crate::Result<Vec<Trainer>> {
        use crate::schema::trainers::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        trainers
            .order(id)
            .load(&mut connection)
            .await
            .with_query_context(|| "failed to load trainers")
    }

    async fn get(&self, trainer_id: i64) -> crate::Result<Trainer> {
        use crate::schema::trainers::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        trainers
            .find(trainer_id)
            .first(&mut connection)
            .await
            .with_query_context(|| format!("failed to fetch trainer with id {}", trainer_id))
    }

    async fn create(&self, new_trainer: &TrainerRecord) -> crate::Result<Trainer> {
        use crate::schema::trainers::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        insert_into(trainers)
            .values(new_trainer)
            .get_result(&mut connection)
            .await
            .with_query_context(|| "failed to insert new trainer")
    }

    async fn update(
        &self,
        trainer_id: i64,
        trainer_update: &TrainerRecord,
    ) -> crate::Result<Trainer> {
        use crate::schema::trainers::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        update(trainers.find(trainer_id))
            .set(trainer_update)
            .get_result(&mut connection)
            .await
            .with_query_context(|| format!("failed to update trainer {}", trainer_id))
    }

    async fn patch(&self, trainer_id: i64, trainer_patch: &PatchTrainer) -> crate::Result<Trainer> {
        use crate::schema::trainers::dsl::*;

        if trainer_patch.is_empty() {
            return self.get(trainer_id).await;
        }

        let mut connection = self.get_pooled_connection().await?;

        update(trainers.find(trainer_id))
            .set(trainer_patch)
            .get_result(&mut connection)
            .await
            .with_query_context(|| format!("failed to patch trainer {}", trainer_id))
    }

    async fn delete(&self, trainer_id: i64) -> crate::Result<()> {
        use crate::schema::trainers::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        delete(trainers.find(trainer_id))
            .execute(&mut connection)
            .await
            .and_then(|deleted_count| if deleted_count > 0 { Ok(()) } else { Err(NotFound) })
            .with_query_context(|| format!("failed to delete trainer {}", trainer_id))
    }
}
