//! Seeds the Pokedex database with initial trainers and pokemons.
//!
//! See `README.md` for usage.

use std::env::current_exe;
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Context};
use cargo_metadata::camino::Utf8PathBuf;
use cargo_metadata::MetadataCommand;
use diesel::{delete, insert_into, Connection, RunQueryDsl};
use log::{info, trace};
use pokedex_rs::db::{get_db_url, SyncConnection};
use pokedex_rs::helpers::env::load_optional_dotenv;
use pokedex_rs::models::pokemon::{ImportPokemon, PokemonRecord};
use pokedex_rs::models::trainer::ImportTrainer;
use serde::de::DeserializeOwned;
use simple_logger::SimpleLogger;
use validator::Validate;

/// Name of the seed CSV file containing trainers.
const TRAINERS_SEED_FILE: &str = "trainers.csv";

/// Name of the seed CSV file containing pokemons.
const POKEMONS_SEED_FILE: &str = "pokemons.csv";

/// Main program body.
///
/// Loads trainers and pokemons from the CSV files located in `./seed` and inserts them in the
/// Pokedex database, overwriting any existing catalog data. User accounts are left untouched.
fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .init()
        .with_context(|| "failed to initialize logging facility")?;

    info!("Loading environment variables");
    load_optional_dotenv()
        .with_context(|| "failed to load `.env` file containing environment variables")?;

    info!("Starting Pokedex seeding program");
    let start_time = Instant::now();
    let seed_dir = get_seed_dir()?;

    info!("Loading trainer data from {}", seed_dir.join(TRAINERS_SEED_FILE));
    let new_trainers: Vec<ImportTrainer> = load_seed_file(seed_dir.join(TRAINERS_SEED_FILE))?;

    info!("Loading pokemon data from {}", seed_dir.join(POKEMONS_SEED_FILE));
    let new_pokemons: Vec<ImportPokemon> = load_seed_file(seed_dir.join(POKEMONS_SEED_FILE))?;

    info!("Connecting to Postgres database");
    let mut connection = SyncConnection::establish(&get_db_url()?)
        .with_context(|| "failed to connect to Postgres database")?;

    connection.transaction(|connection| {
        info!("Dropping existing pokemons and trainers from database, if any");
        drop_existing_data(connection)?;

        info!("Inserting trainers into database");
        let trainer_ids = insert_trainers(connection, &new_trainers)?;

        info!("Inserting pokemons into database");
        insert_pokemons(connection, new_pokemons, &trainer_ids)
    })?;

    let elapsed = start_time.elapsed();
    info!("Pokedex database seed done in {:.4?}s.", elapsed.as_secs_f64());

    Ok(())
}

/// Returns the path to the directory containing the seed CSV files.
fn get_seed_dir() -> anyhow::Result<Utf8PathBuf> {
    // First try looking in the directory of the current executable.
    let mut seed_dir = current_exe()?;
    seed_dir.pop();
    seed_dir.push("seed");
    if seed_dir.is_dir() {
        return seed_dir
            .try_into()
            .with_context(|| "seed directory path contains invalid UTF-8 characters");
    }

    // Otherwise we must be in a dev environment, so ask cargo where the workspace is.
    let metadata = MetadataCommand::new()
        .exec()
        .with_context(|| "failed to get metadata to fetch workspace root")?;

    Ok(metadata.workspace_root.join("seed"))
}

/// Loads and validates all records of a seed CSV file.
fn load_seed_file<T, P>(path: P) -> anyhow::Result<Vec<T>>
where
    T: DeserializeOwned + Validate,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let csv_reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to load CSV file {}", path.display()))?;

    let records = csv_reader
        .into_deserialize()
        .collect::<Result<Vec<T>, _>>()
        .with_context(|| format!("failed to load data from CSV file {}", path.display()))?
        .into_iter()
        .map(|record| record.validate().map(|_| record))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("CSV file {} contained some invalid data", path.display()))?;
    trace!("Found {} records in {}", records.len(), path.display());

    Ok(records)
}

/// Clears the Pokedex database of any existing pokemons and trainers.
fn drop_existing_data(connection: &mut SyncConnection) -> anyhow::Result<()> {
    use pokedex_rs::schema::{pokemons, trainers};

    let deleted_count = delete(pokemons::table)
        .execute(connection)
        .with_context(|| "failed to delete existing pokemons from database")?;
    trace!("{} existing pokemons have been deleted", deleted_count);

    let deleted_count = delete(trainers::table)
        .execute(connection)
        .with_context(|| "failed to delete existing trainers from database")?;
    trace!("{} existing trainers have been deleted", deleted_count);

    Ok(())
}

/// Inserts the given trainers in the Pokedex database.
///
/// Returns the ids of the new trainers, in seed file order.
fn insert_trainers(
    connection: &mut SyncConnection,
    new_trainers: &[ImportTrainer],
) -> anyhow::Result<Vec<i64>> {
    use pokedex_rs::schema::trainers::dsl::*;

    let trainer_ids = insert_into(trainers)
        .values(new_trainers)
        .returning(id)
        .get_results(connection)
        .with_context(|| "failed to insert trainers into database")?;
    trace!("{} trainers have been inserted into database", trainer_ids.len());

    Ok(trainer_ids)
}

/// Inserts the given pokemons in the Pokedex database.
///
/// Each pokemon's `trainer` column is resolved against the ids of the seeded trainers.
fn insert_pokemons(
    connection: &mut SyncConnection,
    new_pokemons: Vec<ImportPokemon>,
    trainer_ids: &[i64],
) -> anyhow::Result<()> {
    use pokedex_rs::schema::pokemons::dsl::*;

    let records = new_pokemons
        .into_iter()
        .map(|new_pokemon| {
            let owner_id = match new_pokemon.trainer {
                Some(row) => Some(trainer_ids.get(row - 1).copied().ok_or_else(|| {
                    anyhow!("pokemon {} refers to unknown trainer row {}", new_pokemon.name, row)
                })?),
                None => None,
            };
            Ok(new_pokemon.into_record(owner_id))
        })
        .collect::<anyhow::Result<Vec<PokemonRecord>>>()?;

    let inserted_count = insert_into(pokemons)
        .values(&records)
        .execute(connection)
        .with_context(|| "failed to insert pokemons into database")?;
    trace!("{} pokemons have been inserted into database", inserted_count);

    Ok(())
}
