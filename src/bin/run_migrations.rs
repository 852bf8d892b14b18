//! Applies the Pokedex database migrations to the main and test databases.
//!
//! Equivalent to `diesel migration run` for both databases, without requiring the diesel CLI.
//! Databases that cannot be reached are skipped.

use std::sync::OnceLock;
use std::time::Instant;

use anyhow::{anyhow, Context};
use diesel::migration::MigrationSource;
use diesel::{Connection, ConnectionError};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{info, trace};
use pokedex_rs::db::{get_db_url, get_test_db_url, Backend, SyncConnection};
use pokedex_rs::helpers::env::load_optional_dotenv;
use regex::Regex;
use simple_logger::SimpleLogger;

/// Container of migrations to apply, embedded in our executable.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Main program body.
///
/// Applies pending migrations to the database at `DATABASE_URL`, then to its test counterpart.
fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .init()
        .with_context(|| "failed to initialize logging facility")?;

    info!("Loading environment variables");
    load_optional_dotenv()
        .with_context(|| "failed to load `.env` file containing environment variables")?;

    info!("Starting Pokedex migration run");
    let start_time = Instant::now();

    info!("Preparing migration targets");
    let db_url = get_db_url().with_context(|| "failed to get DB URL")?;
    let test_db_url = get_test_db_url(&db_url);
    let migration_targets = vec![db_url, test_db_url];

    for db_url in migration_targets {
        info!("Applying migrations to database `{}`", filter_db_url(&db_url)?);
        apply_migrations(&db_url, MIGRATIONS)?;
    }

    let elapsed = start_time.elapsed();
    info!("Migrations applied in {:.4?}s.", elapsed.as_secs_f64());

    Ok(())
}

/// Removes credentials from a DB URL before logging it.
fn filter_db_url(db_url: &str) -> anyhow::Result<String> {
    static FILTER: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

    let filter = FILTER
        .get_or_init(|| {
            Regex::new(
                "postgres://(?:[^:@]+(?::[^@]+)?@)?(?<host>[^:]+)(?<port>:\\d+)?/(?<db>[\\w-]+)",
            )
        })
        .as_ref()
        .map_err(|err| err.clone())
        .with_context(|| "failed to compile DB URL filter")?;
    Ok(filter
        .replace_all(db_url, "postgres://$host$port/$db")
        .into_owned())
}

/// Applies DB migrations to the given database.
fn apply_migrations<S>(db_url: &str, migrations: S) -> anyhow::Result<()>
where
    S: MigrationSource<Backend>,
{
    match SyncConnection::establish(db_url) {
        Err(ConnectionError::BadConnection(_)) => {
            info!("Could not connect to Postgres database `{}`; skipping", filter_db_url(db_url)?);

            Ok(())
        },
        Ok(mut connection) => {
            info!("Applying migrations");
            let applied_migrations = connection
                .run_pending_migrations(migrations)
                .map_err(|err| anyhow!("{}", err))
                .with_context(|| "failed to apply migrations")?;
            trace!("{} migrations applied", applied_migrations.len());

            Ok(())
        },
        Err(err) => Err(err).with_context(|| "failed to connect to Postgres database"),
    }
}
