use std::env;
use std::path::Path;
use std::sync::Once;

use actix_web::cookie::Cookie;
use diesel::{delete, Connection, RunQueryDsl};
use log::{debug, trace};
use pokedex_rs::auth::session::{create_session_token, SESSION_COOKIE};
use pokedex_rs::db::{get_db_url, get_pool, get_test_db_url, Pool, SyncConnection};
use pokedex_rs::helpers::env::load_optional_dotenv;
use pokedex_rs::models::user::User;
use pokedex_rs::settings::Settings;
use tempfile::TempDir;

#[macro_export]
macro_rules! init_test_service {
    ($app_var:ident, $service_var:ident) => {
        let $app_var = $crate::integration_helpers::app::TestApp::new();
        let $service_var = actix_web::test::init_service(pokedex_rs::pokedex_app!(
            $app_var.get_pool(),
            $app_var.get_settings()
        ))
        .await;
    };
}

pub struct TestApp {
    pool: Pool,
    settings: Settings,
    _media_root: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        static INIT_TEST_DB_ENV_VAR: Once = Once::new();
        INIT_TEST_DB_ENV_VAR.call_once(|| {
            debug!("Loading environment variables");
            load_optional_dotenv().unwrap();

            debug!("Setting environment variable required to connect to test DB");
            env::set_var("DATABASE_URL", get_test_db_url(&get_db_url().unwrap()));
        });

        debug!("Creating test database connection pool");
        let pool = get_pool().unwrap();

        let media_root = TempDir::new().unwrap();
        trace!("Storing uploaded pictures in {}", media_root.path().display());
        let settings = Settings {
            secret_key: "pokedex-integration-tests".into(),
            media_root: media_root.path().to_path_buf(),
            ..Settings::default()
        };

        Self { pool, settings, _media_root: media_root }
    }

    pub fn get_pool(&self) -> Pool {
        self.pool.clone()
    }

    pub fn get_settings(&self) -> Settings {
        self.settings.clone()
    }

    pub fn media_root(&self) -> &Path {
        &self.settings.media_root
    }

    pub fn session_cookie(&self, user: &User) -> Cookie<'static> {
        let token = create_session_token(user, &self.settings).unwrap();
        Cookie::new(SESSION_COOKIE, token)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        use pokedex_rs::schema::{access_tokens, pokemons, trainers, users};

        debug!("Connecting to test DB to perform cleanup");
        let db_url = get_db_url().unwrap();
        let mut connection = SyncConnection::establish(&db_url).unwrap();

        debug!("Deleting all data in test DB");
        let deleted_count = delete(pokemons::table).execute(&mut connection).unwrap();
        trace!("Cleaned up {} pokemons from test DB", deleted_count);
        let deleted_count = delete(trainers::table).execute(&mut connection).unwrap();
        trace!("Cleaned up {} trainers from test DB", deleted_count);
        let deleted_count = delete(access_tokens::table).execute(&mut connection).unwrap();
        trace!("Cleaned up {} access tokens from test DB", deleted_count);
        let deleted_count = delete(users::table).execute(&mut connection).unwrap();
        trace!("Cleaned up {} users from test DB", deleted_count);
    }
}
