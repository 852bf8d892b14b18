use pokedex_rs::models::user::User;
use pokedex_rs::services::account;

use crate::integration_helpers::app::TestApp;

pub const PASSWORD: &str = "pallet-town-1996";

pub async fn create_user(app: &TestApp, username: &str) -> User {
    account::Service::new(app.get_pool())
        .create_user(username, PASSWORD)
        .await
        .unwrap()
}

pub async fn issue_token(app: &TestApp, user: &User, scope: &str) -> String {
    let (raw_token, _) = account::Service::new(app.get_pool())
        .issue_token(user.id, scope, 3600)
        .await
        .unwrap();

    raw_token
}

pub fn bearer(raw_token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", raw_token))
}
