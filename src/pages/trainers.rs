//! Trainer pages.

use actix_web::{get, routes};
use actix_web::http::StatusCode;
use actix_web::web::{Data, Path, ServiceConfig};
use log::trace;
use minijinja::context;

use crate::auth::session::SessionUser;
use crate::pages::templates::render_page;
use crate::pages::PageResult;
use crate::services::{pokemon, trainer, Repository};

/// Registers the trainer pages.
///
/// Called automatically from [`pages::configure`](crate::pages::configure).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding trainer pages");
    config.service(list).service(detail);
}

/// Lists all trainers.
#[routes]
#[get("/trainer")]
#[get("/trainer/")]
pub async fn list(user: Option<SessionUser>, trainer_service: Data<trainer::Service>) -> PageResult {
    let trainers = trainer_service.list().await?;

    Ok(render_page(StatusCode::OK, "trainers.html", context! { user, trainers })?)
}

/// Displays a trainer and the pokemons they own.
#[get("/trainer/{id:\\d+}", name = "trainer")]
pub async fn detail(
    user: Option<SessionUser>,
    id: Path<i64>,
    trainer_service: Data<trainer::Service>,
    pokemon_service: Data<pokemon::Service>,
) -> PageResult {
    let trainer = trainer_service.get(id.into_inner()).await?;
    let pokemons = pokemon_service.list_for_trainer(trainer.id).await?;

    Ok(render_page(StatusCode::OK, "display_trainer.html", context! { user, trainer, pokemons })?)
}
