//! Pokemon pages: index, detail and the login-gated add/edit/delete actions.

use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::web::{Bytes, Data, Path, ServiceConfig};
use actix_web::{get, post, route, HttpRequest};
use log::{info, trace};
use minijinja::context;

use crate::auth::session::SessionUser;
use crate::forms::PokemonForm;
use crate::helpers::multipart::{parse_form_data, UploadedFile};
use crate::media::{remove_picture_on_error, store_picture};
use crate::models::pokemon::validations::POKEMON_TYPES;
use crate::models::pokemon::Pokemon;
use crate::models::trainer::Trainer;
use crate::pages::templates::render_page;
use crate::pages::{redirect, PageResult};
use crate::services::{pokemon, trainer, Repository};
use crate::settings::Settings;

/// Registers the Pokemon pages.
///
/// Called automatically from [`pages::configure`](crate::pages::configure).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding pokemon pages");
    config
        .service(index)
        .service(add_form)
        .service(add)
        .service(detail)
        .service(edit_form)
        .service(edit)
        .service(delete);
}

/// Lists all pokemons and all trainers.
#[get("/", name = "index")]
pub async fn index(
    user: Option<SessionUser>,
    pokemon_service: Data<pokemon::Service>,
    trainer_service: Data<trainer::Service>,
) -> PageResult {
    let pokemons = pokemon_service.list().await?;
    let trainers = trainer_service.list().await?;

    Ok(render_page(StatusCode::OK, "index.html", context! { user, pokemons, trainers })?)
}

/// Displays a pokemon, along with the name of its trainer.
#[get("/pokemon/{id:\\d+}", name = "pokemon")]
pub async fn detail(
    user: Option<SessionUser>,
    id: Path<i64>,
    pokemon_service: Data<pokemon::Service>,
    trainer_service: Data<trainer::Service>,
) -> PageResult {
    let pokemon = pokemon_service.get(id.into_inner()).await?;
    let trainer = match pokemon.trainer_id {
        Some(trainer_id) => Some(trainer_service.get(trainer_id).await?),
        None => None,
    };

    Ok(render_page(StatusCode::OK, "display_pokemon.html", context! { user, pokemon, trainer })?)
}

/// Displays an empty form to add a pokemon.
#[get("/pokemon/add", name = "pokemon_add")]
pub async fn add_form(user: SessionUser, trainer_service: Data<trainer::Service>) -> PageResult {
    let trainers = trainer_service.list().await?;

    render_form(&user, &PokemonForm::default(), &trainers, None)
}

/// Adds a pokemon submitted through the form.
///
/// On success, redirects to the index page. If the form is invalid, it is displayed again with
/// error messages and nothing is saved.
#[post("/pokemon/add")]
pub async fn add(
    user: SessionUser,
    req: HttpRequest,
    body: Bytes,
    pokemon_service: Data<pokemon::Service>,
    trainer_service: Data<trainer::Service>,
    settings: Data<Settings>,
) -> PageResult {
    let (mut form, picture) = read_submission(&req, body).await?;
    let trainers = trainer_service.list().await?;

    let Some(record) = form.validate(&trainers, picture.as_ref()) else {
        return render_form(&user, &form, &trainers, None);
    };

    let picture_path = match &picture {
        Some(picture) => Some(store_picture(&settings, picture).await?),
        None => None,
    };
    let result = pokemon_service
        .insert_record(&record, picture_path.as_deref())
        .await;
    let pokemon = remove_picture_on_error(result, &settings, picture_path.as_deref()).await?;
    info!("User {} added pokemon {} (id {})", user.username, pokemon.name, pokemon.id);

    Ok(redirect("/"))
}

/// Displays a form to edit a pokemon, filled with its current values.
#[get("/pokemon/{id:\\d+}/edit", name = "pokemon_edit")]
pub async fn edit_form(
    user: SessionUser,
    id: Path<i64>,
    pokemon_service: Data<pokemon::Service>,
    trainer_service: Data<trainer::Service>,
) -> PageResult {
    let pokemon = pokemon_service.get(id.into_inner()).await?;
    let trainers = trainer_service.list().await?;

    render_form(&user, &PokemonForm::for_pokemon(&pokemon), &trainers, Some(&pokemon))
}

/// Updates a pokemon with the values submitted through the form.
///
/// The pokemon's picture is only replaced if a new one is uploaded.
#[post("/pokemon/{id:\\d+}/edit")]
pub async fn edit(
    user: SessionUser,
    id: Path<i64>,
    req: HttpRequest,
    body: Bytes,
    pokemon_service: Data<pokemon::Service>,
    trainer_service: Data<trainer::Service>,
    settings: Data<Settings>,
) -> PageResult {
    let pokemon = pokemon_service.get(id.into_inner()).await?;
    let (mut form, picture) = read_submission(&req, body).await?;
    form.current_picture = pokemon.picture.clone();
    let trainers = trainer_service.list().await?;

    let Some(record) = form.validate(&trainers, picture.as_ref()) else {
        return render_form(&user, &form, &trainers, Some(&pokemon));
    };

    let picture_path = match &picture {
        Some(picture) => Some(store_picture(&settings, picture).await?),
        None => None,
    };
    let result = pokemon_service
        .update_record(pokemon.id, &record, picture_path.as_deref())
        .await;
    let updated = remove_picture_on_error(result, &settings, picture_path.as_deref()).await?;
    info!("User {} updated pokemon {} (id {})", user.username, updated.name, updated.id);

    Ok(redirect("/"))
}

/// Deletes a pokemon, then redirects to the index page.
///
/// There is no confirmation step.
#[route("/pokemon/{id:\\d+}/delete", method = "GET", method = "POST", name = "pokemon_delete")]
pub async fn delete(
    user: SessionUser,
    id: Path<i64>,
    pokemon_service: Data<pokemon::Service>,
) -> PageResult {
    let pokemon_id = id.into_inner();
    pokemon_service.delete(pokemon_id).await?;
    info!("User {} deleted pokemon {}", user.username, pokemon_id);

    Ok(redirect("/"))
}

async fn read_submission(
    req: &HttpRequest,
    body: Bytes,
) -> crate::Result<(PokemonForm, Option<UploadedFile>)> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let mut form_data = parse_form_data(content_type, body).await?;

    let picture = form_data.take_file("picture");
    Ok((PokemonForm::from_form_data(&form_data), picture))
}

fn render_form(
    user: &SessionUser,
    form: &PokemonForm,
    trainers: &[Trainer],
    pokemon: Option<&Pokemon>,
) -> PageResult {
    Ok(render_page(
        StatusCode::OK,
        "pokemon_form.html",
        context! { user, form, trainers, pokemon, pokemon_types => POKEMON_TYPES },
    )?)
}
