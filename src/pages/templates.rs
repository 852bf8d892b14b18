//! HTML templates used to render the Pokedex pages.
//!
//! Templates are embedded in the binary and rendered with [`minijinja`]. HTML auto-escaping is
//! enabled for all of them.

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Sources of all templates, keyed by name.
const TEMPLATE_SOURCES: [(&str, &str); 9] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("display_pokemon.html", include_str!("../../templates/display_pokemon.html")),
    ("trainers.html", include_str!("../../templates/trainers.html")),
    ("display_trainer.html", include_str!("../../templates/display_trainer.html")),
    ("pokemon_form.html", include_str!("../../templates/pokemon_form.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("not_found.html", include_str!("../../templates/not_found.html")),
    ("error.html", include_str!("../../templates/error.html")),
];

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_loader(|name| {
        Ok(TEMPLATE_SOURCES
            .iter()
            .find(|(template_name, _)| *template_name == name)
            .map(|(_, source)| source.to_string()))
    });
    env
});

/// Renders a template with the given context.
///
/// # Errors
///
/// A [`Template`](crate::Error::Template) error if the template does not exist or cannot be
/// rendered.
pub fn render<C>(name: &str, context: C) -> crate::Result<String>
where
    C: Serialize,
{
    Ok(TEMPLATES.get_template(name)?.render(context)?)
}

/// Renders a template and wraps it in an HTML [`HttpResponse`] with the given status code.
pub fn render_page<C>(status_code: StatusCode, name: &str, context: C) -> crate::Result<HttpResponse>
where
    C: Serialize,
{
    let body = render(name, context)?;

    Ok(HttpResponse::build(status_code)
        .insert_header(ContentType::html())
        .body(body))
}
